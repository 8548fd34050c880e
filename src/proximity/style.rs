//! Default presentation per proximity level.
//!
//! The host picks the avatar icon and the counter's background tint from the
//! level. These tables are the map's default theme; a host is free to ignore
//! them and map levels on its own.

use std::fmt;

use super::ProximityLevel;

/// An sRGB color with alpha, formatted as a CSS `rgba()` value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_css(self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Rgba {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgba({}, {}, {}, {})", self.r, self.g, self.b, self.a)
    }
}

/// Icon and background tint for one level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelStyle {
    pub icon: &'static str,
    pub tint: Rgba,
}

const STYLES: [LevelStyle; 5] = [
    LevelStyle {
        icon: "./clay-daying.png",
        tint: Rgba::new(255, 255, 255, 0.7),
    },
    LevelStyle {
        icon: "./clay_mad.png",
        tint: Rgba::new(211, 218, 166, 0.7),
    },
    LevelStyle {
        icon: "./clay_happy.png",
        tint: Rgba::new(183, 211, 174, 0.7),
    },
    LevelStyle {
        icon: "./clay_ouyea.png",
        tint: Rgba::new(218, 166, 166, 0.7),
    },
    LevelStyle {
        icon: "./clay_tomuch.png",
        tint: Rgba::new(218, 166, 198, 0.7),
    },
];

impl LevelStyle {
    /// Default style for a level.
    pub fn for_level(level: ProximityLevel) -> &'static LevelStyle {
        &STYLES[level.as_u8() as usize]
    }
}
