//! Count to level mapping.

use std::fmt;

use serde::{Serialize, Serializer};

/// Discrete intensity bucket derived from a proximity count.
///
/// Serialized as its number (0..=4).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ProximityLevel {
    /// Nothing nearby.
    Empty = 0,
    /// 1-2 points.
    Sparse = 1,
    /// 3-4 points.
    Moderate = 2,
    /// 5-6 points.
    Busy = 3,
    /// 7 or more points.
    Saturated = 4,
}

impl ProximityLevel {
    /// All levels in ascending order.
    pub const ALL: [ProximityLevel; 5] = [
        ProximityLevel::Empty,
        ProximityLevel::Sparse,
        ProximityLevel::Moderate,
        ProximityLevel::Busy,
        ProximityLevel::Saturated,
    ];

    /// Map a count to its level.
    #[inline]
    pub fn from_count(count: usize) -> Self {
        match count {
            0 => ProximityLevel::Empty,
            1..=2 => ProximityLevel::Sparse,
            3..=4 => ProximityLevel::Moderate,
            5..=6 => ProximityLevel::Busy,
            _ => ProximityLevel::Saturated,
        }
    }

    /// Look up a level by its number.
    pub fn from_u8(value: u8) -> Option<Self> {
        Self::ALL.get(value as usize).copied()
    }

    /// Get the raw level number.
    #[inline]
    pub fn as_u8(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ProximityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Level({})", self.as_u8())
    }
}

impl Serialize for ProximityLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}
