//! Logging setup.
//!
//! On `wasm32` records go to the browser console through `console_log`.
//! Native hosts install their own `log` backend (tests use `env_logger`);
//! there `init` only adjusts the level.

use log::LevelFilter;

use crate::error::{ProximityError, ProximityResult};

/// Install the console logger and set the level. Later calls only change the
/// level.
pub fn init(level: LevelFilter) {
    install_backend(level);
    log::set_max_level(level);
}

#[cfg(target_arch = "wasm32")]
fn install_backend(level: LevelFilter) {
    let Some(console_level) = level.to_level() else {
        return;
    };
    // Err means an earlier init already installed it; only the level changes
    if console_log::init_with_level(console_level).is_ok() {
        log::debug!("console logging enabled at {level}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn install_backend(_level: LevelFilter) {}

/// Parse a level name such as `"info"` or `"debug"`.
pub fn parse_level(name: &str) -> ProximityResult<LevelFilter> {
    name.parse::<LevelFilter>()
        .map_err(|_| ProximityError::InvalidConfig(format!("unknown log level {name:?}")))
}

/// Route `log` output to the test harness.
#[cfg(test)]
pub(crate) fn init_test_logger() {
    // Tests share one process; the first caller installs the logger
    if env_logger::builder()
        .is_test(true)
        .filter_level(LevelFilter::Trace)
        .try_init()
        .is_ok()
    {
        log::trace!("test logger installed");
    }
}
