pub mod wordle;

/// short git hash of the build, embedded by build.rs
pub const GIT_VERSION: &str = env!("GIT_HASH");

#[cfg(debug_assertions)]
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Debug;

#[cfg(not(debug_assertions))]
pub const LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;

/// Installs env_logger for the binaries. RUST_LOG overrides LOG_LEVEL when it is set.
pub fn init_logging() {
    env_logger::Builder::new()
        .filter_level(LOG_LEVEL)
        .parse_default_env()
        .format_timestamp_millis()
        .init();
}
