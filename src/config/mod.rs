//! Configuration for the wallet root binary.
//!
//! Directories follow the XDG layout under `wallet-root`; runtime knobs live in
//! `settings.conf` as `key = value` lines.

/// Path resolution for config, log and data directories.
pub mod paths;
/// `settings.conf` parsing and persistence.
pub mod settings;

pub use paths::{config_dir, data_dir, locales_dir, logs_dir, settings_path};
pub use settings::{Settings, ensure_settings_file, load_settings, parse_settings};

#[cfg(test)]
static TEST_MUTEX: std::sync::OnceLock<std::sync::Mutex<()>> = std::sync::OnceLock::new();

#[cfg(test)]
/// What: Provide a process-wide mutex to serialize tests that touch `HOME`/XDG variables.
///
/// Inputs:
/// - None
///
/// Output:
/// - Shared reference to a lazily-initialized `Mutex<()>`.
pub(crate) fn test_mutex() -> &'static std::sync::Mutex<()> {
    TEST_MUTEX.get_or_init(|| std::sync::Mutex::new(()))
}
