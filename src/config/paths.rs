use std::env;
use std::path::{Path, PathBuf};

/// Application directory name under the XDG bases.
const APP_DIR: &str = "wallet-root";

/// Resolve an XDG base directory from environment or default to `$HOME` + segments.
///
/// Inputs:
/// - `var`: Environment variable to check (e.g., `XDG_CONFIG_HOME`).
/// - `home_default`: Fallback path segments relative to `$HOME` if `var` is unset/empty.
///
/// Output: Resolved base directory path.
fn xdg_base_dir(var: &str, home_default: &[&str]) -> PathBuf {
    if let Ok(p) = env::var(var)
        && !p.trim().is_empty()
    {
        return PathBuf::from(p);
    }
    let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
    let mut base = PathBuf::from(home);
    for seg in home_default {
        base = base.join(seg);
    }
    base
}

/// Create `dir` if needed and hand it back.
fn ensured(dir: PathBuf) -> PathBuf {
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!(dir = %dir.display(), error = %e, "failed to create directory");
    }
    dir
}

/// Config directory: `$XDG_CONFIG_HOME/wallet-root`, else `$HOME/.config/wallet-root` (ensured to exist).
pub fn config_dir() -> PathBuf {
    ensured(xdg_base_dir("XDG_CONFIG_HOME", &[".config"]).join(APP_DIR))
}

/// Logs directory under config: `<config>/logs` (ensured to exist).
pub fn logs_dir() -> PathBuf {
    ensured(config_dir().join("logs"))
}

/// Optional locale overrides: `<config>/locales` (not created).
pub fn locales_dir() -> PathBuf {
    config_dir().join("locales")
}

/// `settings.conf` inside the config directory.
pub fn settings_path() -> PathBuf {
    config_dir().join("settings.conf")
}

/// What: Resolve the wallet data directory.
///
/// Inputs:
/// - `override_dir`: `--data-dir` from the command line, if given.
///
/// Output:
/// - The override, else `$XDG_DATA_HOME/wallet-root`, else `$HOME/.local/share/wallet-root`;
///   ensured to exist.
pub fn data_dir(override_dir: Option<&Path>) -> PathBuf {
    override_dir.map_or_else(
        || ensured(xdg_base_dir("XDG_DATA_HOME", &[".local", "share"]).join(APP_DIR)),
        |dir| ensured(dir.to_path_buf()),
    )
}

#[cfg(test)]
mod tests {
    #[test]
    /// What: Config, logs and data directories land under the XDG bases.
    ///
    /// Inputs:
    /// - `HOME` pointed at a temp dir; XDG variables cleared.
    ///
    /// Output:
    /// - Directories end with the expected components and exist.
    fn paths_resolve_under_home() {
        let _guard = crate::config::test_mutex()
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        let orig_home = std::env::var_os("HOME");
        let orig_cfg = std::env::var_os("XDG_CONFIG_HOME");
        let orig_data = std::env::var_os("XDG_DATA_HOME");
        let tmp = tempfile::tempdir().expect("tempdir");
        unsafe {
            std::env::set_var("HOME", tmp.path());
            std::env::remove_var("XDG_CONFIG_HOME");
            std::env::remove_var("XDG_DATA_HOME");
        }
        let cfg = super::config_dir();
        let logs = super::logs_dir();
        let data = super::data_dir(None);
        assert!(cfg.ends_with(".config/wallet-root"));
        assert!(logs.ends_with("wallet-root/logs") && logs.is_dir());
        assert!(data.ends_with(".local/share/wallet-root") && data.is_dir());
        assert!(super::settings_path().ends_with("wallet-root/settings.conf"));
        let custom = tmp.path().join("custom");
        assert_eq!(super::data_dir(Some(&custom)), custom);
        assert!(custom.is_dir());
        unsafe {
            for (key, value) in [
                ("HOME", orig_home),
                ("XDG_CONFIG_HOME", orig_cfg),
                ("XDG_DATA_HOME", orig_data),
            ] {
                match value {
                    Some(v) => std::env::set_var(key, v),
                    None => std::env::remove_var(key),
                }
            }
        }
    }
}
