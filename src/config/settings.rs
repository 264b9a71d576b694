use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::env::Timing;
use crate::state::types::{Network, WalletConfig};

/// Written when `settings.conf` is missing or empty.
pub const SETTINGS_SKELETON_CONTENT: &str = "# wallet-root settings\n\
#\n\
# Format: key = value\n\
# Lines starting with # are comments.\n\
#\n\
# Network the wallet runs on: mainnet | testnet (required unless --network is given)\n\
# network = testnet\n\
#\n\
# Disk-space poll interval in seconds\n\
status_poll_secs = 60\n\
#\n\
# Splash delay before initial setup, in milliseconds\n\
splash_delay_ms = 1500\n\
#\n\
# Minimum free space on the data volume, in megabytes\n\
min_free_space_mb = 1024\n\
#\n\
# UI locale; empty uses LC_ALL / LC_MESSAGES / LANG\n\
locale = \n\
#\n\
# Feature flags: feature_<name> = true | false\n\
feature_onboardingflow = false\n\
feature_testbackupphraseflow = false\n\
feature_showfiatconversion = false\n";

/// Runtime settings read from `settings.conf`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Selected network, if any.
    pub network: Option<Network>,
    /// Disk-space poll interval in seconds.
    pub status_poll_secs: u64,
    /// Splash delay in milliseconds.
    pub splash_delay_ms: u64,
    /// Free-space threshold in megabytes.
    pub min_free_space_mb: u64,
    /// Locale setting; empty means auto-detect.
    pub locale: String,
    /// `feature_<name>` entries, keyed by lower-case flag name.
    pub feature_flags: HashMap<String, bool>,
    /// Version override for testing upgrade detection.
    pub current_version: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            network: None,
            status_poll_secs: 60,
            splash_delay_ms: 1_500,
            min_free_space_mb: 1_024,
            locale: String::new(),
            feature_flags: HashMap::new(),
            current_version: None,
        }
    }
}

impl Settings {
    /// Effect timing derived from the poll and splash keys.
    #[must_use]
    pub const fn timing(&self) -> Timing {
        Timing {
            splash_delay: Duration::from_millis(self.splash_delay_ms),
            status_poll_interval: Duration::from_secs(self.status_poll_secs),
        }
    }

    /// Free-space threshold in bytes.
    #[must_use]
    pub const fn min_free_space_bytes(&self) -> u64 {
        self.min_free_space_mb.saturating_mul(1024 * 1024)
    }

    /// What: Overlay `feature_*` entries onto the shipped flag set.
    ///
    /// Output:
    /// - `WalletConfig` whose known flags take the configured value; unknown
    ///   entries are added under their lower-case name.
    ///
    /// Details:
    /// - Flag names are camelCase but settings keys are normalised to lower case,
    ///   so known flags are matched case-insensitively.
    #[must_use]
    pub fn wallet_config(&self) -> WalletConfig {
        let mut config = WalletConfig::initial();
        let mut overrides = self.feature_flags.clone();
        for (name, enabled) in &mut config.flags {
            if let Some(value) = overrides.remove(&name.to_lowercase()) {
                *enabled = value;
            }
        }
        config.flags.extend(overrides);
        config
    }
}

/// Strip `//` and `#` inline comments from a value.
///
/// A leading `#` is kept so the value can itself start with one.
pub(crate) fn strip_inline_comment(mut s: &str) -> &str {
    if let Some(i) = s.find("//") {
        s = &s[..i];
    }
    if let Some(i_rel) = if let Some(stripped) = s.strip_prefix('#') {
        stripped.find('#').map(|j| j + 1)
    } else {
        s.find('#')
    } {
        s = &s[..i_rel];
    }
    s.trim()
}

/// Normalise a settings key the way every reader and writer compares them.
fn normalize_key(raw: &str) -> String {
    raw.trim().to_lowercase().replace(['.', '-', ' '], "_")
}

fn parse_bool(val: &str) -> Option<bool> {
    match val.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// What: Parse settings from `settings.conf` content.
///
/// Inputs:
/// - `content`: File content.
///
/// Output:
/// - `Settings`; every unparsable or unknown value keeps its default.
#[must_use]
pub fn parse_settings(content: &str) -> Settings {
    let mut settings = Settings::default();
    for line in content.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        let Some((raw_key, raw_val)) = trimmed.split_once('=') else {
            continue;
        };
        let key = normalize_key(raw_key);
        let val = strip_inline_comment(raw_val.trim());
        match key.as_str() {
            "network" => {
                if let Some(n) = Network::from_config_key(val) {
                    settings.network = Some(n);
                } else if !val.is_empty() {
                    tracing::warn!(value = val, "ignoring unknown network in settings.conf");
                }
            }
            "status_poll_secs" => {
                if let Ok(v) = val.parse::<u64>()
                    && v > 0
                {
                    settings.status_poll_secs = v;
                }
            }
            "splash_delay_ms" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.splash_delay_ms = v;
                }
            }
            "min_free_space_mb" => {
                if let Ok(v) = val.parse::<u64>() {
                    settings.min_free_space_mb = v;
                }
            }
            "locale" => settings.locale = val.to_string(),
            "current_version" if !val.is_empty() => {
                settings.current_version = Some(val.to_string());
            }
            other => {
                if let Some(name) = other.strip_prefix("feature_")
                    && !name.is_empty()
                    && let Some(enabled) = parse_bool(val)
                {
                    settings.feature_flags.insert(name.to_string(), enabled);
                }
            }
        }
    }
    settings
}

/// Load settings from `path`, defaulting when the file is missing or unreadable.
#[must_use]
pub fn load_settings(path: &Path) -> Settings {
    fs::read_to_string(path)
        .map(|content| parse_settings(&content))
        .unwrap_or_default()
}

/// What: Write the skeleton when `settings.conf` is missing or empty.
///
/// # Errors
/// - Directory creation or write failure.
pub fn ensure_settings_file(path: &Path) -> io::Result<()> {
    let empty = fs::metadata(path).map_or(true, |m| m.len() == 0);
    if !empty {
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, SETTINGS_SKELETON_CONTENT)
}

/// What: Persist a boolean key, preserving every other line.
///
/// Inputs:
/// - `path`: Settings file (created from the skeleton if missing).
/// - `key`: Key to set; normalised before matching.
/// - `value`: New value.
///
/// # Errors
/// - Read or write failure.
///
/// Details:
/// - Existing lines with the same normalised key are rewritten in place;
///   otherwise the key is appended.
pub fn save_boolean_key(path: &Path, key: &str, value: bool) -> io::Result<()> {
    ensure_settings_file(path)?;
    let key_norm = normalize_key(key);
    let content = fs::read_to_string(path)?;
    let mut lines: Vec<String> = content.lines().map(str::to_string).collect();
    let mut replaced = false;
    for line in &mut lines {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with("//") {
            continue;
        }
        if let Some((kraw, _)) = trimmed.split_once('=')
            && normalize_key(kraw) == key_norm
        {
            *line = format!("{key_norm} = {value}");
            replaced = true;
        }
    }
    if !replaced {
        lines.push(format!("{key_norm} = {value}"));
    }
    let mut new_content = lines.join("\n");
    new_content.push('\n');
    fs::write(path, new_content)
}
