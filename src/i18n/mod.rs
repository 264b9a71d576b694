//! Localized strings for alerts, dialogs and the wallet status panel.
//!
//! English ships embedded in the binary (`config/locales/en-US.yml`). Another
//! locale can be dropped into `<config>/locales/<locale>.yml`; keys missing there
//! fall back to English and then to the key itself.
//!
//! Locale files are nested YAML under a top-level locale key and are flattened
//! into dot keys:
//!
//! ```yaml
//! en-US:
//!   alerts:
//!     wipe_failed:
//!       title: "Nuke of the wallet failed"
//! ```
//!
//! becomes `alerts.wipe_failed.title`.

mod loader;
pub mod translations;

pub use loader::{load_locale_file, parse_locale_yaml};
pub use translations::{TranslationMap, translate, translate_with_fallback};

use std::path::Path;

/// English locale shipped with the binary.
const EMBEDDED_EN_US: &str = include_str!("../../config/locales/en-US.yml");

/// Locale used when neither settings nor the environment select one.
pub const DEFAULT_LOCALE: &str = "en-US";

/// What: Parse the embedded English strings.
///
/// Output:
/// - Flattened English translation map (empty only if the embedded file is malformed).
#[must_use]
pub fn embedded_fallback() -> TranslationMap {
    parse_locale_yaml(EMBEDDED_EN_US).unwrap_or_else(|e| {
        tracing::error!(error = %e, "embedded en-US locale failed to parse");
        TranslationMap::new()
    })
}

/// What: Pick the locale code to use.
///
/// Inputs:
/// - `setting`: Value of `locale` in `settings.conf` (may be empty)
///
/// Output:
/// - Locale code such as `de-DE`.
///
/// Details:
/// - A non-empty setting wins; otherwise `LC_ALL`, `LC_MESSAGES`, `LANG` are read in order.
/// - `de_DE.UTF-8` is normalised to `de-DE`; `C`/`POSIX` map to the default.
#[must_use]
pub fn resolve_locale(setting: &str) -> String {
    let trimmed = setting.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|raw| normalize_locale(&raw))
        .unwrap_or_else(|| DEFAULT_LOCALE.to_string())
}

/// Normalise an environment locale string (`de_DE.UTF-8` -> `de-DE`).
fn normalize_locale(raw: &str) -> Option<String> {
    let base = raw.trim().split(['.', '@']).next()?;
    if base.is_empty() || base.eq_ignore_ascii_case("c") || base.eq_ignore_ascii_case("posix") {
        return None;
    }
    let mut parts = base.split(['_', '-']);
    let language = parts.next()?.to_lowercase();
    Some(match parts.next() {
        Some(region) => format!("{language}-{}", region.to_uppercase()),
        None => language,
    })
}

/// What: Load the translation maps for `locale`.
///
/// Inputs:
/// - `locale`: Locale code
/// - `locales_dir`: Directory holding user locale files, if any
///
/// Output:
/// - `(translations, fallback)` where `fallback` is always the embedded English map.
///
/// Details:
/// - English or a missing/broken override file yields the English map for both.
#[must_use]
pub fn load_translations(
    locale: &str,
    locales_dir: Option<&Path>,
) -> (TranslationMap, TranslationMap) {
    let fallback = embedded_fallback();
    if locale == DEFAULT_LOCALE {
        return (fallback.clone(), fallback);
    }
    let Some(dir) = locales_dir else {
        return (fallback.clone(), fallback);
    };
    match load_locale_file(locale, dir) {
        Ok(map) => {
            tracing::info!(locale, keys = map.len(), "locale loaded");
            (map, fallback)
        }
        Err(e) => {
            tracing::warn!(locale, error = %e, "locale unavailable, using English");
            (fallback.clone(), fallback)
        }
    }
}

/// What: Get a translation for a given key from `AppState`.
///
/// Inputs:
/// - `app`: `AppState` containing translation maps
/// - `key`: Dot-notation key (e.g., `alerts.wipe_failed.title`)
///
/// Output:
/// - Translated string, or the key itself if translation not found
pub fn t(app: &crate::state::AppState, key: &str) -> String {
    translate_with_fallback(key, &app.translations, &app.translations_fallback)
}

/// What: Get a translation with format arguments.
///
/// Inputs:
/// - `app`: `AppState` containing translation maps
/// - `key`: Dot-notation key
/// - `args`: Format arguments
///
/// Output:
/// - Formatted translated string
///
/// Details:
/// - Replaces `{}` placeholders in order; surplus arguments are ignored.
pub fn t_fmt(app: &crate::state::AppState, key: &str, args: &[&dyn std::fmt::Display]) -> String {
    let mut result = t(app, key);
    for arg in args {
        result = result.replacen("{}", &arg.to_string(), 1);
    }
    result
}

/// Single-argument convenience over [`t_fmt`].
pub fn t_fmt1<T: std::fmt::Display>(app: &crate::state::AppState, key: &str, arg: T) -> String {
    t_fmt(app, key, &[&arg])
}
