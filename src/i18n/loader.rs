//! Locale file loading and YAML flattening.

use std::fs;
use std::path::Path;

use crate::i18n::translations::TranslationMap;

/// What: Load `<locales_dir>/<locale>.yml` into a `TranslationMap`.
///
/// Inputs:
/// - `locale`: Locale code (e.g., "de-DE")
/// - `locales_dir`: Directory holding locale files
///
/// Output:
/// - Flattened translations
///
/// # Errors
/// - Invalid locale code, missing/unreadable/empty file, or malformed YAML.
pub fn load_locale_file(locale: &str, locales_dir: &Path) -> Result<TranslationMap, String> {
    if !is_valid_locale_format(locale) {
        return Err(format!(
            "Invalid locale code format: '{locale}'. Expected language[-region] (e.g. 'en-US')"
        ));
    }
    let file_path = locales_dir.join(format!("{locale}.yml"));
    if !file_path.is_file() {
        return Err(format!("Locale file not found: {}", file_path.display()));
    }
    let contents = fs::read_to_string(&file_path)
        .map_err(|e| format!("Failed to read locale file {}: {e}", file_path.display()))?;
    if contents.trim().is_empty() {
        return Err(format!("Locale file is empty: {}", file_path.display()));
    }
    parse_locale_yaml(&contents)
        .map_err(|e| format!("Failed to parse locale file {}: {e}", file_path.display()))
}

/// Locale codes are short, alphanumeric with single inner hyphens.
fn is_valid_locale_format(locale: &str) -> bool {
    !locale.is_empty()
        && locale.len() <= 20
        && locale.chars().all(|c| c.is_alphanumeric() || c == '-')
        && !locale.starts_with('-')
        && !locale.ends_with('-')
        && !locale.contains("--")
}

/// What: Parse locale YAML content into a `TranslationMap`.
///
/// Inputs:
/// - `yaml_content`: Locale file content
///
/// Output:
/// - Flattened translations, skipping the top-level locale key
///
/// # Errors
/// - Returns `Err` when the YAML cannot be parsed.
pub fn parse_locale_yaml(yaml_content: &str) -> Result<TranslationMap, String> {
    let doc: serde_norway::Value =
        serde_norway::from_str(yaml_content).map_err(|e| format!("Failed to parse YAML: {e}"))?;
    let mut translations = TranslationMap::new();
    if let Some(locale_obj) = doc.as_mapping() {
        for (_locale_key, locale_value) in locale_obj {
            flatten_yaml_value(locale_value, "", &mut translations);
        }
    }
    Ok(translations)
}

/// Recursively flatten nested mappings into dot keys. Scalars are stringified;
/// sequences are kept as their YAML text.
fn flatten_yaml_value(
    value: &serde_norway::Value,
    prefix: &str,
    translations: &mut TranslationMap,
) {
    match value {
        serde_norway::Value::Mapping(map) => {
            for (key, val) in map {
                if let Some(key_str) = key.as_str() {
                    let new_prefix = if prefix.is_empty() {
                        key_str.to_string()
                    } else {
                        format!("{prefix}.{key_str}")
                    };
                    flatten_yaml_value(val, &new_prefix, translations);
                }
            }
        }
        serde_norway::Value::String(s) => {
            translations.insert(prefix.to_string(), s.clone());
        }
        serde_norway::Value::Bool(b) => {
            translations.insert(prefix.to_string(), b.to_string());
        }
        serde_norway::Value::Number(n) => {
            translations.insert(prefix.to_string(), n.to_string());
        }
        serde_norway::Value::Sequence(_) => {
            if let Ok(yaml_str) = serde_norway::to_string(value) {
                translations.insert(prefix.to_string(), yaml_str.trim().to_string());
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    /// What: Nested YAML flattens to dot keys below the locale key.
    ///
    /// Inputs:
    /// - Two-level mapping with a string, a bool and a number.
    ///
    /// Output:
    /// - `alerts.wipe_failed.title` and scalar leaves stringified.
    fn parse_flattens_nested_keys() {
        let yaml = "de-DE:\n  alerts:\n    wipe_failed:\n      title: \"Löschen fehlgeschlagen\"\n  flags:\n    on: true\n    count: 3\n";
        let map = parse_locale_yaml(yaml).expect("valid yaml");
        assert_eq!(
            map.get("alerts.wipe_failed.title").map(String::as_str),
            Some("Löschen fehlgeschlagen")
        );
        assert_eq!(map.get("flags.on").map(String::as_str), Some("true"));
        assert_eq!(map.get("flags.count").map(String::as_str), Some("3"));
    }

    #[test]
    fn load_rejects_bad_codes_and_missing_files() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(load_locale_file("../etc", dir.path()).is_err());
        assert!(load_locale_file("de-DE", dir.path()).is_err());
        std::fs::write(dir.path().join("de-DE.yml"), "de-DE:\n  a: \"b\"\n").expect("write");
        let map = load_locale_file("de-DE", dir.path()).expect("loads");
        assert_eq!(map.get("a").map(String::as_str), Some("b"));
    }
}
