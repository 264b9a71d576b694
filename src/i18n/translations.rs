//! Translation map and lookup.

use std::collections::HashMap;

/// Dot-notation key -> translated string.
pub type TranslationMap = HashMap<String, String>;

/// Look up `key` in a single map.
#[must_use]
pub fn translate(key: &str, translations: &TranslationMap) -> Option<String> {
    translations.get(key).cloned()
}

/// What: Look up a translation, falling back to English and then to the key.
///
/// Inputs:
/// - `key`: Dot-notation key
/// - `translations`: Active locale map
/// - `fallback_translations`: English map
///
/// Output:
/// - Translated string, or `key` itself when neither map has it
pub fn translate_with_fallback(
    key: &str,
    translations: &TranslationMap,
    fallback_translations: &TranslationMap,
) -> String {
    if let Some(translation) = translations.get(key) {
        return translation.clone();
    }
    if let Some(translation) = fallback_translations.get(key) {
        tracing::debug!(key, "translation missing in active locale, using English");
        return translation.clone();
    }
    tracing::debug!(key, "missing translation key");
    key.to_string()
}
