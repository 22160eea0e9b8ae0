/*!
 * Language utilities for culture code handling.
 *
 * This module knows the cultures resource stores are usually generated for,
 * validates culture codes such as `zh-CN` or `fr`, and builds the language
 * description handed to a translator.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Cultures generated by default, with their native display names
pub const SUPPORTED_CULTURES: &[(&str, &str)] = &[
    ("en-GB", "English (United Kingdom)"),
    ("zh-CN", "中文 (中国大陆)"),
    ("zh-TW", "中文 (台灣)"),
    ("zh-HK", "中文 (香港)"),
    ("ja-JP", "日本語 (日本)"),
    ("ko-KR", "한국어 (대한민국)"),
    ("vi-VN", "Tiếng Việt (Việt Nam)"),
    ("th-TH", "ภาษาไทย (ประเทศไทย)"),
    ("de-DE", "Deutsch (Deutschland)"),
    ("fr-FR", "Français (France)"),
    ("es-ES", "Español (España)"),
    ("ru-RU", "Русский (Россия)"),
    ("it-IT", "Italiano (Italia)"),
    ("pt-PT", "Português (Portugal)"),
    ("pt-BR", "Português (Brasil)"),
    ("ar-SA", "العربية (المملكة العربية السعودية)"),
    ("nl-NL", "Nederlands (Nederland)"),
    ("sv-SE", "Svenska (Sverige)"),
    ("pl-PL", "Polski (Polska)"),
    ("tr-TR", "Türkçe (Türkiye)"),
    ("ro-RO", "Română (România)"),
    ("da-DK", "Dansk (Danmark)"),
    ("uk-UA", "Українська (Україна)"),
    ("id-ID", "Bahasa Indonesia (Indonesia)"),
    ("fi-FI", "Suomi (Suomi)"),
    ("hi-IN", "हिन्दी (भारत)"),
    ("el-GR", "Ελληνικά (Ελλάδα)"),
];

/// All culture codes from the supported table, in table order
pub fn default_cultures() -> Vec<String> {
    SUPPORTED_CULTURES
        .iter()
        .map(|(code, _)| (*code).to_string())
        .collect()
}

/// Look up the display name of a supported culture (case-insensitive)
pub fn culture_display_name(code: &str) -> Option<&'static str> {
    let code = code.trim();
    SUPPORTED_CULTURES
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(code))
        .map(|(_, name)| *name)
}

/// Describe a target language for a translator, e.g. `zh-CN, 中文 (中国大陆)`
pub fn describe_language(code: &str) -> String {
    match culture_display_name(code) {
        Some(name) => format!("{}, {}", code.trim(), name),
        None => code.trim().to_string(),
    }
}

/// Validate a culture code by checking its primary language subtag
///
/// Accepts `fr`, `fra`, `zh-CN`, `pt_BR` and similar forms.
pub fn validate_culture_code(code: &str) -> Result<()> {
    let trimmed = code.trim();
    if trimmed.is_empty() {
        return Err(anyhow!("Culture code cannot be empty"));
    }

    let primary = trimmed
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase();

    let known = match primary.len() {
        2 => Language::from_639_1(&primary).is_some(),
        3 => Language::from_639_3(&primary).is_some(),
        _ => false,
    };

    if known {
        Ok(())
    } else {
        Err(anyhow!("Invalid culture code: {}", code))
    }
}
