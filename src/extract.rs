/*!
 * Key extraction from C# sources.
 *
 * Each extractor scans raw source text for one string-literal convention:
 * `localizer["..."]` calls, data annotation properties, and navigation or
 * page metadata properties. Escaped characters inside the literal are
 * unescaped, keys are trimmed, empty keys are dropped and duplicates are
 * removed in first-seen order.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static LOCALIZER_CALL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"localizer\["((?:\\.|[^"\\])*)"\]"#).unwrap()
});

static DATA_ANNOTATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:Name|ErrorMessage)\s*=\s*"((?:\\.|[^"\\])*)""#).unwrap()
});

/// Label properties of `[RenderInNavBar]`; icons are not localized
static NAV_BAR_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"\b(?:NavGroupName|CascadedLinksGroupName|LinkText)\s*=\s*"((?:\\.|[^"\\])*)""#).unwrap()
});

static VIEW_METADATA_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"\b(?:NavGroupName|CascadedLinksGroupName|LinkText|PageTitle)\s*=\s*"((?:\\.|[^"\\])*)""#,
    )
    .unwrap()
});

/// A regex-driven source of localization keys
pub trait KeyExtractor: Send + Sync {
    /// Short name used in log output
    fn name(&self) -> &'static str;

    /// Extract keys from source text; empty input yields no keys
    fn extract_keys(&self, content: &str) -> Vec<String>;
}

/// Finds `localizer["..."]` lookups
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalizerCallExtractor;

impl KeyExtractor for LocalizerCallExtractor {
    fn name(&self) -> &'static str {
        "localizer-call"
    }

    fn extract_keys(&self, content: &str) -> Vec<String> {
        extract_captures(&LOCALIZER_CALL_REGEX, content)
    }
}

/// Finds `Name = "..."` and `ErrorMessage = "..."` annotation properties
#[derive(Debug, Default, Clone, Copy)]
pub struct DataAnnotationExtractor;

impl KeyExtractor for DataAnnotationExtractor {
    fn name(&self) -> &'static str {
        "data-annotation"
    }

    fn extract_keys(&self, content: &str) -> Vec<String> {
        extract_captures(&DATA_ANNOTATION_REGEX, content)
    }
}

/// Finds navigation labels and page titles
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewMetadataExtractor;

impl KeyExtractor for ViewMetadataExtractor {
    fn name(&self) -> &'static str {
        "view-metadata"
    }

    fn extract_keys(&self, content: &str) -> Vec<String> {
        extract_captures(&VIEW_METADATA_REGEX, content)
    }
}

/// Finds the labels a controller declares for the navigation bar
#[derive(Debug, Default, Clone, Copy)]
pub struct NavBarExtractor;

impl KeyExtractor for NavBarExtractor {
    fn name(&self) -> &'static str {
        "nav-bar"
    }

    fn extract_keys(&self, content: &str) -> Vec<String> {
        extract_captures(&NAV_BAR_REGEX, content)
    }
}

/// The extractors applied to C# sources, in the order their keys are merged
pub fn csharp_extractors() -> Vec<Box<dyn KeyExtractor>> {
    vec![
        Box::new(LocalizerCallExtractor),
        Box::new(DataAnnotationExtractor),
        Box::new(ViewMetadataExtractor),
    ]
}

/// Run every C# extractor and concatenate their keys in extractor order
///
/// Keys found by more than one extractor are kept once; case conflicts are
/// left for the resource merger to report.
pub fn extract_csharp_keys(content: &str) -> Vec<String> {
    unique_trimmed(
        csharp_extractors()
            .iter()
            .flat_map(|extractor| extractor.extract_keys(content)),
    )
}

fn extract_captures(regex: &Regex, content: &str) -> Vec<String> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    unique_trimmed(
        regex
            .captures_iter(content)
            .filter_map(|captures| captures.get(1))
            .map(|literal| unescape_literal(literal.as_str())),
    )
}

/// Trim keys, drop empties and keep the first of each exact duplicate
pub(crate) fn unique_trimmed<I>(keys: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut seen = HashSet::new();
    keys.into_iter()
        .map(|key| key.trim().to_string())
        .filter(|key| !key.is_empty())
        .filter(|key| seen.insert(key.clone()))
        .collect()
}

/// Write a key as the body of a regular C# string literal
pub fn escape_csharp_literal(key: &str) -> String {
    let mut escaped = String::with_capacity(key.len());
    for ch in key.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Resolve the common C# escapes inside a string literal body
fn unescape_literal(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('t') => result.push('\t'),
            Some('r') => result.push('\r'),
            Some(other) => result.push(other),
            None => result.push('\\'),
        }
    }

    result
}
