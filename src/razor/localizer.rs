/*!
 * Markup text localization for Razor views.
 *
 * Markup segments are parsed as HTML fragments, their text nodes are
 * whitespace-normalized and every prose node is replaced with an
 * `@Localizer["..."]` lookup. Script segments and document-structure
 * segments are emitted unchanged.
 */

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use super::line::LineKind;
use super::markup::{HtmlFragment, MarkupFragment, TextEdit};
use super::segment::{classify_and_segment, Segment};
use crate::extract::unique_trimmed;

/// Lookup expression written in place of translatable text
static LOOKUP_EXPRESSION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"@Localizer\[\s*"((?:\\.|[^"\\])*)"\s*\]"#).unwrap()
});

/// Segments that are only valid as part of a complete document
static STRUCTURAL_ROOT_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(<!DOCTYPE|</?html|</?head|</?body)\b").unwrap()
});

static WHITESPACE_RUN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

/// Placeholder left in the tree for a new lookup until serialization is done
static LOOKUP_MARKER_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\x{E000}(\d+)\x{E001}").unwrap()
});

/// Rewrites view markup into localizer lookups
#[derive(Debug, Default, Clone, Copy)]
pub struct ViewLocalizer;

impl ViewLocalizer {
    pub fn new() -> Self {
        Self
    }

    /// Localize a view with the html5ever-backed markup fragment
    ///
    /// Returns the rewritten view and the newly wrapped keys, de-duplicated
    /// in order of first appearance. Keys are recorded as the text reads once
    /// serialized, so `Terms &amp; Conditions` stays escaped in both the
    /// lookup and the key.
    pub fn localize_markup(&self, content: &str) -> (String, Vec<String>) {
        self.localize_with::<HtmlFragment>(content)
    }

    /// Localize a view with any markup fragment implementation
    pub fn localize_with<M: MarkupFragment>(&self, content: &str) -> (String, Vec<String>) {
        let mut output = String::with_capacity(content.len());
        let mut keys = Vec::new();

        for segment in classify_and_segment(content) {
            if segment.kind() == LineKind::Script || is_structural(&segment) {
                push_unchanged(&mut output, &segment);
                continue;
            }

            let mut fragment = M::parse_fragment(&segment.joined());
            fragment.edit_text_nodes(normalize_whitespace);
            fragment.edit_text_nodes(|text| wrap_text::<M>(text, &mut keys));

            output.push_str(&restore_lookups(&fragment.serialize(), &keys));
            output.push_str(segment.line_ending());
        }

        let keys = unique_in_order(keys);
        debug!("Wrapped {} key(s) in view", keys.len());
        (output, keys)
    }

    /// Extract the keys referenced by existing lookups, without rewriting
    pub fn extract_keys(&self, content: &str) -> Vec<String> {
        unique_trimmed(
            LOOKUP_EXPRESSION_REGEX
                .captures_iter(content)
                .filter_map(|captures| captures.get(1))
                .map(|key| unescape_key(key.as_str())),
        )
    }
}

/// Build the lookup expression for a key
pub fn wrap_key(key: &str) -> String {
    format!("@Localizer[\"{}\"]", escape_key(key))
}

fn is_structural(segment: &Segment) -> bool {
    STRUCTURAL_ROOT_REGEX.is_match(segment.first_line_trimmed())
}

fn push_unchanged(output: &mut String, segment: &Segment) {
    for line in segment.lines() {
        output.push_str(&line.raw);
        output.push('\n');
    }
}

fn normalize_whitespace(text: &str) -> TextEdit {
    let normalized = WHITESPACE_RUN_REGEX.replace_all(text, " ");
    let normalized = normalized.trim();

    if normalized.is_empty() {
        TextEdit::Remove
    } else if normalized == text {
        TextEdit::Keep
    } else {
        TextEdit::Replace(normalized.to_string())
    }
}

fn wrap_text<M: MarkupFragment>(text: &str, keys: &mut Vec<String>) -> TextEdit {
    // Text holding a Razor expression is part code, not prose
    if contains_single_escape(text) {
        return TextEdit::Keep;
    }

    let trimmed = text.trim();
    if trimmed.is_empty() {
        return TextEdit::Keep;
    }

    // The lookup itself must not go through the serializer's escaping
    let marker = format!("\u{E000}{}\u{E001}", keys.len());
    keys.push(M::escape_text(trimmed));
    TextEdit::Replace(marker)
}

/// Swap lookup markers in serialized markup for their lookup expressions
fn restore_lookups(serialized: &str, keys: &[String]) -> String {
    LOOKUP_MARKER_REGEX
        .replace_all(serialized, |captures: &regex::Captures| {
            captures[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| keys.get(index))
                .map(|key| wrap_key(key))
                .unwrap_or_else(|| captures[0].to_string())
        })
        .into_owned()
}

/// True when the text has an `@` that is not part of an `@@` pair
fn contains_single_escape(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    chars.iter().enumerate().any(|(index, ch)| {
        *ch == '@'
            && (index == 0 || chars[index - 1] != '@')
            && chars.get(index + 1) != Some(&'@')
    })
}

fn escape_key(key: &str) -> String {
    key.replace('\\', "\\\\").replace('"', "\\\"")
}

fn unescape_key(raw: &str) -> String {
    let mut result = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '\\' {
            if let Some(escaped) = chars.next() {
                result.push(escaped);
                continue;
            }
        }
        result.push(ch);
    }
    result
}

fn unique_in_order(keys: Vec<String>) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    keys.into_iter().filter(|key| seen.insert(key.clone())).collect()
}
