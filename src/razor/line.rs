/*!
 * Line classification for Razor views.
 *
 * Every line of a view is either Razor script or HTML markup. Multi-line
 * `@{ ... }` blocks are tracked through their brace balance so that every
 * line inside an open block is classified as script.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Razor expressions that produce markup and must reach the HTML parser whole
const MARKUP_PASS_THROUGH_KEYWORDS: &[&str] = &[
    "@Localizer",
    "@Html",
    "@foreach",
    "@if",
    "@for",
    "@while",
    "@switch",
    "@await RenderSection",
    "@RenderLayout",
];

/// Opening tag written inline on a line
static INLINE_TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<\s*[a-z][^>]*>").unwrap()
});

/// Classification of a single view line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    /// Razor code, passed through untouched
    Script,
    /// HTML markup, eligible for localization
    Markup,
}

/// A classified line of a view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// The line as it appears in the view, without its `\n` terminator
    ///
    /// A carriage return before the terminator is kept.
    pub raw: String,
    /// Classification of the line
    pub kind: LineKind,
}

impl Line {
    pub fn new(raw: impl Into<String>, kind: LineKind) -> Self {
        Self { raw: raw.into(), kind }
    }

    /// The line without a trailing carriage return
    pub fn text(&self) -> &str {
        self.raw.strip_suffix('\r').unwrap_or(&self.raw)
    }

    pub fn ends_with_crlf(&self) -> bool {
        self.raw.ends_with('\r')
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.raw)
    }
}

/// Classify every line of a view
///
/// Lines are split on `\n` only, so CRLF views keep their `\r`.
pub fn classify_lines(content: &str) -> Vec<Line> {
    let mut lines = Vec::new();
    let mut script_depth: usize = 0;

    for piece in content.split_inclusive('\n') {
        let raw = piece.strip_suffix('\n').unwrap_or(piece);
        let trimmed = raw.trim_start();
        let kind = classify(trimmed, script_depth);

        if kind == LineKind::Script {
            script_depth = apply_brace_delta(script_depth, trimmed);
        }

        lines.push(Line::new(raw, kind));
    }

    lines
}

fn classify(trimmed: &str, script_depth: usize) -> LineKind {
    if script_depth > 0 {
        return LineKind::Script;
    }

    if MARKUP_PASS_THROUGH_KEYWORDS
        .iter()
        .any(|keyword| trimmed.starts_with(keyword))
    {
        return LineKind::Markup;
    }

    if trimmed.starts_with("@{") {
        return LineKind::Script;
    }

    if is_single_escape(trimmed) && !INLINE_TAG_REGEX.is_match(trimmed) {
        return LineKind::Script;
    }

    LineKind::Markup
}

/// `@` that is not the `@@` escape of a literal at-sign
fn is_single_escape(trimmed: &str) -> bool {
    trimmed.starts_with('@') && !trimmed.starts_with("@@")
}

/// New depth after a script line, never below zero
fn apply_brace_delta(depth: usize, trimmed: &str) -> usize {
    let opens = trimmed.matches('{').count();
    let closes = trimmed.matches('}').count();
    (depth + opens).saturating_sub(closes)
}
