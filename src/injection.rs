/*!
 * Navigation label injection.
 *
 * Controllers declare their navigation bar entries through `[RenderInNavBar]`
 * properties, which no view ever spells out. Their labels are copied into
 * the body of an injector method as `localizer["..."]` lookups so the key
 * extraction of C# sources sees them and their stores get seeded.
 */

use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;

use crate::errors::InjectionError;
use crate::extract::escape_csharp_literal;

/// Method whose body holds the injected lookups
pub const INJECTOR_METHOD: &str = "_useless_for_localizer";

const INDENT: &str = "    ";

static INJECTOR_SIGNATURE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b_useless_for_localizer\s*\(\s*\)").unwrap()
});

/// True for sources under a `Controllers` folder or named `*Controller.cs`
pub fn is_controller_source(path: &Path) -> bool {
    let named_controller = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().ends_with("Controller"))
        .unwrap_or(false);

    named_controller
        || path
            .components()
            .any(|component| component.as_os_str() == "Controllers")
}

/// True when the source declares the injector method
pub fn declares_injector(content: &str) -> bool {
    INJECTOR_SIGNATURE_REGEX.is_match(content)
}

/// Replace the injector method body with one lookup statement per key
///
/// Everything outside the body is kept byte for byte. The body is indented
/// one level below its opening brace and uses the file's line endings.
pub fn rewrite_injector_body(content: &str, keys: &[String], file: &str) -> Result<String, InjectionError> {
    let signature = INJECTOR_SIGNATURE_REGEX
        .find(content)
        .ok_or_else(|| InjectionError::MethodNotFound {
            method: INJECTOR_METHOD.to_string(),
            location: file.to_string(),
        })?;

    let malformed = || InjectionError::MalformedBody {
        method: INJECTOR_METHOD.to_string(),
        file: file.to_string(),
    };

    let after_signature = &content[signature.end()..];
    let offset = after_signature.len() - after_signature.trim_start().len();
    let open = signature.end() + offset;
    if !content[open..].starts_with('{') {
        return Err(malformed());
    }
    let close = matching_brace(content, open).ok_or_else(malformed)?;

    let newline = if content.contains("\r\n") { "\r\n" } else { "\n" };
    let brace_indent = line_indent(content, open);

    let mut body = String::from(newline);
    for key in keys {
        body.push_str(brace_indent);
        body.push_str(INDENT);
        body.push_str(&format!("_ = localizer[\"{}\"];", escape_csharp_literal(key)));
        body.push_str(newline);
    }
    body.push_str(brace_indent);

    Ok(format!("{}{}{}", &content[..=open], body, &content[close..]))
}

/// Leading whitespace of the line holding `index`
fn line_indent(content: &str, index: usize) -> &str {
    let start = content[..index].rfind('\n').map(|newline| newline + 1).unwrap_or(0);
    let line = &content[start..index];
    &line[..line.len() - line.trim_start().len()]
}

/// Byte index of the brace closing the one at `open`
///
/// Braces inside string literals, character literals and comments are
/// ignored.
fn matching_brace(content: &str, open: usize) -> Option<usize> {
    let bytes = content.as_bytes();
    let mut depth = 0usize;
    let mut index = open;

    while index < bytes.len() {
        match bytes[index] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            b'"' => {
                let verbatim = index > 0 && bytes[index - 1] == b'@';
                index = skip_string(bytes, index + 1, verbatim)?;
            }
            b'\'' => index = skip_char_literal(bytes, index + 1)?,
            b'/' if bytes.get(index + 1) == Some(&b'/') => {
                index = bytes[index..]
                    .iter()
                    .position(|byte| *byte == b'\n')
                    .map(|newline| index + newline)?;
            }
            b'/' if bytes.get(index + 1) == Some(&b'*') => {
                index = content[index + 2..]
                    .find("*/")
                    .map(|end| index + 2 + end + 1)?;
            }
            _ => {}
        }
        index += 1;
    }

    None
}

/// Index of the closing quote of a string literal starting at `index`
fn skip_string(bytes: &[u8], mut index: usize, verbatim: bool) -> Option<usize> {
    while index < bytes.len() {
        match bytes[index] {
            b'\\' if !verbatim => index += 1,
            b'"' if verbatim && bytes.get(index + 1) == Some(&b'"') => index += 1,
            b'"' => return Some(index),
            _ => {}
        }
        index += 1;
    }
    None
}

fn skip_char_literal(bytes: &[u8], mut index: usize) -> Option<usize> {
    while index < bytes.len() {
        match bytes[index] {
            b'\\' => index += 1,
            b'\'' => return Some(index),
            _ => {}
        }
        index += 1;
    }
    None
}
