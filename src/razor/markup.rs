/*!
 * Markup fragment capability.
 *
 * The localizer only needs four things from an HTML library: parse a
 * fragment, visit its text nodes, replace or remove them, and serialize the
 * result. `MarkupFragment` names that surface; `HtmlFragment` implements it
 * on top of html5ever through kuchiki's mutable node tree.
 */

use html5ever::{LocalName, Namespace, QualName};
use kuchiki::NodeRef;
use kuchiki::traits::*;

const HTML_NAMESPACE: &str = "http://www.w3.org/1999/xhtml";

/// Elements whose text content is not prose
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// What to do with a visited text node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Leave the node as it is
    Keep,
    /// Replace the node with a new text node holding this content
    Replace(String),
    /// Detach the node from the tree
    Remove,
}

/// A detached markup tree that can be edited text node by text node
pub trait MarkupFragment: Sized {
    /// Parse markup as the children of a neutral container element
    fn parse_fragment(markup: &str) -> Self;

    /// Visit every text node depth-first in document order
    fn edit_text_nodes<F>(&mut self, edit: F)
    where
        F: FnMut(&str) -> TextEdit;

    /// Serialize the fragment's top-level nodes back to markup
    fn serialize(&self) -> String;

    /// How a text node's content reads once serialized
    fn escape_text(text: &str) -> String {
        text.to_string()
    }
}

/// html5ever-backed fragment
pub struct HtmlFragment {
    container: NodeRef,
}

impl MarkupFragment for HtmlFragment {
    fn parse_fragment(markup: &str) -> Self {
        let context = QualName::new(
            None,
            Namespace::from(HTML_NAMESPACE),
            LocalName::from("div"),
        );
        let document = kuchiki::parse_fragment(context, Vec::new()).one(markup);

        // html5ever roots the fragment's nodes under a synthetic <html> element
        let container = document.first_child().unwrap_or(document);
        Self { container }
    }

    fn edit_text_nodes<F>(&mut self, mut edit: F)
    where
        F: FnMut(&str) -> TextEdit,
    {
        edit_children(&self.container, &mut edit);
    }

    fn serialize(&self) -> String {
        self.container
            .children()
            .map(|child| child.to_string())
            .collect()
    }

    /// Mirrors html5ever's text escaping
    fn escape_text(text: &str) -> String {
        let mut escaped = String::with_capacity(text.len());
        for ch in text.chars() {
            match ch {
                '&' => escaped.push_str("&amp;"),
                '\u{a0}' => escaped.push_str("&nbsp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                _ => escaped.push(ch),
            }
        }
        escaped
    }
}

fn edit_children<F>(node: &NodeRef, edit: &mut F)
where
    F: FnMut(&str) -> TextEdit,
{
    // Snapshot first: edits detach and insert siblings
    let children: Vec<NodeRef> = node.children().collect();

    for child in children {
        let current = child.as_text().map(|text| text.borrow().clone());

        match current {
            Some(text) => match edit(&text) {
                TextEdit::Keep => {}
                TextEdit::Replace(replacement) => {
                    child.insert_before(NodeRef::new_text(replacement));
                    child.detach();
                }
                TextEdit::Remove => child.detach(),
            },
            None if is_raw_text_element(&child) => {}
            None => edit_children(&child, edit),
        }
    }
}

fn is_raw_text_element(node: &NodeRef) -> bool {
    node.as_element()
        .map(|element| RAW_TEXT_ELEMENTS.contains(&&*element.name.local))
        .unwrap_or(false)
}
