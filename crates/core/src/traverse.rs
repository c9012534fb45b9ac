//! Depth-first search and node projections.
//!
//! Searches walk the descendants of a start node in document (pre-)order using
//! ego-tree's edge iterator, so nesting depth never grows the call stack. The
//! start node is never a candidate: a query only matches what lies below the
//! node it was invoked on.

use std::collections::HashMap;

use scraper::{ElementRef, Node};

use crate::node::{HtmlNode, is_blank_text};
use crate::query::{MatchMode, Query};

fn is_match(node: HtmlNode<'_>, query: &Query<'_>, mode: MatchMode) -> bool {
    match node.value() {
        Node::Element(element) => query.matches(element, mode),
        _ => false,
    }
}

/// Returns the first descendant of `start` matching `query`.
pub fn find_first<'a>(start: HtmlNode<'a>, query: &Query<'_>, mode: MatchMode) -> Option<HtmlNode<'a>> {
    start.descendants().skip(1).find(|node| is_match(*node, query, mode))
}

/// Returns every descendant of `start` matching `query`, in document order.
pub fn find_all<'a>(start: HtmlNode<'a>, query: &Query<'_>, mode: MatchMode) -> Vec<HtmlNode<'a>> {
    start
        .descendants()
        .skip(1)
        .filter(|node| is_match(*node, query, mode))
        .collect()
}

/// Projects an element's attributes into a map. When a key repeats, the first
/// occurrence wins. Non-elements yield `None`.
pub fn attribute_map<'a>(node: HtmlNode<'a>) -> Option<HashMap<&'a str, &'a str>> {
    let Node::Element(element) = node.value() else {
        return None;
    };

    let mut attrs = HashMap::new();
    for (key, value) in element.attrs() {
        attrs.entry(key).or_insert(value);
    }
    Some(attrs)
}

/// Returns the first direct text child that is not whitespace-only.
///
/// Text inside child elements is never considered.
pub fn direct_text<'a>(node: HtmlNode<'a>) -> Option<&'a str> {
    node.children().find_map(|child| match child.value() {
        Node::Text(text) if !is_blank_text(child) => Some(&**text),
        _ => None,
    })
}

/// Concatenates every text node below `node` in document order, whitespace
/// included.
pub fn full_text(node: HtmlNode<'_>) -> String {
    node.descendants()
        .skip(1)
        .filter_map(|n| match n.value() {
            Node::Text(text) => Some(&**text),
            _ => None,
        })
        .collect()
}

/// Serializes `node` and its subtree back to markup.
pub fn outer_html(node: HtmlNode<'_>) -> String {
    match node.value() {
        Node::Element(_) => ElementRef::wrap(node).map(|element| element.html()).unwrap_or_default(),
        Node::Text(text) => {
            if parent_is_raw_text(node) {
                text.to_string()
            } else {
                escape_text(text)
            }
        }
        Node::Comment(comment) => format!("<!--{}-->", &**comment),
        Node::Doctype(doctype) => format!("<!DOCTYPE {}>", doctype.name()),
        Node::ProcessingInstruction(pi) => format!("<?{} {}>", &*pi.target, &*pi.data),
        Node::Document | Node::Fragment => node.children().map(outer_html).collect(),
    }
}

/// Text under these elements is serialized without escaping.
const RAW_TEXT_PARENTS: &[&str] = &["script", "style", "xmp", "iframe", "noembed", "noframes", "plaintext"];

fn parent_is_raw_text(node: HtmlNode<'_>) -> bool {
    node.parent()
        .and_then(|parent| match parent.value() {
            Node::Element(element) => Some(RAW_TEXT_PARENTS.contains(&element.name())),
            _ => None,
        })
        .unwrap_or(false)
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}
