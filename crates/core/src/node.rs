//! Node kinds and payloads of the parsed tree.
//!
//! The tree itself is owned by [`scraper::Html`]; everything here works on
//! borrowed [`ego_tree::NodeRef`] values and never copies nodes.

use ego_tree::NodeRef;
use scraper::Node;
use serde::Serialize;

/// Borrowed reference to a node of a parsed document.
pub type HtmlNode<'a> = NodeRef<'a, Node>;

/// The kind of a node in the parsed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Document,
    Doctype,
    Comment,
    Element,
    Text,
}

impl NodeKind {
    /// Classifies a scraper node.
    ///
    /// Fragments count as documents and processing instructions as comments;
    /// neither carries anything a query can match.
    pub fn of(node: &Node) -> Self {
        match node {
            Node::Document | Node::Fragment => NodeKind::Document,
            Node::Doctype(_) => NodeKind::Doctype,
            Node::Comment(_) | Node::ProcessingInstruction(_) => NodeKind::Comment,
            Node::Element(_) => NodeKind::Element,
            Node::Text(_) => NodeKind::Text,
        }
    }
}

/// Returns the payload of a node: the tag name of an element, the data of a
/// text or comment node, the name of a doctype. Documents have none.
pub fn node_value<'a>(node: HtmlNode<'a>) -> &'a str {
    match node.value() {
        Node::Element(element) => element.name(),
        Node::Text(text) => &**text,
        Node::Comment(comment) => &**comment,
        Node::Doctype(doctype) => doctype.name(),
        Node::ProcessingInstruction(pi) => &*pi.data,
        Node::Document | Node::Fragment => "",
    }
}

/// Returns true for text nodes made only of ASCII whitespace (space, tab,
/// CR, LF, form feed). A non-breaking space is content.
pub fn is_blank_text(node: HtmlNode<'_>) -> bool {
    match node.value() {
        Node::Text(text) => text.chars().all(|c| c.is_ascii_whitespace()),
        _ => false,
    }
}

/// Walks from the parser's output down to the first element, skipping the
/// document wrapper, doctypes, comments and stray text.
pub fn effective_root(node: HtmlNode<'_>) -> Option<HtmlNode<'_>> {
    let mut current = Some(node);
    while let Some(n) = current {
        current = match NodeKind::of(n.value()) {
            NodeKind::Element => return Some(n),
            NodeKind::Document => n.first_child(),
            NodeKind::Doctype | NodeKind::Comment | NodeKind::Text => n.next_sibling(),
        };
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn test_effective_root_skips_wrappers() {
        let html = Html::parse_document("<!DOCTYPE html><!-- banner --><html><body><p>x</p></body></html>");
        let root = effective_root(html.tree.root()).unwrap();

        assert_eq!(NodeKind::of(root.value()), NodeKind::Element);
        assert_eq!(node_value(root), "html");
    }

    #[test]
    fn test_node_kinds() {
        let html = Html::parse_document("<!DOCTYPE html><p>hi<!--note--></p>");
        let kinds: Vec<NodeKind> = html.tree.root().descendants().map(|n| NodeKind::of(n.value())).collect();

        assert_eq!(kinds[0], NodeKind::Document);
        assert_eq!(kinds[1], NodeKind::Doctype);
        assert!(kinds.contains(&NodeKind::Text));
        assert!(kinds.contains(&NodeKind::Comment));
    }

    #[test]
    fn test_node_value_and_blank_text() {
        let html = Html::parse_document("<p>  </p><p>word</p>");
        let texts: Vec<_> = html
            .tree
            .root()
            .descendants()
            .filter(|n| NodeKind::of(n.value()) == NodeKind::Text)
            .collect();

        assert_eq!(texts.len(), 2);
        assert!(is_blank_text(texts[0]));
        assert!(!is_blank_text(texts[1]));
        assert_eq!(node_value(texts[1]), "word");
    }

    #[test]
    fn test_non_breaking_space_is_not_blank() {
        let html = Html::parse_document("<p>\u{a0}</p><p> \t\r\n\x0c</p>");
        let texts: Vec<_> = html
            .tree
            .root()
            .descendants()
            .filter(|n| NodeKind::of(n.value()) == NodeKind::Text)
            .collect();

        assert!(!is_blank_text(texts[0]));
        assert!(is_blank_text(texts[1]));
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&NodeKind::Element).unwrap(), "\"element\"");
    }
}
