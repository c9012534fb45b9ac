//! HTML parsing and the document the queries run against.
//!
//! This module provides the [`Document`] type, which owns the tree produced by
//! scraper's HTML5 parser and hands out [`Root`] handles onto it.
//!
//! # Example
//!
//! ```rust
//! use ladle_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <h1>Title</h1>
//!             <p class="content lead">Paragraph</p>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html).unwrap();
//! let lead = doc.root().find(("p", "class", "lead"));
//! assert_eq!(lead.text().unwrap(), "Paragraph");
//! ```

use ego_tree::NodeId;
use scraper::Html;
use tracing::debug;

use crate::node::{NodeKind, effective_root, node_value};
use crate::root::Root;
use crate::{LadleConfig, LadleError, Result};

/// A parsed HTML document.
///
/// Handles returned by [`Document::root`] borrow the document, so the tree
/// cannot change underneath them; [`Document::extract`] needs the document
/// mutably and takes a [`NodeId`] obtained from a handle beforehand.
///
/// # Example
///
/// ```rust
/// use ladle_core::parse::Document;
///
/// let mut doc = Document::parse("<ul><li>keep</li><li class=\"ad\">drop</li></ul>").unwrap();
/// let ad = doc.root().find(("li", "class", "ad")).node_id().unwrap();
///
/// doc.extract(ad).unwrap();
/// assert_eq!(doc.root().find_all("li").unwrap().len(), 1);
/// assert_eq!(doc.node(ad).unwrap().text().unwrap(), "drop");
/// ```
pub struct Document {
    html: Html,
    root: NodeId,
    fail_fast: bool,
}

impl Document {
    /// Parses HTML from a string with the default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`LadleError::UnableToParse`] if the parsed tree holds no
    /// element at all.
    pub fn parse(html: &str) -> Result<Self> {
        Self::parse_with_config(html, &LadleConfig::default())
    }

    /// Parses HTML from a string; handles inherit `config.fail_fast`.
    pub fn parse_with_config(html: &str, config: &LadleConfig) -> Result<Self> {
        let parsed = Html::parse_document(html);
        let root = effective_root(parsed.tree.root())
            .map(|node| node.id())
            .ok_or_else(|| LadleError::UnableToParse("document contains no element".to_string()))?;

        debug!(bytes = html.len(), parse_errors = parsed.errors.len(), "parsed document");

        Ok(Self { html: parsed, root, fail_fast: config.fail_fast })
    }

    /// Returns a reference to the underlying `scraper::Html` instance.
    pub fn html(&self) -> &Html {
        &self.html
    }

    /// Gets the entire HTML as a string.
    pub fn as_string(&self) -> String {
        self.html.html()
    }

    /// Handle on the effective root: the first element below the document,
    /// doctype and comment wrappers (normally `<html>`).
    pub fn root(&self) -> Root<'_> {
        self.html
            .tree
            .get(self.root)
            .map(|node| Root::new(node, self.fail_fast))
            .unwrap_or_else(|| Root::errored(LadleError::UnknownNode, self.fail_fast))
    }

    /// Handle on any node of this document by id, including nodes detached by
    /// [`Document::extract`].
    ///
    /// # Errors
    ///
    /// Returns [`LadleError::UnknownNode`] if the id is out of range for this
    /// document.
    pub fn node(&self, id: NodeId) -> Result<Root<'_>> {
        self.html
            .tree
            .get(id)
            .map(|node| Root::new(node, self.fail_fast))
            .ok_or(LadleError::UnknownNode)
    }

    /// Detaches a node from its parent. The node and its subtree stay readable
    /// through [`Document::node`] but no query from the root reaches them again.
    /// Detaching a node that has no parent does nothing.
    pub fn extract(&mut self, id: NodeId) -> Result<()> {
        let node = self.html.tree.get(id).ok_or(LadleError::UnknownNode)?;
        if node.parent().is_none() {
            return Ok(());
        }

        debug!(kind = ?NodeKind::of(node.value()), value = node_value(node), "detaching node");
        if let Some(mut node) = self.html.tree.get_mut(id) {
            node.detach();
        }
        Ok(())
    }

    /// Gets the title of the document.
    ///
    /// Returns the direct text of the first `<title>` element, if present.
    pub fn title(&self) -> Option<String> {
        let title = self.root().find("title");
        title.text().ok().map(|text| text.trim().to_string())
    }

    /// Tag name of the effective root.
    pub fn root_tag(&self) -> &str {
        self.html.tree.get(self.root).map(node_value).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ErrorKind;

    const SAMPLE_HTML: &str = r#"
        <!DOCTYPE html>
        <!-- generated -->
        <html lang="en">
        <head>
            <meta charset="UTF-8">
            <title>Test Page</title>
        </head>
        <body>
            <h1>Heading</h1>
            <p class="content">Paragraph 1</p>
            <p class="content">Paragraph 2</p>
            <a href="https://example.com">Link</a>
        </body>
        </html>
    "#;

    #[test]
    fn test_parse_document() {
        let doc = Document::parse(SAMPLE_HTML).unwrap();
        assert_eq!(doc.root_tag(), "html");
        assert_eq!(doc.root().attrs().unwrap()["lang"], "en");
        assert_eq!(doc.title(), Some("Test Page".to_string()));
    }

    #[test]
    fn test_parse_empty_string_still_has_root() {
        let doc = Document::parse("").unwrap();
        assert_eq!(doc.root_tag(), "html");
        assert!(doc.root().find("body").is_ok());
    }

    #[test]
    fn test_extract_detaches_subtree() {
        let mut doc = Document::parse(SAMPLE_HTML).unwrap();
        let first = doc.root().find(("p", "class", "content")).node_id().unwrap();

        doc.extract(first).unwrap();

        let remaining = doc.root().find_all(("p", "class", "content")).unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].text().unwrap(), "Paragraph 2");

        let detached = doc.node(first).unwrap();
        assert_eq!(detached.text().unwrap(), "Paragraph 1");
        assert_eq!(detached.html().unwrap(), r#"<p class="content">Paragraph 1</p>"#);
        assert_eq!(
            detached.find_next_sibling().error().map(LadleError::kind),
            Some(ErrorKind::NoNextSibling)
        );
    }

    #[test]
    fn test_extract_twice_is_noop() {
        let mut doc = Document::parse(SAMPLE_HTML).unwrap();
        let link = doc.root().find("a").node_id().unwrap();

        doc.extract(link).unwrap();
        doc.extract(link).unwrap();
        assert!(doc.root().find("a").error().is_some());
    }

    #[test]
    fn test_as_string_reflects_extract() {
        let mut doc = Document::parse(SAMPLE_HTML).unwrap();
        let h1 = doc.root().find("h1").node_id().unwrap();
        doc.extract(h1).unwrap();

        let html = doc.as_string();
        assert!(!html.contains("<h1>"));
        assert!(html.contains("Paragraph 2"));
    }

    #[test]
    fn test_unknown_node() {
        let big = Document::parse(SAMPLE_HTML).unwrap();
        let last = big.root().find("a").find_next_sibling().node_id().unwrap();

        let mut small = Document::parse("<p>x</p>").unwrap();
        assert_eq!(small.node(last).unwrap_err(), LadleError::UnknownNode);
        assert_eq!(small.extract(last), Err(LadleError::UnknownNode));
    }
}
