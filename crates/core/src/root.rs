//! Chainable, error-carrying handles onto nodes of a [`Document`](crate::Document).
//!
//! A [`Root`] either points at a live node or carries the [`LadleError`] that
//! prevented it from doing so. Every method on an errored handle passes that
//! error along instead of touching the tree, so long chains can be written
//! without checking each step:
//!
//! ```rust
//! use ladle_core::{Document, ErrorKind};
//!
//! let doc = Document::parse(r#"<div id="comic"><img src="a.png" title="A"></div>"#).unwrap();
//!
//! let img = doc.root().find(("div", "id", "comic")).find("img");
//! assert_eq!(img.attrs().unwrap()["src"], "a.png");
//!
//! let missing = doc.root().find(("div", "id", "ctitle")).find("img");
//! assert_eq!(missing.error().map(|e| e.kind()), Some(ErrorKind::ElementNotFound));
//! ```
//!
//! With [`LadleConfig::fail_fast`](crate::LadleConfig) set, the same failures
//! panic at the point of detection instead.

use std::collections::HashMap;

use ego_tree::NodeId;
use tracing::debug;

use crate::node::{HtmlNode, NodeKind, node_value};
use crate::query::{MatchMode, Query};
use crate::traverse;
use crate::{LadleError, Result};

/// A handle onto one node of a parsed document, or the error that produced it.
#[derive(Debug, Clone)]
pub struct Root<'a> {
    node: std::result::Result<HtmlNode<'a>, LadleError>,
    fail_fast: bool,
}

impl<'a> Root<'a> {
    pub(crate) fn new(node: HtmlNode<'a>, fail_fast: bool) -> Self {
        Self { node: Ok(node), fail_fast }
    }

    pub(crate) fn errored(err: LadleError, fail_fast: bool) -> Self {
        Self { node: Err(err), fail_fast }
    }

    fn derive(&self, node: HtmlNode<'a>) -> Self {
        Self::new(node, self.fail_fast)
    }

    /// Builds an errored handle, or panics under fail-fast.
    fn failed(&self, err: LadleError) -> Self {
        Self { node: Err(self.raise(err)), fail_fast: self.fail_fast }
    }

    fn raise(&self, err: LadleError) -> LadleError {
        if self.fail_fast {
            panic!("{}", err);
        }
        debug!(kind = ?err.kind(), "{}", err);
        err
    }

    /// The wrapped node, or a copy of the stored error.
    pub fn node(&self) -> Result<HtmlNode<'a>> {
        self.node.clone()
    }

    /// The stored error of an errored handle.
    pub fn error(&self) -> Option<&LadleError> {
        self.node.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.node.is_ok()
    }

    /// Converts the handle into a plain `Result`, for use with `?`.
    pub fn into_result(self) -> Result<Self> {
        match self.node {
            Ok(_) => Ok(self),
            Err(err) => Err(err),
        }
    }

    /// Id of the wrapped node, as accepted by
    /// [`Document::extract`](crate::Document::extract) and
    /// [`Document::node`](crate::Document::node).
    pub fn node_id(&self) -> Result<NodeId> {
        self.node().map(|n| n.id())
    }

    pub fn kind(&self) -> Result<NodeKind> {
        self.node().map(|n| NodeKind::of(n.value()))
    }

    /// Tag name of an element, or the data of a text or comment node.
    pub fn node_value(&self) -> Result<&'a str> {
        self.node().map(node_value)
    }

    /// Finds the first descendant matching `query`, comparing attribute values
    /// token by token (or as the whole value).
    pub fn find<'q>(&self, query: impl Into<Query<'q>>) -> Self {
        self.find_with(query.into(), MatchMode::Loose)
    }

    /// Finds the first descendant matching `query`, requiring attribute values
    /// to be equal as whole strings.
    pub fn find_strict<'q>(&self, query: impl Into<Query<'q>>) -> Self {
        self.find_with(query.into(), MatchMode::Strict)
    }

    fn find_with(&self, query: Query<'_>, mode: MatchMode) -> Self {
        let node = match &self.node {
            Ok(node) => *node,
            Err(_) => return self.clone(),
        };

        match traverse::find_first(node, &query, mode) {
            Some(found) => self.derive(found),
            None => self.failed(LadleError::ElementNotFound {
                tag: query.describe_tag(),
                attributes: query.describe_attribute(),
            }),
        }
    }

    /// Finds every descendant matching `query` in document order.
    ///
    /// No match is an empty vector; the only error is the one already stored
    /// in an errored handle.
    pub fn find_all<'q>(&self, query: impl Into<Query<'q>>) -> Result<Vec<Self>> {
        self.find_all_with(query.into(), MatchMode::Loose)
    }

    /// Strict-matching variant of [`Root::find_all`].
    pub fn find_all_strict<'q>(&self, query: impl Into<Query<'q>>) -> Result<Vec<Self>> {
        self.find_all_with(query.into(), MatchMode::Strict)
    }

    fn find_all_with(&self, query: Query<'_>, mode: MatchMode) -> Result<Vec<Self>> {
        let node = self.node()?;
        Ok(traverse::find_all(node, &query, mode)
            .into_iter()
            .map(|found| self.derive(found))
            .collect())
    }

    /// The immediately following sibling, whatever its kind.
    pub fn find_next_sibling(&self) -> Self {
        self.step(|n| n.next_sibling(), LadleError::NoNextSibling)
    }

    /// The immediately preceding sibling, whatever its kind.
    pub fn find_prev_sibling(&self) -> Self {
        self.step(|n| n.prev_sibling(), LadleError::NoPreviousSibling)
    }

    /// The next sibling that is an element, skipping text and comments.
    pub fn find_next_element_sibling(&self) -> Self {
        self.step(
            |n| n.next_siblings().find(|s| s.value().is_element()),
            LadleError::NoNextElementSibling,
        )
    }

    /// The previous sibling that is an element, skipping text and comments.
    pub fn find_prev_element_sibling(&self) -> Self {
        self.step(
            |n| n.prev_siblings().find(|s| s.value().is_element()),
            LadleError::NoPreviousElementSibling,
        )
    }

    fn step(&self, next: impl FnOnce(HtmlNode<'a>) -> Option<HtmlNode<'a>>, missing: LadleError) -> Self {
        match &self.node {
            Ok(node) => match next(*node) {
                Some(found) => self.derive(found),
                None => self.failed(missing),
            },
            Err(_) => self.clone(),
        }
    }

    /// Direct children of any kind, in order.
    pub fn children(&self) -> Result<Vec<Self>> {
        let node = self.node()?;
        Ok(node.children().map(|child| self.derive(child)).collect())
    }

    /// Attribute map of an element; the first occurrence of a repeated key wins.
    pub fn attrs(&self) -> Result<HashMap<&'a str, &'a str>> {
        let node = self.node()?;
        traverse::attribute_map(node).ok_or_else(|| {
            self.raise(LadleError::NotAnElement(format!("{:?} node", NodeKind::of(node.value()))))
        })
    }

    /// Text of the first direct text child that is not whitespace-only.
    /// Nested elements are not looked into; see [`Root::full_text`].
    pub fn text(&self) -> Result<&'a str> {
        let node = self.node()?;
        traverse::direct_text(node).ok_or_else(|| self.raise(LadleError::NoTextNode))
    }

    /// All text below this node, nested elements included, in document order.
    pub fn full_text(&self) -> Result<String> {
        self.node().map(traverse::full_text)
    }

    /// This node and its subtree serialized as HTML.
    pub fn html(&self) -> Result<String> {
        self.node().map(traverse::outer_html)
    }
}

impl PartialEq for Root<'_> {
    /// Handles are equal when they point at the same node of the same tree.
    fn eq(&self, other: &Self) -> bool {
        match (&self.node, &other.node) {
            (Ok(a), Ok(b)) => a == b,
            (Err(a), Err(b)) => a == b,
            _ => false,
        }
    }
}
