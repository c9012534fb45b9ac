//! Tag and attribute predicates.
//!
//! A [`Query`] is a tag predicate plus at most one attribute predicate. It can
//! be built explicitly, or converted from a tag name or a
//! `(tag, key, value)` tuple so that calls read like
//! `root.find(("div", "class", "first"))`.
//!
//! # Example
//!
//! ```rust
//! use ladle_core::{Query, TagMatch};
//!
//! let by_tag: Query = "a".into();
//! let by_class = Query::tag("div").attr("class", "first");
//! let any_with_id = Query::any().attr("id", "4");
//!
//! assert_eq!(by_tag.tag_match(), &TagMatch::Named("a"));
//! assert_eq!(by_class.attribute(), Some(("class", "first")));
//! assert_eq!(any_with_id.tag_match(), &TagMatch::Any);
//! ```

use scraper::node::Element;

use crate::{LadleError, Result};

/// Which element names a query accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagMatch<'q> {
    /// Every element.
    Any,
    /// Elements with exactly this tag name.
    Named(&'q str),
}

/// How an attribute value is compared against the query's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// The attribute value equals the query value, or the query value is one
    /// of its whitespace-separated tokens (class-list semantics).
    #[default]
    Loose,
    /// The attribute value equals the query value exactly.
    Strict,
}

/// A tag predicate with an optional attribute predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Query<'q> {
    tag: TagMatch<'q>,
    attribute: Option<(&'q str, &'q str)>,
}

impl<'q> Query<'q> {
    /// Matches elements named `name`.
    pub fn tag(name: &'q str) -> Self {
        Self { tag: TagMatch::Named(name), attribute: None }
    }

    /// Matches every element.
    pub fn any() -> Self {
        Self { tag: TagMatch::Any, attribute: None }
    }

    /// Adds an attribute predicate, replacing any previous one.
    pub fn attr(mut self, key: &'q str, value: &'q str) -> Self {
        self.attribute = Some((key, value));
        self
    }

    /// Builds a query from the variadic string convention: `[tag]` or
    /// `[tag, key, value]`, where an empty tag means any element.
    ///
    /// # Errors
    ///
    /// Returns [`LadleError::InvalidQuery`] for any other argument count.
    pub fn from_args(args: &[&'q str]) -> Result<Self> {
        let tag = |name: &'q str| if name.is_empty() { Query::any() } else { Query::tag(name) };

        match *args {
            [name] => Ok(tag(name)),
            [name, key, value] => Ok(tag(name).attr(key, value)),
            _ => Err(LadleError::InvalidQuery(format!(
                "expected a tag name, optionally followed by an attribute key and value; got {} argument(s)",
                args.len()
            ))),
        }
    }

    pub fn tag_match(&self) -> &TagMatch<'q> {
        &self.tag
    }

    pub fn attribute(&self) -> Option<(&'q str, &'q str)> {
        self.attribute
    }

    /// Tests an element against this query.
    pub fn matches(&self, element: &Element, mode: MatchMode) -> bool {
        let tag_ok = match self.tag {
            TagMatch::Any => true,
            TagMatch::Named(name) => element.name() == name,
        };
        if !tag_ok {
            return false;
        }

        match self.attribute {
            None => true,
            Some((key, value)) => element
                .attrs()
                .any(|(k, v)| k == key && attribute_value_matches(v, value, mode)),
        }
    }

    /// Tag name as reported in not-found errors; empty for [`TagMatch::Any`].
    pub(crate) fn describe_tag(&self) -> String {
        match self.tag {
            TagMatch::Any => String::new(),
            TagMatch::Named(name) => name.to_string(),
        }
    }

    /// Attribute predicate as reported in not-found errors.
    pub(crate) fn describe_attribute(&self) -> String {
        match self.attribute {
            Some((key, value)) => format!("{} {}", key, value),
            None => String::new(),
        }
    }
}

impl<'q> From<&'q str> for Query<'q> {
    fn from(name: &'q str) -> Self {
        Query::tag(name)
    }
}

impl<'q> From<(&'q str, &'q str, &'q str)> for Query<'q> {
    fn from((name, key, value): (&'q str, &'q str, &'q str)) -> Self {
        Query::tag(name).attr(key, value)
    }
}

impl<'q> From<TagMatch<'q>> for Query<'q> {
    fn from(tag: TagMatch<'q>) -> Self {
        Self { tag, attribute: None }
    }
}

fn attribute_value_matches(actual: &str, wanted: &str, mode: MatchMode) -> bool {
    match mode {
        MatchMode::Strict => actual == wanted,
        MatchMode::Loose => actual == wanted || actual.split_whitespace().any(|token| token == wanted),
    }
}
