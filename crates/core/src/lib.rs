//! Find elements, text and attributes in parsed HTML.
//!
//! ```rust
//! use ladle_core::Document;
//!
//! let doc = Document::parse(r#"<ul><li>To a <a href="hello.jsp">JSP page</a> right?</li></ul>"#).unwrap();
//! let li = doc.root().find("ul").find("li");
//!
//! assert_eq!(li.text().unwrap(), "To a ");
//! assert_eq!(li.full_text().unwrap(), "To a JSP page right?");
//! assert_eq!(li.find("a").attrs().unwrap()["href"], "hello.jsp");
//! ```

pub mod config;
pub mod error;
#[cfg(feature = "fetch")]
pub mod fetch;
pub mod node;
pub mod parse;
pub mod query;
pub mod root;
pub mod session;
pub mod traverse;

pub use config::{DEFAULT_USER_AGENT, FetchConfig, LadleConfig, LadleConfigBuilder};
pub use ego_tree::NodeId;
pub use error::{ErrorKind, LadleError, Result};
#[cfg(feature = "fetch")]
pub use fetch::{PostBody, fetch_file, fetch_stdin, fetch_url, post, post_form};
pub use node::{HtmlNode, NodeKind};
pub use parse::Document;
pub use query::{MatchMode, Query, TagMatch};
pub use root::Root;
#[cfg(feature = "fetch")]
pub use session::fetch_and_parse;
pub use session::{Ladle, parse};
