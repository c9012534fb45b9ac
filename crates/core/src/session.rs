//! Session entry point.
//!
//! A [`Ladle`] holds one [`LadleConfig`] and applies it to every document it
//! parses or fetches. The free functions [`parse`] and [`fetch_and_parse`]
//! use the default configuration.
//!
//! # Example
//!
//! ```rust
//! use ladle_core::{Ladle, LadleConfig};
//!
//! let ladle = Ladle::with_config(LadleConfig::builder().fail_fast(false).build());
//! let doc = ladle.parse("<div id=\"ctitle\">Python</div>").unwrap();
//! assert_eq!(doc.root().find(("div", "id", "ctitle")).text().unwrap(), "Python");
//! ```

#[cfg(feature = "fetch")]
use crate::fetch::fetch_url;
use crate::parse::Document;
use crate::{LadleConfig, Result};

/// Parses and fetches documents with a shared configuration.
#[derive(Debug, Clone, Default)]
pub struct Ladle {
    config: LadleConfig,
}

impl Ladle {
    /// Creates a session with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session with a custom configuration.
    pub fn with_config(config: LadleConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &LadleConfig {
        &self.config
    }

    /// Parses an HTML string.
    pub fn parse(&self, html: &str) -> Result<Document> {
        Document::parse_with_config(html, &self.config)
    }

    /// Fetches a URL with the session's headers and cookies, then parses it.
    #[cfg(feature = "fetch")]
    pub async fn fetch_and_parse(&self, url: &str) -> Result<Document> {
        let html = fetch_url(url, &self.config.fetch).await?;
        self.parse(&html)
    }
}

/// Parses an HTML string with the default configuration.
pub fn parse(html: &str) -> Result<Document> {
    Ladle::new().parse(html)
}

/// Fetches and parses a URL with the default configuration.
#[cfg(feature = "fetch")]
pub async fn fetch_and_parse(url: &str) -> Result<Document> {
    Ladle::new().fetch_and_parse(url).await
}
