//! Session configuration.
//!
//! Everything that would otherwise be process-wide state (the fail-fast
//! posture, default request headers and cookies) lives in a [`LadleConfig`]
//! value owned by whoever parses or fetches, so two sessions in one process
//! never see each other's settings.
//!
//! # Example
//!
//! ```rust
//! use ladle_core::LadleConfig;
//!
//! let config = LadleConfig::builder()
//!     .fail_fast(false)
//!     .header("Accept-Language", "ko-KR")
//!     .cookie("session", "abc123")
//!     .timeout(10)
//!     .build();
//!
//! assert_eq!(config.fetch.headers["Accept-Language"], "ko-KR");
//! ```

use std::collections::BTreeMap;

/// Default User-Agent sent with every request.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; ladle/0.1)";

/// HTTP settings for the fetch collaborator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent header value.
    pub user_agent: String,
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,
    /// Cookies sent with every request as a single `Cookie` header.
    pub cookies: BTreeMap<String, String>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            headers: BTreeMap::new(),
            cookies: BTreeMap::new(),
        }
    }
}

impl FetchConfig {
    /// Renders the cookie map as a `Cookie` header value, or `None` when empty.
    pub fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{}={}", name, value))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// Configuration for a parsing/query session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LadleConfig {
    /// Panic on the first failed lookup instead of returning an errored
    /// handle (default: false).
    pub fail_fast: bool,

    /// Settings used when fetching documents.
    pub fetch: FetchConfig,
}

impl LadleConfig {
    /// Creates a new builder for LadleConfig.
    pub fn builder() -> LadleConfigBuilder {
        LadleConfigBuilder::new()
    }
}

/// Builder for LadleConfig.
///
/// Provides a fluent API for configuring a [`Ladle`](crate::Ladle) session.
pub struct LadleConfigBuilder {
    config: LadleConfig,
}

impl LadleConfigBuilder {
    /// Creates a new builder with default values.
    pub fn new() -> Self {
        Self { config: LadleConfig::default() }
    }

    /// Sets whether failed lookups panic.
    pub fn fail_fast(mut self, value: bool) -> Self {
        self.config.fail_fast = value;
        self
    }

    /// Sets the request timeout in seconds.
    pub fn timeout(mut self, secs: u64) -> Self {
        self.config.fetch.timeout = secs;
        self
    }

    /// Sets the User-Agent.
    pub fn user_agent(mut self, value: impl Into<String>) -> Self {
        self.config.fetch.user_agent = value.into();
        self
    }

    /// Adds a request header, replacing an earlier value for the same name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.fetch.headers.insert(name.into(), value.into());
        self
    }

    /// Adds a cookie, replacing an earlier value for the same name.
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.fetch.cookies.insert(name.into(), value.into());
        self
    }

    /// Builds the config.
    pub fn build(self) -> LadleConfig {
        self.config
    }
}

impl Default for LadleConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LadleConfig::default();
        assert!(!config.fail_fast);
        assert_eq!(config.fetch.timeout, 30);
        assert!(config.fetch.user_agent.contains("ladle"));
        assert!(config.fetch.headers.is_empty());
    }

    #[test]
    fn test_builder_overrides() {
        let config = LadleConfig::builder()
            .fail_fast(true)
            .timeout(5)
            .user_agent("test-agent")
            .header("X-One", "1")
            .header("X-One", "2")
            .build();

        assert!(config.fail_fast);
        assert_eq!(config.fetch.timeout, 5);
        assert_eq!(config.fetch.user_agent, "test-agent");
        assert_eq!(config.fetch.headers.len(), 1);
        assert_eq!(config.fetch.headers["X-One"], "2");
    }

    #[test]
    fn test_cookie_header() {
        assert_eq!(FetchConfig::default().cookie_header(), None);

        let config = LadleConfig::builder().cookie("b", "2").cookie("a", "1").build();
        assert_eq!(config.fetch.cookie_header().as_deref(), Some("a=1; b=2"));
    }
}
