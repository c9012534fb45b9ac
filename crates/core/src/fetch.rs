//! Content fetching from URLs, files, and stdin.
//!
//! This is the only module that performs I/O. It produces raw HTML strings for
//! [`Document::parse`](crate::Document::parse) and knows nothing about the
//! tree. Headers and cookies come from a [`FetchConfig`] value instead of
//! process-wide state.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, COOKIE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use tracing::trace;
use url::Url;

use crate::{FetchConfig, LadleError, Result};

/// Body of a POST request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostBody {
    /// Sent as-is.
    Text(String),
    /// Sent as-is.
    Bytes(Vec<u8>),
    /// Encoded as a JSON object.
    Json(HashMap<String, String>),
}

impl PostBody {
    fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            PostBody::Text(text) => Ok(text.into_bytes()),
            PostBody::Bytes(bytes) => Ok(bytes),
            PostBody::Json(map) => {
                serde_json::to_vec(&map).map_err(|e| LadleError::RequestCreationFailed(e.to_string()))
            }
        }
    }
}

impl From<&str> for PostBody {
    fn from(text: &str) -> Self {
        PostBody::Text(text.to_string())
    }
}

impl From<String> for PostBody {
    fn from(text: String) -> Self {
        PostBody::Text(text)
    }
}

impl From<&[u8]> for PostBody {
    fn from(bytes: &[u8]) -> Self {
        PostBody::Bytes(bytes.to_vec())
    }
}

impl From<Vec<u8>> for PostBody {
    fn from(bytes: Vec<u8>) -> Self {
        PostBody::Bytes(bytes)
    }
}

impl From<HashMap<String, String>> for PostBody {
    fn from(map: HashMap<String, String>) -> Self {
        PostBody::Json(map)
    }
}

fn parse_url(url: &str) -> Result<Url> {
    let parsed = Url::parse(url).map_err(|e| LadleError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LadleError::InvalidUrl(format!(
            "{}: URL must use http:// or https://",
            url
        )));
    }
    Ok(parsed)
}

/// Builds the headers every request carries: User-Agent, configured headers,
/// and one `Cookie` header for all configured cookies.
fn default_headers(url: &str, config: &FetchConfig) -> Result<HeaderMap> {
    let invalid = |what: &str| LadleError::RequestCreationFailed(format!("{} (invalid {})", url, what));

    let mut headers = HeaderMap::new();
    headers.insert(
        USER_AGENT,
        HeaderValue::from_str(&config.user_agent).map_err(|_| invalid("user agent"))?,
    );

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid("header name"))?;
        let value = HeaderValue::from_str(value).map_err(|_| invalid("header value"))?;
        headers.insert(name, value);
    }

    if let Some(cookies) = config.cookie_header() {
        headers.insert(COOKIE, HeaderValue::from_str(&cookies).map_err(|_| invalid("cookie"))?);
    }
    Ok(headers)
}

fn client(url: &str, config: &FetchConfig) -> Result<Client> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .default_headers(default_headers(url, config)?)
        .build()
        .map_err(|e| LadleError::RequestCreationFailed(format!("{}: {}", url, e)))
}

async fn send(url: &str, request: RequestBuilder, config: &FetchConfig) -> Result<String> {
    let response = request.send().await.map_err(|e| {
        if e.is_timeout() {
            LadleError::Timeout { timeout: config.timeout }
        } else {
            LadleError::RequestFailed { url: url.to_string(), reason: e.to_string() }
        }
    })?;

    trace!(url, status = %response.status(), "response received");

    response
        .text()
        .await
        .map_err(|e| LadleError::ResponseReadFailed(e.to_string()))
}

/// Fetches HTML content from a URL with a GET request.
///
/// Redirects are followed and the configured timeout, User-Agent, headers and
/// cookies are applied. The body is returned whatever the status code.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed = parse_url(url)?;
    let client = client(url, config)?;

    trace!(url, "GET");
    send(url, client.get(parsed), config).await
}

/// Sends a POST request with the given content type and body.
pub async fn post(url: &str, content_type: &str, body: impl Into<PostBody>, config: &FetchConfig) -> Result<String> {
    let parsed = parse_url(url)?;
    let client = client(url, config)?;
    let body = body.into().into_bytes()?;

    trace!(url, content_type, bytes = body.len(), "POST");
    let request = client.post(parsed).header(CONTENT_TYPE, content_type).body(body);
    send(url, request, config).await
}

/// Sends a POST request with an `application/x-www-form-urlencoded` body.
pub async fn post_form(url: &str, form: &[(&str, &str)], config: &FetchConfig) -> Result<String> {
    let parsed = parse_url(url)?;
    let client = client(url, config)?;

    trace!(url, fields = form.len(), "POST form");
    send(url, client.post(parsed).form(form), config).await
}

/// Reads HTML content from a local file.
///
/// Callers should validate and sanitize the path when accepting user input.
pub fn fetch_file(path: &str) -> Result<String> {
    let path_buf = PathBuf::from(path);

    if !path_buf.exists() {
        Err(LadleError::FileNotFound(path.to_string()))
    } else {
        fs::read_to_string(&path_buf).map_err(LadleError::from)
    }
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}
