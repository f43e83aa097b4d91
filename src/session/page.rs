/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Anti-forgery token sources
//!
//! The token is never cached by the client: a source is asked again before
//! every request, so a page that rotates its token is picked up immediately.

use crate::constants::CSRF_META_NAME;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use tokio::sync::RwLock;

static META_TAG: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<meta\b[^>]*>").expect("valid meta tag pattern"));

static ATTRIBUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)([A-Za-z_:][-A-Za-z0-9_:.]*)\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>/]+))"#)
        .expect("valid attribute pattern")
});

/// Provides the anti-forgery token of the current page
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// Returns the token, or `None` when the page does not carry one
    async fn csrf_token(&self) -> Option<String>;
}

/// Source for contexts without a page; never yields a token
#[derive(Debug, Default, Clone, Copy)]
pub struct NoTokenSource;

#[async_trait]
impl TokenSource for NoTokenSource {
    async fn csrf_token(&self) -> Option<String> {
        None
    }
}

/// Source holding a fixed token
#[derive(Debug, Clone)]
pub struct StaticTokenSource {
    token: String,
}

impl StaticTokenSource {
    /// Creates a source that always yields `token` (unless it is empty)
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
        }
    }
}

#[async_trait]
impl TokenSource for StaticTokenSource {
    async fn csrf_token(&self) -> Option<String> {
        Some(self.token.clone()).filter(|token| !token.is_empty())
    }
}

/// Source reading `<meta name="csrf-token" content="...">` from an HTML document
#[derive(Debug, Default)]
pub struct MetaTagTokenSource {
    document: RwLock<String>,
}

impl MetaTagTokenSource {
    /// Creates a source over `document`
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: RwLock::new(document.into()),
        }
    }

    /// Replaces the page document, e.g. after the server rotated the token
    pub async fn set_document(&self, document: impl Into<String>) {
        *self.document.write().await = document.into();
    }
}

#[async_trait]
impl TokenSource for MetaTagTokenSource {
    async fn csrf_token(&self) -> Option<String> {
        let document = self.document.read().await;
        extract_meta_content(&document, CSRF_META_NAME)
    }
}

/// Returns the `content` of the first `<meta>` tag whose `name` equals `name`
///
/// An empty or missing `content` on that first tag yields `None`.
pub fn extract_meta_content(document: &str, name: &str) -> Option<String> {
    for tag in META_TAG.find_iter(document) {
        let mut tag_name = None;
        let mut content = None;
        for captures in ATTRIBUTE.captures_iter(tag.as_str()) {
            let value = captures
                .get(2)
                .or_else(|| captures.get(3))
                .or_else(|| captures.get(4))
                .map(|m| m.as_str());
            match captures[1].to_ascii_lowercase().as_str() {
                "name" => tag_name = value,
                "content" => content = value,
                _ => {}
            }
        }
        if tag_name == Some(name) {
            return content
                .map(decode_entities)
                .filter(|content| !content.is_empty());
        }
    }
    None
}

fn decode_entities(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
