//! Common test utilities and fixtures
//!
//! Shared functionality used across all test modules: a recording [`MockTransport`]
//! that answers from canned JSON, configuration helpers and response builders.

use async_trait::async_trait;
use bytes::Bytes;
use hondana::config::{Language, SourceConfig, SourceConfigBuilder};
use hondana::error::{Error, Result};
use hondana::net::Transport;
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::time::Duration;
use url::Url;

#[allow(dead_code)]
pub const TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Installs a test-friendly tracing subscriber; honours `RUST_LOG`.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// English source configuration with no rate limiting.
#[allow(dead_code)]
pub fn test_config() -> SourceConfig {
    config_for(Language::english())
}

#[allow(dead_code)]
pub fn config_for(language: Language) -> SourceConfig {
    SourceConfigBuilder::default()
        .language(language)
        .rate_limit_ms(0u64)
        .build()
        .unwrap()
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
enum Reply {
    Body(String),
    Fail,
}

#[allow(dead_code)]
#[derive(Debug, Clone)]
struct Route {
    path: String,
    page: Option<u32>,
    reply: Reply,
}

#[allow(dead_code)]
impl Route {
    fn matches(&self, url: &Url, page: Option<u32>) -> bool {
        url.path() == self.path && (self.page.is_none() || self.page == page)
    }
}

/// Transport answering from registered routes and recording every requested URL.
///
/// A route matches on the URL path and, when given, the `page` query parameter.
/// Page-specific routes win over path-only ones. Unmatched requests fail with
/// [`Error::NotFound`].
#[allow(dead_code)]
#[derive(Debug, Default)]
pub struct MockTransport {
    routes: Vec<Route>,
    requests: Mutex<Vec<Url>>,
}

#[allow(dead_code)]
impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, body: Value) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            page: None,
            reply: Reply::Body(body.to_string()),
        });
        self
    }

    pub fn route_page(mut self, path: &str, page: u32, body: Value) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            page: Some(page),
            reply: Reply::Body(body.to_string()),
        });
        self
    }

    /// Raw body, for responses that are not valid JSON.
    pub fn route_raw(mut self, path: &str, body: &str) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            page: None,
            reply: Reply::Body(body.to_string()),
        });
        self
    }

    /// Makes `page` of `path` fail like a server error.
    pub fn fail_page(mut self, path: &str, page: u32) -> Self {
        self.routes.push(Route {
            path: path.to_string(),
            page: Some(page),
            reply: Reply::Fail,
        });
        self
    }

    pub fn requests(&self) -> Vec<Url> {
        self.requests.lock().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    /// `page` parameters of the recorded requests, in request order.
    pub fn requested_pages(&self) -> Vec<u32> {
        self.requests().iter().filter_map(page_of).collect()
    }
}

#[allow(dead_code)]
fn page_of(url: &Url) -> Option<u32> {
    url.query_pairs()
        .find(|(key, _)| key == "page")
        .and_then(|(_, value)| value.parse().ok())
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &Url) -> Result<Bytes> {
        self.requests.lock().push(url.clone());

        let page = page_of(url);
        let route = self
            .routes
            .iter()
            .find(|r| r.page.is_some() && r.matches(url, page))
            .or_else(|| self.routes.iter().find(|r| r.page.is_none() && r.matches(url, page)));

        match route.map(|r| &r.reply) {
            Some(Reply::Body(body)) => Ok(Bytes::from(body.clone())),
            Some(Reply::Fail) => Err(Error::source("mock", format!("HTTP 500 for {}", url))),
            None => Err(Error::not_found(url.to_string())),
        }
    }
}

/// Value of the first query parameter named `key`.
#[allow(dead_code)]
pub fn param(url: &Url, key: &str) -> Option<String> {
    url.query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

/// Every value of the query parameter named `key`, in order.
#[allow(dead_code)]
pub fn params(url: &Url, key: &str) -> Vec<String> {
    url.query_pairs()
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .collect()
}

/// Query pairs of `url` without the pagination parameters.
#[allow(dead_code)]
pub fn without_pagination(url: &Url) -> Vec<(String, String)> {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .filter(|(k, _)| k != "page" && k != "limit")
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect();
    pairs.sort();
    pairs
}

#[allow(dead_code)]
pub fn search_comic(hid: &str, title: &str) -> Value {
    json!({
        "hid": hid,
        "title": title,
        "md_covers": [{ "b2key": format!("{}.jpg", hid) }],
    })
}

/// Search results `{prefix}0 .. {prefix}{count-1}`.
#[allow(dead_code)]
pub fn search_results(prefix: &str, count: usize) -> Value {
    Value::Array(
        (0..count)
            .map(|i| search_comic(&format!("{}{}", prefix, i), &format!("Title {}", i)))
            .collect(),
    )
}

#[allow(dead_code)]
pub fn comic_chapter(hid: &str, chap: &str) -> Value {
    json!({
        "hid": hid,
        "lang": "en",
        "title": "",
        "created_at": "2023-04-01T12:30:00Z",
        "chap": chap,
        "vol": null,
        "group_name": ["Scans"],
    })
}

/// One chapter listing page holding chapters `start .. start + count`.
#[allow(dead_code)]
pub fn chapter_page(start: usize, count: usize, total: usize) -> Value {
    let chapters: Vec<Value> = (start..start + count)
        .map(|n| comic_chapter(&format!("c{}", n), &n.to_string()))
        .collect();
    json!({ "chapters": chapters, "total": total })
}

/// Detail record with the fields every mapping test touches.
#[allow(dead_code)]
pub fn comic_detail(hid: &str) -> Value {
    json!({
        "comic": {
            "hid": hid,
            "title": "One Piece",
            "country": "jp",
            "year": 1997,
            "user_follow_count": 123456,
            "content_rating": "safe",
            "status": 1,
            "translation_completed": false,
            "desc": "Gol D. Roger &amp; his treasure.\n---\nSource: MU",
            "md_titles": [{ "title": "ワンピース" }],
            "relate_from": [],
            "mu_comic_categories": [
                { "mu_categories": { "title": "Pirates" } }
            ],
            "md_covers": [{ "b2key": "op.jpg" }],
        },
        "artists": [{ "name": "Oda Eiichiro" }],
        "authors": [{ "name": "Oda Eiichiro" }],
        "genres": [{ "name": "Action" }, { "name": "Adventure" }],
        "demographic": "Shounen",
    })
}
