//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::collections::HashMap;

use minicat::app::{InMemoryAccounts, ResourceResolver, Router};
use minicat::http::error::HttpError;
use minicat::http::request::Request;
use minicat::http::parser::parse_http_request;
use minicat::session::SessionStore;

/// Resources held in memory, keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct MemoryResources {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryResources {
    pub fn with_pages() -> Self {
        let mut files = HashMap::new();
        for (path, body) in [
            ("/index.html", "<h1>index</h1>"),
            ("/login.html", "<h1>login</h1>"),
            ("/register.html", "<h1>register</h1>"),
            ("/css/styles.css", "body {}"),
        ] {
            files.insert(path.to_string(), body.as_bytes().to_vec());
        }
        Self { files }
    }
}

impl ResourceResolver for MemoryResources {
    async fn resolve(&self, path: &str) -> Result<Vec<u8>, HttpError> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| HttpError::ResourceNotFound(path.to_string()))
    }
}

pub fn router() -> Router<InMemoryAccounts, MemoryResources> {
    Router::new(
        InMemoryAccounts::new(),
        MemoryResources::with_pages(),
        SessionStore::new(),
    )
}

pub fn request(raw: &str) -> Request {
    parse_http_request(raw.as_bytes()).unwrap().0
}

pub fn form_post(path: &str, body: &str, cookie: Option<&str>) -> Request {
    let cookie_line = cookie
        .map(|c| format!("Cookie: {}\r\n", c))
        .unwrap_or_default();
    request(&format!(
        "POST {} HTTP/1.1\r\nHost: localhost\r\n{}Content-Type: application/x-www-form-urlencoded\r\nContent-Length: {}\r\n\r\n{}",
        path,
        cookie_line,
        body.len(),
        body
    ))
}
