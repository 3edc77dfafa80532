use std::collections::HashMap;

use super::{Body, Headers};
use crate::cookies::CookieJar;

#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub body: Body,
    pub headers: Headers,
    pub cookies: CookieJar,
    pub method: String,
    pub uri: String,
    pub query_params: HashMap<String, String>,
    /// Identity used for rate limiting, normally the peer IP.
    pub client_key: Option<String>,
}

impl HttpRequest {
    /// Builds a request and parses its cookie jar from the `Cookie` headers.
    pub fn new(method: impl Into<String>, uri: impl Into<String>, headers: Headers, body: Body) -> Self {
        let uri = uri.into();
        let cookies = CookieJar::from_headers(&headers);
        let query_params = uri
            .split_once('?')
            .and_then(|(_, query)| serde_urlencoded::from_str(query).ok())
            .unwrap_or_default();

        Self {
            body,
            headers,
            cookies,
            method: method.into(),
            uri,
            query_params,
            client_key: None,
        }
    }

    pub fn with_client_key(mut self, key: impl Into<String>) -> Self {
        self.client_key = Some(key.into());
        self
    }

    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    /// Get a specific header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn cookies(&self) -> &CookieJar {
        &self.cookies
    }

    pub fn is_get(&self) -> bool {
        self.method.eq_ignore_ascii_case("GET")
    }

    /// True when the `Accept` header lists `text/html`.
    pub fn accepts_html(&self) -> bool {
        self.header("accept")
            .is_some_and(|accept| accept.contains("text/html"))
    }
}
