//! Inbound cookie jar and the application-wide name prefix.

use rustc_hash::FxHashMap;

use super::encoding::decode_value;
use crate::http_helpers::Headers;

/// Prepended to every cookie name this application manages.
pub const PREFIX: &str = "__portico_";

/// Wire-level name for an application cookie.
pub fn prefixed(name: &str) -> String {
    format!("{PREFIX}{name}")
}

/// Reads the application cookie `name` (stored as `PREFIX + name`) from `jar`.
pub fn get_cookie<'a>(name: &str, jar: &'a CookieJar) -> Option<&'a str> {
    jar.get(&prefixed(name))
}

/// Cookies presented by a request, keyed by their wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CookieJar {
    cookies: FxHashMap<String, String>,
}

impl CookieJar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses every `Cookie` header. When a name repeats, the first value wins.
    pub fn from_headers(headers: &Headers) -> Self {
        let mut jar = Self::new();
        for header in headers.get_all("cookie") {
            jar.extend_from_header(header);
        }
        jar
    }

    pub fn parse(header: &str) -> Self {
        let mut jar = Self::new();
        jar.extend_from_header(header);
        jar
    }

    fn extend_from_header(&mut self, header: &str) {
        for pair in header.split(';') {
            let Some((name, value)) = pair.split_once('=') else {
                continue;
            };
            let name = name.trim();
            if name.is_empty() {
                continue;
            }
            let value = value.trim();
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);

            self.cookies
                .entry(name.to_string())
                .or_insert_with(|| decode_value(value));
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.cookies.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.cookies.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cookies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cookies.is_empty()
    }
}
