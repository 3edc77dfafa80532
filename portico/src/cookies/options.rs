//! Cookie serialization options and the per-mode policy merged over them.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::encoding::encode_value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SameSite {
    Strict,
    Lax,
    None,
}

impl fmt::Display for SameSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SameSite::Strict => f.write_str("Strict"),
            SameSite::Lax => f.write_str("Lax"),
            SameSite::None => f.write_str("None"),
        }
    }
}

/// Caller-supplied attributes for a `Set-Cookie` header.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieOptions {
    pub domain: Option<String>,
    pub path: Option<String>,
    pub expires: Option<DateTime<Utc>>,
    /// Seconds.
    pub max_age: Option<i64>,
    pub same_site: Option<SameSite>,
    pub secure: Option<bool>,
    pub http_only: Option<bool>,
    #[serde(default)]
    pub signed: bool,
}

impl CookieOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn expires(mut self, expires: DateTime<Utc>) -> Self {
        self.expires = Some(expires);
        self
    }

    pub fn max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    pub fn same_site(mut self, same_site: SameSite) -> Self {
        self.same_site = Some(same_site);
        self
    }

    pub fn secure(mut self, secure: bool) -> Self {
        self.secure = Some(secure);
        self
    }

    pub fn http_only(mut self, http_only: bool) -> Self {
        self.http_only = Some(http_only);
        self
    }

    pub fn signed(mut self, signed: bool) -> Self {
        self.signed = signed;
        self
    }
}

/// Attributes a mode forces onto every cookie it sets, regardless of caller options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    pub forced_same_site: Option<SameSite>,
    pub forced_secure: Option<bool>,
}

impl CookiePolicy {
    /// Leaves caller options untouched.
    pub fn passthrough() -> Self {
        Self::default()
    }

    /// `SameSite=None` without `Secure`, for cross-origin tooling against plain-HTTP localhost.
    pub fn relaxed() -> Self {
        Self {
            forced_same_site: Some(SameSite::None),
            forced_secure: Some(false),
        }
    }

    pub fn apply(&self, mut options: CookieOptions) -> CookieOptions {
        if let Some(same_site) = self.forced_same_site {
            options.same_site = Some(same_site);
        }
        if let Some(secure) = self.forced_secure {
            options.secure = Some(secure);
        }
        options
    }
}

fn http_date(date: &DateTime<Utc>) -> String {
    date.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// Renders a `Set-Cookie` header value. `value` is percent-encoded.
pub fn serialize_cookie(name: &str, value: &str, options: &CookieOptions) -> String {
    let mut cookie = format!("{name}={}", encode_value(value));

    if let Some(max_age) = options.max_age {
        cookie.push_str(&format!("; Max-Age={max_age}"));
    }
    if let Some(domain) = &options.domain {
        cookie.push_str(&format!("; Domain={domain}"));
    }
    if let Some(path) = &options.path {
        cookie.push_str(&format!("; Path={path}"));
    }
    if let Some(expires) = &options.expires {
        cookie.push_str(&format!("; Expires={}", http_date(expires)));
    }
    if options.http_only == Some(true) {
        cookie.push_str("; HttpOnly");
    }
    if options.secure == Some(true) {
        cookie.push_str("; Secure");
    }
    if let Some(same_site) = options.same_site {
        cookie.push_str(&format!("; SameSite={same_site}"));
    }

    cookie
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialize_full() {
        let options = CookieOptions::new()
            .max_age(3600)
            .domain("example.com")
            .path("/")
            .expires(DateTime::<Utc>::UNIX_EPOCH)
            .http_only(true)
            .secure(true)
            .same_site(SameSite::Lax);

        assert_eq!(
            serialize_cookie("sid", "a b", &options),
            "sid=a%20b; Max-Age=3600; Domain=example.com; Path=/; \
             Expires=Thu, 01 Jan 1970 00:00:00 GMT; HttpOnly; Secure; SameSite=Lax"
        );
    }

    #[test]
    fn test_serialize_minimal() {
        assert_eq!(serialize_cookie("sid", "abc", &CookieOptions::new()), "sid=abc");
    }

    #[test]
    fn test_secure_false_is_omitted() {
        let options = CookieOptions::new().secure(false).http_only(false);
        assert_eq!(serialize_cookie("sid", "abc", &options), "sid=abc");
    }

    #[test]
    fn test_relaxed_policy_overrides_caller() {
        let options = CookieOptions::new().same_site(SameSite::Lax).secure(true);
        let applied = CookiePolicy::relaxed().apply(options);
        assert_eq!(applied.same_site, Some(SameSite::None));
        assert_eq!(applied.secure, Some(false));
    }

    #[test]
    fn test_passthrough_policy_keeps_caller() {
        let options = CookieOptions::new().same_site(SameSite::Lax).secure(true);
        let applied = CookiePolicy::passthrough().apply(options.clone());
        assert_eq!(applied, options);
    }

    #[test]
    fn test_options_deserialize_camel_case() {
        let options: CookieOptions =
            serde_json::from_str(r#"{"sameSite":"strict","httpOnly":true,"maxAge":60}"#).unwrap();
        assert_eq!(options.same_site, Some(SameSite::Strict));
        assert_eq!(options.http_only, Some(true));
        assert_eq!(options.max_age, Some(60));
        assert!(!options.signed);
    }

    #[test]
    fn test_options_expires_json() {
        let options: CookieOptions =
            serde_json::from_str(r#"{"expires":"2030-01-01T00:00:00Z","signed":true}"#).unwrap();
        assert_eq!(
            serialize_cookie("sid", "abc", &options),
            "sid=abc; Expires=Tue, 01 Jan 2030 00:00:00 GMT"
        );
        assert!(options.signed);

        let json = serde_json::to_value(&options).unwrap();
        assert_eq!(json["expires"], "2030-01-01T00:00:00Z");
    }
}
