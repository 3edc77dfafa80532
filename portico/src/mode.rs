//! The two startup configurations and everything that differs between them.

use std::fmt;
use std::time::Duration;

use crate::cookies::CookiePolicy;
use crate::http_helpers::ErrorBody;

pub const DEVELOPMENT_PORT: u16 = 3000;
pub const PRODUCTION_PORT: u16 = 3300;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    Development,
    Production,
}

impl ServerMode {
    /// `production`/`prod` select production; anything else is development.
    pub fn from_env_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "production" | "prod" => ServerMode::Production,
            _ => ServerMode::Development,
        }
    }
}

impl fmt::Display for ServerMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerMode::Development => f.write_str("development"),
            ServerMode::Production => f.write_str("production"),
        }
    }
}

/// When the cache and mailer handles are resolved from their providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandleResolution {
    /// Once, while the mode is starting.
    OncePerProcess,
    /// On every context build.
    PerRequest,
}

/// Fixed ceiling of requests per client per window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitConfig {
    pub max: u32,
    pub window: Duration,
}

impl RateLimitConfig {
    pub fn new(max: u32, window: Duration) -> Self {
        Self { max, window }
    }
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self::new(120, Duration::from_secs(10 * 60))
    }
}

#[derive(Debug, Clone)]
pub struct ModeConfig {
    pub mode: ServerMode,
    pub hostname: String,
    pub port: u16,
    pub graphql_path: String,
    /// Interactive explorer page. When equal to `graphql_path` it is served on
    /// `GET` requests that accept HTML and carry no query.
    pub explorer_path: Option<String>,
    pub rate_limit: Option<RateLimitConfig>,
    pub cookie_secret: Option<String>,
    pub cookie_policy: CookiePolicy,
    /// Body for unmatched routes. `None` leaves the transport's default.
    pub not_found: Option<ErrorBody>,
    pub handles: HandleResolution,
}

impl ModeConfig {
    pub fn development() -> Self {
        Self {
            mode: ServerMode::Development,
            hostname: "127.0.0.1".to_string(),
            port: DEVELOPMENT_PORT,
            graphql_path: "/".to_string(),
            explorer_path: Some("/".to_string()),
            rate_limit: None,
            cookie_secret: None,
            cookie_policy: CookiePolicy::relaxed(),
            not_found: None,
            handles: HandleResolution::PerRequest,
        }
    }

    pub fn production(cookie_secret: impl Into<String>) -> Self {
        Self {
            mode: ServerMode::Production,
            hostname: "127.0.0.1".to_string(),
            port: PRODUCTION_PORT,
            graphql_path: "/graphql".to_string(),
            explorer_path: Some("/graphiql".to_string()),
            rate_limit: Some(RateLimitConfig::default()),
            cookie_secret: Some(cookie_secret.into()),
            cookie_policy: CookiePolicy::passthrough(),
            not_found: Some(ErrorBody::not_found()),
            handles: HandleResolution::OncePerProcess,
        }
    }

    pub fn with_hostname(mut self, hostname: impl Into<String>) -> Self {
        self.hostname = hostname.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.hostname, self.port)
    }

    /// Whether the explorer shares the GraphQL endpoint's path.
    pub fn inline_explorer(&self) -> bool {
        self.explorer_path.as_deref() == Some(self.graphql_path.as_str())
    }
}
