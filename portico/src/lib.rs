//! # portico
//!
//! Per-request GraphQL context and development/production mode assembly.
//!
//! A [`ModeConfig`] describes everything that differs between the two modes:
//! listen port, rate limiting, cookie signing, forced cookie attributes, the
//! not-found handler and when cache/mailer handles are resolved.
//! [`PorticoFactory`] wires a schema and a [`ContextBuilder`] onto an
//! [`HttpAdapter`] according to that config; transport crates such as
//! `portico-axum` implement the adapter.
//!
//! Resolvers receive a [`RequestContext`] that reads and writes prefixed
//! cookies, exposes the shared cache and the request headers, and dispatches
//! mail.

pub mod adapter;
pub mod collaborators;
pub mod context;
pub mod cookies;
pub mod graphql;
pub mod http_helpers;
pub mod mode;
mod portico_application;
pub mod portico_factory;
pub mod rate_limit;

pub use adapter::{HttpAdapter, RouteAdapter};
pub use collaborators::{
    Cache, CacheError, CacheProvider, Collaborators, EmailDetails, MailError, MailReceipt, Mailer,
    MailerProvider,
};
pub use context::{ContextBuilder, ContextError, RequestContext};
pub use cookies::{CookieOptions, PREFIX, SameSite};
pub use graphql::{GraphQLExecutor, GraphQLRequest, GraphQLRoute, SchemaProvider};
pub use http_helpers::{Body, ErrorBody, Headers, HttpRequest, HttpResponse};
pub use mode::{HandleResolution, ModeConfig, RateLimitConfig, ServerMode};
pub use portico_application::PorticoApplication;
pub use portico_factory::PorticoFactory;
pub use rate_limit::{RateDecision, RateLimiter};

// Re-export dependencies used by adapter crates
pub use async_trait::async_trait;
