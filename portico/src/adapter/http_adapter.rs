use std::sync::Arc;

use anyhow::Result;

use crate::graphql::GraphQLRoute;
use crate::http_helpers::ErrorBody;
use crate::rate_limit::RateLimiter;

/// A transport the mode assembler can register routes on and start.
pub trait HttpAdapter: Clone + Send + Sync {
    fn new() -> Self;

    /// Serves GraphQL on `GET` and `POST` at `path`.
    fn add_graphql_route(&mut self, path: &str, route: Arc<GraphQLRoute>);

    /// Serves a static HTML page on `GET` at `path`.
    fn add_page(&mut self, path: &str, html: String);

    /// Answers unmatched routes with `body` and its status code.
    fn set_not_found(&mut self, body: ErrorBody);

    /// Applies `limiter` to every route, the not-found handler included.
    fn use_rate_limit(&mut self, limiter: Arc<RateLimiter>);

    /// Binds and serves until the process exits.
    fn listen(self, port: u16, hostname: &str) -> impl Future<Output = Result<()>> + Send;
}
