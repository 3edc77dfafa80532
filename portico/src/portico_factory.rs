use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::collaborators::Collaborators;
use crate::context::ContextBuilder;
use crate::graphql::{GraphQLRoute, SchemaProvider};
use crate::adapter::HttpAdapter;
use crate::mode::ModeConfig;
use crate::portico_application::PorticoApplication;
use crate::rate_limit::RateLimiter;

/// Assembles one mode onto an [`HttpAdapter`].
pub struct PorticoFactory {
    collaborators: Collaborators,
}

impl PorticoFactory {
    pub fn new(collaborators: Collaborators) -> Self {
        Self { collaborators }
    }

    /// Resolves the resolver set once, builds the schema and registers every
    /// route the mode asks for. Any failure here means the mode never serves.
    pub async fn create<A: HttpAdapter>(
        &self,
        mode: ModeConfig,
        schema_provider: &dyn SchemaProvider,
        mut http_adapter: A,
    ) -> Result<PorticoApplication<A>> {
        info!(mode = %mode.mode, "starting");

        let executor = schema_provider
            .build_schema()
            .await
            .context("failed to build GraphQL schema")?;

        let context_builder = ContextBuilder::new(&mode, self.collaborators.clone())
            .await
            .context("failed to resolve cache and mailer")?;

        let mut route = GraphQLRoute::new(executor.clone(), Arc::new(context_builder));

        if let Some(explorer_path) = &mode.explorer_path {
            let html = executor.explorer_html(&mode.graphql_path);
            if mode.inline_explorer() {
                route = route.with_inline_explorer(html);
            } else {
                debug!(path = %explorer_path, "registering explorer");
                http_adapter.add_page(explorer_path, html);
            }
        }

        debug!(path = %mode.graphql_path, "registering graphql route");
        http_adapter.add_graphql_route(&mode.graphql_path, Arc::new(route));

        if let Some(body) = &mode.not_found {
            http_adapter.set_not_found(body.clone());
        }

        // Registered last so the limiter also covers the not-found handler
        if let Some(limit) = mode.rate_limit {
            debug!(max = limit.max, window = ?limit.window, "enabling rate limit");
            http_adapter.use_rate_limit(Arc::new(RateLimiter::new(limit)));
        }

        Ok(PorticoApplication::new(http_adapter, mode))
    }
}
