use std::sync::Arc;

use anyhow::Context;
use async_graphql::Schema;
use async_trait::async_trait;
use portico::{GraphQLExecutor, SchemaProvider};
use tracing::debug;

use crate::graphql_service::{Explorer, GraphQLService};
use crate::resolver_set::ResolverSet;

/// Builds an async-graphql schema from a [`ResolverSet`].
///
/// ```rust,ignore
/// let module = GraphQLModule::for_root(AppResolvers)
///     .with_explorer(Explorer::Playground)
///     .with_limit_depth(12);
///
/// let app = PorticoFactory::new(collaborators)
///     .create(ModeConfig::development(), &module, AxumAdapter::new())
///     .await?;
/// ```
pub struct GraphQLModule<R: ResolverSet> {
    resolvers: R,
    explorer: Explorer,
    limit_depth: Option<usize>,
    introspection: bool,
}

impl<R: ResolverSet> GraphQLModule<R> {
    pub fn for_root(resolvers: R) -> Self {
        Self {
            resolvers,
            explorer: Explorer::default(),
            limit_depth: None,
            introspection: true,
        }
    }

    /// Explorer page served by the mode. Default: GraphiQL.
    pub fn with_explorer(mut self, explorer: Explorer) -> Self {
        self.explorer = explorer;
        self
    }

    pub fn with_limit_depth(mut self, depth: usize) -> Self {
        self.limit_depth = Some(depth);
        self
    }

    /// Introspection is enabled by default.
    pub fn with_introspection(mut self, enabled: bool) -> Self {
        self.introspection = enabled;
        self
    }

    pub fn explorer(&self) -> Explorer {
        self.explorer
    }
}

#[async_trait]
impl<R: ResolverSet> SchemaProvider for GraphQLModule<R> {
    async fn build_schema(&self) -> anyhow::Result<Arc<dyn GraphQLExecutor>> {
        let resolvers = self
            .resolvers
            .get_resolvers()
            .await
            .context("failed to load resolvers")?;

        let mut builder = Schema::build(resolvers.query, resolvers.mutation, resolvers.subscription);
        if let Some(depth) = self.limit_depth {
            builder = builder.limit_depth(depth);
        }
        if !self.introspection {
            builder = builder.disable_introspection();
        }
        let schema = builder.finish();
        debug!(explorer = ?self.explorer, "schema built");

        Ok(Arc::new(GraphQLService::new(schema, self.explorer)))
    }
}
