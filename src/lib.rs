//! Demo GraphQL server assembled from the portico crates.

pub mod config;
pub mod resolvers;

use portico::{Collaborators, HttpAdapter, ModeConfig, PorticoApplication, PorticoFactory, ServerMode};
use portico_async_graphql::{Explorer, GraphQLModule};
use portico_axum::AxumAdapter;

use crate::resolvers::AppResolvers;

/// Assembles `mode` on axum with the demo resolvers. Development serves the
/// Playground, production GraphiQL.
pub async fn build_app(
    mode: ModeConfig,
    collaborators: Collaborators,
) -> anyhow::Result<PorticoApplication<AxumAdapter>> {
    let explorer = match mode.mode {
        ServerMode::Development => Explorer::Playground,
        ServerMode::Production => Explorer::GraphiQL,
    };
    let module = GraphQLModule::for_root(AppResolvers).with_explorer(explorer);

    PorticoFactory::new(collaborators)
        .create(mode, &module, AxumAdapter::new())
        .await
}
