use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use super::GraphQLRequest;
use crate::context::RequestContext;

/// A built schema that can run operations against a request context.
#[async_trait]
pub trait GraphQLExecutor: Send + Sync {
    /// Runs one operation. The returned value is the serialized GraphQL
    /// response, including any field errors the schema layer produced.
    async fn execute(&self, request: GraphQLRequest, context: RequestContext) -> Value;

    /// HTML for the interactive explorer pointed at `endpoint`.
    fn explorer_html(&self, endpoint: &str) -> String;
}

/// Resolves the resolver set and builds the schema. Called once per mode start.
#[async_trait]
pub trait SchemaProvider: Send + Sync {
    async fn build_schema(&self) -> anyhow::Result<Arc<dyn GraphQLExecutor>>;
}
