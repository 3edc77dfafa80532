use async_graphql::http::{GraphQLPlaygroundConfig, GraphiQLSource, playground_source};
use async_graphql::{ObjectType, Schema, SubscriptionType, Variables};
use async_trait::async_trait;
use portico::{GraphQLExecutor, GraphQLRequest, RequestContext};
use serde_json::{Value, json};

/// Which interactive explorer to serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Explorer {
    #[default]
    GraphiQL,
    Playground,
}

/// Runs operations against a built schema with the [`RequestContext`] as data.
pub struct GraphQLService<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    schema: Schema<Query, Mutation, Subscription>,
    explorer: Explorer,
}

impl<Query, Mutation, Subscription> GraphQLService<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    pub fn new(schema: Schema<Query, Mutation, Subscription>, explorer: Explorer) -> Self {
        Self { schema, explorer }
    }

    pub fn schema(&self) -> &Schema<Query, Mutation, Subscription> {
        &self.schema
    }
}

#[async_trait]
impl<Query, Mutation, Subscription> GraphQLExecutor for GraphQLService<Query, Mutation, Subscription>
where
    Query: ObjectType + 'static,
    Mutation: ObjectType + 'static,
    Subscription: SubscriptionType + 'static,
{
    async fn execute(&self, request: GraphQLRequest, context: RequestContext) -> Value {
        let mut gql_request = async_graphql::Request::new(request.query);

        if let Some(op_name) = request.operation_name {
            gql_request = gql_request.operation_name(op_name);
        }

        if let Some(vars) = request.variables {
            gql_request = gql_request.variables(Variables::from_json(vars));
        }

        let response = self.schema.execute(gql_request.data(context)).await;

        serde_json::to_value(&response).unwrap_or_else(|e| {
            json!({ "errors": [{ "message": format!("failed to serialize response: {e}") }] })
        })
    }

    fn explorer_html(&self, endpoint: &str) -> String {
        match self.explorer {
            Explorer::GraphiQL => GraphiQLSource::build().endpoint(endpoint).finish(),
            Explorer::Playground => playground_source(GraphQLPlaygroundConfig::new(endpoint)),
        }
    }
}
