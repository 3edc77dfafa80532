mod executor;
mod graphql_route;
mod request;

pub use executor::{GraphQLExecutor, SchemaProvider};
pub use graphql_route::GraphQLRoute;
pub use request::{GraphQLRequest, GraphQLRequestError};
