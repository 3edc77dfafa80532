//! # portico-async-graphql
//!
//! [async-graphql](https://github.com/async-graphql/async-graphql) integration
//! for portico.
//!
//! A [`ResolverSet`] supplies the root resolvers; [`GraphQLModule`] turns them
//! into a schema once per mode start and hands portico a [`GraphQLService`]
//! that executes each operation with the request's
//! [`RequestContext`](portico::RequestContext) attached as schema data.
//! Resolvers reach it through [`ContextExt::request_context`].

mod context_ext;
mod graphql_module;
mod graphql_service;
mod resolver_set;

pub use context_ext::ContextExt;
pub use graphql_module::GraphQLModule;
pub use graphql_service::{Explorer, GraphQLService};
pub use resolver_set::{ResolverSet, Resolvers};

pub use async_graphql;
pub use async_trait::async_trait;

/// Prelude module with common imports
pub mod prelude {
    pub use crate::{ContextExt, Explorer, GraphQLModule, ResolverSet, Resolvers};
    pub use async_graphql::{
        Context, EmptyMutation, EmptySubscription, InputObject, Object, Result, SimpleObject,
    };
}
