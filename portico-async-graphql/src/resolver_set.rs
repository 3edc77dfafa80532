use async_graphql::{ObjectType, SubscriptionType};
use async_trait::async_trait;

/// Root resolvers returned by a [`ResolverSet`].
pub struct Resolvers<Query, Mutation, Subscription> {
    pub query: Query,
    pub mutation: Mutation,
    pub subscription: Subscription,
}

impl<Query, Mutation, Subscription> Resolvers<Query, Mutation, Subscription> {
    pub fn new(query: Query, mutation: Mutation, subscription: Subscription) -> Self {
        Self {
            query,
            mutation,
            subscription,
        }
    }
}

/// Supplies the application's resolvers.
///
/// Awaited exactly once per mode start, before anything is registered on the
/// transport. An error aborts startup.
///
/// ```rust
/// use portico_async_graphql::{ResolverSet, Resolvers, async_graphql::*};
/// use portico_async_graphql::async_trait;
///
/// struct Query;
///
/// #[Object]
/// impl Query {
///     async fn hello(&self) -> &str {
///         "Hello, world!"
///     }
/// }
///
/// struct AppResolvers;
///
/// #[async_trait]
/// impl ResolverSet for AppResolvers {
///     type Query = Query;
///     type Mutation = EmptyMutation;
///     type Subscription = EmptySubscription;
///
///     async fn get_resolvers(
///         &self,
///     ) -> anyhow::Result<Resolvers<Query, EmptyMutation, EmptySubscription>> {
///         Ok(Resolvers::new(Query, EmptyMutation, EmptySubscription))
///     }
/// }
/// ```
#[async_trait]
pub trait ResolverSet: Send + Sync + 'static {
    type Query: ObjectType + 'static;
    type Mutation: ObjectType + 'static;
    type Subscription: SubscriptionType + 'static;

    async fn get_resolvers(
        &self,
    ) -> anyhow::Result<Resolvers<Self::Query, Self::Mutation, Self::Subscription>>;
}
