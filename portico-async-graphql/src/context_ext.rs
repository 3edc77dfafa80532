use async_graphql::Context;
use portico::RequestContext;

/// Access to the per-request [`RequestContext`] from inside a resolver.
///
/// ```rust,ignore
/// #[Object]
/// impl Query {
///     async fn me(&self, ctx: &Context<'_>) -> Result<Option<String>> {
///         Ok(ctx.request_context()?.get_cookie("session").map(str::to_string))
///     }
/// }
/// ```
pub trait ContextExt {
    fn request_context(&self) -> async_graphql::Result<&RequestContext>;
}

impl ContextExt for Context<'_> {
    fn request_context(&self) -> async_graphql::Result<&RequestContext> {
        self.data::<RequestContext>()
    }
}
