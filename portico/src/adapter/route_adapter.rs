use std::sync::Arc;

use anyhow::Result;

use crate::graphql::GraphQLRoute;
use crate::http_helpers::{HttpRequest, HttpResponse};

/// Converts between a transport's request/response types and the core ones.
pub trait RouteAdapter {
    type Request: Send;
    type Response;

    fn adapt_request(request: Self::Request) -> impl Future<Output = Result<HttpRequest>> + Send;

    fn adapt_response(response: HttpResponse) -> Result<Self::Response>;

    fn handle_request(
        request: Self::Request,
        route: Arc<GraphQLRoute>,
    ) -> impl Future<Output = Result<Self::Response>> + Send {
        async move {
            let http_request = Self::adapt_request(request).await?;
            let http_response = route.handle(http_request).await;
            Self::adapt_response(http_response)
        }
    }
}
