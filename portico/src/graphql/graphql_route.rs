use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, error};

use super::{GraphQLExecutor, GraphQLRequest};
use crate::context::ContextBuilder;
use crate::cookies::ResponseCookies;
use crate::http_helpers::{ErrorBody, HttpRequest, HttpResponse};

/// The GraphQL endpoint: builds the request context, runs the operation, and
/// copies cookies written by resolvers onto the response.
pub struct GraphQLRoute {
    executor: Arc<dyn GraphQLExecutor>,
    context_builder: Arc<ContextBuilder>,
    inline_explorer: Option<String>,
}

impl GraphQLRoute {
    pub fn new(executor: Arc<dyn GraphQLExecutor>, context_builder: Arc<ContextBuilder>) -> Self {
        Self {
            executor,
            context_builder,
            inline_explorer: None,
        }
    }

    /// Serve the explorer from this route on browser `GET`s without a query.
    pub fn with_inline_explorer(mut self, html: String) -> Self {
        self.inline_explorer = Some(html);
        self
    }

    pub async fn handle(&self, req: HttpRequest) -> HttpResponse {
        if let Some(html) = &self.inline_explorer {
            if req.is_get() && req.accepts_html() && !req.query_params.contains_key("query") {
                return HttpResponse::html(html.clone());
            }
        }

        let request = match GraphQLRequest::from_http(&req) {
            Ok(request) => request,
            Err(e) => return HttpResponse::error(ErrorBody::bad_request(e.to_string())),
        };

        let cookies = ResponseCookies::new();
        let context = match self.context_builder.build(&req, cookies.clone()).await {
            Ok(context) => context,
            Err(e) => {
                error!(error = %e, "failed to build request context");
                return HttpResponse::error(ErrorBody::internal(e.to_string()));
            }
        };

        debug!(operation = ?request.operation_name, "executing graphql operation");
        let body: Value = self.executor.execute(request, context).await;

        let mut response = HttpResponse::json(200, body);
        for set_cookie in cookies.drain() {
            response.headers.push(("set-cookie".to_string(), set_cookie));
        }
        response
    }
}
