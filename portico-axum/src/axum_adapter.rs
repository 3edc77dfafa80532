use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    body::Body,
    extract::Request,
    http::{header, HeaderMap, HeaderValue},
    middleware::{self, Next},
    response::{Html, Response},
    routing::get,
    Router,
};
use portico::{ErrorBody, GraphQLRoute, HttpAdapter, RateDecision, RateLimiter, RouteAdapter};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::axum_route_adapter::{client_key, error_response, request_error, AxumRouteAdapter};

#[derive(Clone)]
pub struct AxumAdapter {
    instance: Router,
    not_found: Option<ErrorBody>,
    rate_limiter: Option<Arc<RateLimiter>>,
}

impl AxumAdapter {
    /// The finished router: routes, then the fallback, then the limiter and tracing layers.
    pub fn into_router(self) -> Router {
        let mut router = self.instance;

        // Unknown paths and unknown methods on known paths are both "not found"
        if let Some(body) = self.not_found {
            let method_body = body.clone();
            router = router
                .fallback(move || {
                    let body = body.clone();
                    async move { error_response(body) }
                })
                .method_not_allowed_fallback(move || {
                    let body = method_body.clone();
                    async move { error_response(body) }
                });
        }

        if let Some(limiter) = self.rate_limiter {
            router = router.layer(middleware::from_fn(move |req: Request, next: Next| {
                let limiter = limiter.clone();
                rate_limit_middleware(limiter, req, next)
            }));
        }

        router.layer(TraceLayer::new_for_http())
    }

    /// Serves on an already bound listener.
    pub async fn serve(self, listener: TcpListener) -> Result<()> {
        let local = listener.local_addr()?;
        info!(url = %format!("http://{local}/"), "server ready");

        axum::serve(
            listener,
            self.into_router()
                .into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .with_context(|| "Axum server encountered an error")?;
        Ok(())
    }
}

async fn rate_limit_middleware(limiter: Arc<RateLimiter>, req: Request, next: Next) -> Response {
    let client = client_key(req.extensions());
    let decision = limiter.check(&client);

    if !decision.allowed {
        warn!(client = %client, "rate limit exceeded");
        let mut response = error_response(limiter.rejection(&decision));
        let headers = response.headers_mut();
        apply_rate_headers(headers, &decision);
        headers.insert(header::RETRY_AFTER, HeaderValue::from(reset_secs(&decision)));
        return response;
    }

    let mut response = next.run(req).await;
    apply_rate_headers(response.headers_mut(), &decision);
    response
}

fn reset_secs(decision: &RateDecision) -> u64 {
    decision.reset_after.as_millis().div_ceil(1000) as u64
}

fn apply_rate_headers(headers: &mut HeaderMap, decision: &RateDecision) {
    headers.insert("x-ratelimit-limit", HeaderValue::from(decision.limit));
    headers.insert("x-ratelimit-remaining", HeaderValue::from(decision.remaining));
    headers.insert("x-ratelimit-reset", HeaderValue::from(reset_secs(decision)));
}

impl HttpAdapter for AxumAdapter {
    fn new() -> Self {
        Self {
            instance: Router::new(),
            not_found: None,
            rate_limiter: None,
        }
    }

    fn add_graphql_route(&mut self, path: &str, route: Arc<GraphQLRoute>) {
        let route_handler = move |req: Request<Body>| {
            let route = route.clone();
            async move {
                match AxumRouteAdapter::handle_request(req, route).await {
                    Ok(response) => response,
                    Err(e) => error_response(request_error(&e)),
                }
            }
        };

        self.instance = self
            .instance
            .clone()
            .route(path, get(route_handler.clone()).post(route_handler));
    }

    fn add_page(&mut self, path: &str, html: String) {
        self.instance = self.instance.clone().route(
            path,
            get(move || {
                let html = html.clone();
                async move { Html(html) }
            }),
        );
    }

    fn set_not_found(&mut self, body: ErrorBody) {
        self.not_found = Some(body);
    }

    fn use_rate_limit(&mut self, limiter: Arc<RateLimiter>) {
        self.rate_limiter = Some(limiter);
    }

    async fn listen(self, port: u16, hostname: &str) -> Result<()> {
        let addr = format!("{}:{}", hostname, port);
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {addr}"))?;

        self.serve(listener).await
    }
}
