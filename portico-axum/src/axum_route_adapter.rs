use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use axum::{
    body::to_bytes,
    extract::ConnectInfo,
    http::{header, Extensions, HeaderMap, HeaderName, HeaderValue, Request, Response, StatusCode},
};
use http_body_util::LengthLimitError;
use portico::{Body as PorticoBody, ErrorBody, Headers, HttpRequest, HttpResponse, RouteAdapter};

/// Largest request body accepted, 1 MiB.
pub const BODY_LIMIT: usize = 1024 * 1024;

pub struct AxumRouteAdapter;

/// Peer IP when the server was started with connect info, otherwise `"anonymous"`.
pub(crate) fn client_key(extensions: &Extensions) -> String {
    extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "anonymous".to_string())
}

/// 413 when the body went over [`BODY_LIMIT`], 400 for any other unreadable request.
pub(crate) fn request_error(error: &anyhow::Error) -> ErrorBody {
    let message = format!("{error:#}");
    if error.chain().any(|cause| cause.is::<LengthLimitError>()) {
        ErrorBody::new(413, "Payload Too Large", message)
    } else {
        ErrorBody::bad_request(message)
    }
}

pub(crate) fn error_response(error: ErrorBody) -> Response<axum::body::Body> {
    AxumRouteAdapter::adapt_response(HttpResponse::error(error)).unwrap_or_else(|_| {
        let mut res = Response::new(axum::body::Body::empty());
        *res.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        res
    })
}

impl RouteAdapter for AxumRouteAdapter {
    type Request = Request<axum::body::Body>;
    type Response = Response<axum::body::Body>;

    async fn adapt_request(request: Self::Request) -> Result<HttpRequest> {
        let (parts, body) = request.into_parts();
        let body_bytes = to_bytes(body, BODY_LIMIT)
            .await
            .context("Failed to read request body")?;

        let body = if body_bytes.is_empty() {
            PorticoBody::default()
        } else if let Ok(json) = serde_json::from_slice(&body_bytes) {
            PorticoBody::Json(json)
        } else {
            PorticoBody::Text(String::from_utf8_lossy(&body_bytes).into_owned())
        };

        let headers: Headers = parts
            .headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_str().unwrap_or("").to_string()))
            .collect();

        Ok(
            HttpRequest::new(parts.method.as_str(), parts.uri.to_string(), headers, body)
                .with_client_key(client_key(&parts.extensions)),
        )
    }

    fn adapt_response(response: HttpResponse) -> Result<Self::Response> {
        let status =
            StatusCode::from_u16(response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let mut headers = HeaderMap::new();
        let body = match response.body {
            Some(body) => {
                headers.insert(
                    header::CONTENT_TYPE,
                    HeaderValue::from_static(body.content_type()),
                );
                match body {
                    PorticoBody::Text(text) | PorticoBody::Html(text) => axum::body::Body::from(text),
                    PorticoBody::Json(json) => {
                        let vec = serde_json::to_vec(&json)
                            .map_err(|e| anyhow!("Failed to serialize JSON: {}", e))?;
                        axum::body::Body::from(vec)
                    }
                }
            }
            None => axum::body::Body::empty(),
        };

        // append, not insert: a response may carry several Set-Cookie headers
        for (k, v) in &response.headers {
            if let (Ok(name), Ok(value)) = (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                headers.append(name, value);
            }
        }

        let mut res = Response::builder()
            .status(status)
            .body(body)
            .map_err(|e| anyhow!("Failed to build response: {}", e))?;

        res.headers_mut().extend(headers);

        Ok(res)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_adapt_request() {
        let mut request = Request::builder()
            .method("POST")
            .uri("/graphql?x=1")
            .header("Cookie", "a=1; b=2")
            .header("User-Agent", "tests")
            .body(axum::body::Body::from(r#"{"query":"{ hello }"}"#))
            .unwrap();
        request
            .extensions_mut()
            .insert(ConnectInfo(SocketAddr::from(([10, 1, 2, 3], 5555))));

        let req = AxumRouteAdapter::adapt_request(request).await.unwrap();
        assert_eq!(req.method, "POST");
        assert_eq!(req.query_params.get("x").map(String::as_str), Some("1"));
        assert_eq!(req.header("user-agent"), Some("tests"));
        assert_eq!(req.cookies().get("b"), Some("2"));
        assert_eq!(req.body, PorticoBody::Json(json!({ "query": "{ hello }" })));
        assert_eq!(req.client_key.as_deref(), Some("10.1.2.3"));
    }

    #[tokio::test]
    async fn test_adapt_request_without_connect_info() {
        let request = Request::builder()
            .uri("/")
            .body(axum::body::Body::from("plain"))
            .unwrap();

        let req = AxumRouteAdapter::adapt_request(request).await.unwrap();
        assert_eq!(req.body, PorticoBody::Text("plain".to_string()));
        assert_eq!(req.client_key.as_deref(), Some("anonymous"));
    }

    #[tokio::test]
    async fn test_oversized_body_is_payload_too_large() {
        let request = Request::builder()
            .method("POST")
            .uri("/graphql")
            .body(axum::body::Body::from(vec![b'a'; BODY_LIMIT + 1]))
            .unwrap();

        let err = AxumRouteAdapter::adapt_request(request).await.unwrap_err();
        let body = request_error(&err);
        assert_eq!(body.status_code, 413);
        assert_eq!(body.error, "Payload Too Large");
        assert!(body.message.starts_with("Failed to read request body"));
    }

    #[test]
    fn test_other_errors_are_bad_request() {
        let body = request_error(&anyhow!("Failed to read request body: reset"));
        assert_eq!(body.status_code, 400);
        assert_eq!(body.message, "Failed to read request body: reset");
    }

    #[test]
    fn test_adapt_response_keeps_every_cookie() {
        let response = HttpResponse::json(200, json!({ "data": null }))
            .with_header("set-cookie", "a=1")
            .with_header("set-cookie", "b=2");

        let res = AxumRouteAdapter::adapt_response(response).unwrap();
        let cookies: Vec<&str> = res
            .headers()
            .get_all(header::SET_COOKIE)
            .iter()
            .map(|v| v.to_str().unwrap())
            .collect();
        assert_eq!(cookies, vec!["a=1", "b=2"]);
        assert_eq!(
            res.headers()[header::CONTENT_TYPE],
            "application/json; charset=utf-8"
        );
    }
}
