use serde_json::Value;

use super::{Body, ErrorBody};

#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub body: Option<Body>,
    pub status: u16,
    pub headers: Vec<(String, String)>,
}

impl HttpResponse {
    pub fn new() -> Self {
        Self {
            body: None,
            status: 200,
            headers: vec![],
        }
    }

    pub fn json(status: u16, value: Value) -> Self {
        Self {
            body: Some(Body::Json(value)),
            status,
            headers: vec![],
        }
    }

    pub fn html(html: String) -> Self {
        Self {
            body: Some(Body::Html(html)),
            ..Self::new()
        }
    }

    pub fn error(error: ErrorBody) -> Self {
        let status = error.status_code;
        // ErrorBody only holds strings and an integer
        let value = serde_json::to_value(&error).unwrap_or(Value::Null);
        Self::json(status, value)
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

impl Default for HttpResponse {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ErrorBody> for HttpResponse {
    fn from(error: ErrorBody) -> Self {
        Self::error(error)
    }
}
