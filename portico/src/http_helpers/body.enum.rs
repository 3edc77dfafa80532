use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
pub enum Body {
    Text(String),
    Json(Value),
    Html(String),
}

impl Body {
    pub fn content_type(&self) -> &'static str {
        match self {
            Body::Text(_) => "text/plain; charset=utf-8",
            Body::Json(_) => "application/json; charset=utf-8",
            Body::Html(_) => "text/html; charset=utf-8",
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Body::Text(text) | Body::Html(text) => text.is_empty(),
            Body::Json(json) => json.is_null(),
        }
    }
}

impl Default for Body {
    fn default() -> Self {
        Body::Text(String::new())
    }
}
