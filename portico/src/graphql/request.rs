use serde::Deserialize;
use serde_json::Value;

use crate::http_helpers::{Body, HttpRequest};

#[derive(Debug, thiserror::Error)]
pub enum GraphQLRequestError {
    #[error("Must provide query string.")]
    MissingQuery,

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Variables are invalid JSON: {0}")]
    InvalidVariables(String),
}

/// Transport-neutral GraphQL operation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQLRequest {
    pub query: String,
    #[serde(default)]
    pub operation_name: Option<String>,
    #[serde(default)]
    pub variables: Option<Value>,
}

impl GraphQLRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            operation_name: None,
            variables: None,
        }
    }

    /// Reads the operation from the query string on `GET` and from the body otherwise.
    pub fn from_http(req: &HttpRequest) -> Result<Self, GraphQLRequestError> {
        if req.is_get() {
            Self::from_query_params(req)
        } else {
            Self::from_body(&req.body)
        }
    }

    fn from_query_params(req: &HttpRequest) -> Result<Self, GraphQLRequestError> {
        let query = req
            .query_params
            .get("query")
            .filter(|q| !q.is_empty())
            .ok_or(GraphQLRequestError::MissingQuery)?;

        let variables = req
            .query_params
            .get("variables")
            .map(|raw| serde_json::from_str::<Value>(raw))
            .transpose()
            .map_err(|e| GraphQLRequestError::InvalidVariables(e.to_string()))?;

        Ok(Self {
            query: query.clone(),
            operation_name: req.query_params.get("operationName").cloned(),
            variables,
        })
    }

    fn from_body(body: &Body) -> Result<Self, GraphQLRequestError> {
        let value = match body {
            Body::Json(value) => value.clone(),
            Body::Text(text) if text.trim().is_empty() => {
                return Err(GraphQLRequestError::MissingQuery);
            }
            Body::Text(_) | Body::Html(_) => {
                return Err(GraphQLRequestError::InvalidBody(
                    "expected a JSON object".to_string(),
                ));
            }
        };

        if value.get("query").is_none_or(Value::is_null) {
            return Err(GraphQLRequestError::MissingQuery);
        }

        serde_json::from_value(value).map_err(|e| GraphQLRequestError::InvalidBody(e.to_string()))
    }
}
