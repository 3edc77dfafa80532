use serde::{Deserialize, Serialize};

/// Transport-level error payload, e.g.
/// `{"message":"Route not found","error":"Not Found","statusCode":404}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub message: String,
    pub error: String,
    pub status_code: u16,
}

impl ErrorBody {
    pub fn new(status_code: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: error.into(),
            status_code,
        }
    }

    pub fn not_found() -> Self {
        Self::new(404, "Not Found", "Route not found")
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, "Bad Request", message)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(500, "Internal Server Error", message)
    }

    pub fn too_many_requests(message: impl Into<String>) -> Self {
        Self::new(429, "Too Many Requests", message)
    }
}
