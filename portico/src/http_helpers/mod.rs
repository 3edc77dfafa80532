#[path = "body.enum.rs"]
mod body;
pub use self::body::Body;

#[path = "http_response.struct.rs"]
mod http_response;
pub use self::http_response::HttpResponse;

#[path = "http_request.struct.rs"]
mod http_request;
pub use self::http_request::HttpRequest;

mod error_body;
pub use self::error_body::ErrorBody;

mod headers;
pub use self::headers::Headers;
