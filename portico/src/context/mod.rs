mod context_builder;
mod request_context;

pub use context_builder::{ContextBuilder, ContextError};
pub use request_context::RequestContext;
