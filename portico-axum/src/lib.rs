//! Axum transport for portico.
//!
//! ```rust,ignore
//! let app = PorticoFactory::new(Collaborators::in_memory())
//!     .create(ModeConfig::development(), &module, AxumAdapter::new())
//!     .await?;
//! app.listen().await?;
//! ```

mod axum_adapter;
mod axum_route_adapter;

pub use axum_adapter::AxumAdapter;
pub use axum_route_adapter::{AxumRouteAdapter, BODY_LIMIT};
