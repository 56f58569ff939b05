//! HTTP surface for Tagwatch.
//!
//! `router` wires the two endpoints onto an `AppState`; the `tagwatch`
//! binary builds that state from config and serves it.

mod error;
mod routes;
mod state;

pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
