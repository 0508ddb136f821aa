//! Web layer for the trip planner.
//!
//! Provides the trip form, the planning endpoint and city suggestions.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
