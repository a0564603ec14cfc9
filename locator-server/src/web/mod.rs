//! Web layer for the station locator.
//!
//! Provides HTTP endpoints for coordinate and address searches, address
//! suggestions, and a small HTML front end.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{AppError, create_router};
pub use state::AppState;
pub use templates::*;
