//! Postcheck API Module
//!
//! HTTP surface for the lookup and address-check operations.

pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use routes::create_router;
pub use types::*;
