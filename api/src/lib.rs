//! # TaxEase API
//!
//! HTTP layer of the TaxEase backend: cookie-based authentication,
//! auth and profile endpoints, and the declarative route table in
//! [`app`]. Business rules live in `te_core`; this crate adapts them
//! to actix-web.

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod state;

pub use app::configure_app;
pub use state::AppState;
