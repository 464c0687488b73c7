//! API module for the readiness dashboard
//!
//! Serves the map feed and quartile summary as JSON for a browser renderer.

pub mod handlers;
pub mod service;

pub use handlers::create_router;
pub use service::DashboardService;
