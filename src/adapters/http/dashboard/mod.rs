//! Dashboard HTTP adapter module.
//!
//! JSON API over one shared `Dashboard`: session, records, derived views,
//! drafts and export downloads.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::ErrorResponse;
pub use handlers::DashboardAppState;
pub use routes::dashboard_routes;
