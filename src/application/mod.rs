//! Application layer - the dashboard service and its local state.
//!
//! `Dashboard` orchestrates domain operations and coordinates the ports;
//! `DashboardState` is the in-memory mirror it keeps in step with the store.

mod dashboard;
mod state;

pub use dashboard::{
    Collection, Dashboard, DashboardError, ExportServices, LoadFailure, LoadReport,
};
pub use state::DashboardState;
