//! Derived dashboard views.
//!
//! Pure functions over the in-memory lists: status counts for the stat
//! cards, the activity-to-prospect join and the prospect picker options.

mod activity_view;
mod stats;

pub use activity_view::{
    prospect_choices, resolve_prospect_names, ActivityRow, ProspectChoice, ProspectIndex,
    ProspectLabel, UNKNOWN_PROSPECT,
};
pub use stats::ProspectStats;
