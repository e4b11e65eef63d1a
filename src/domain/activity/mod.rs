//! Activity domain module.
//!
//! Activities log follow-up interactions (calls, meetings, proposals, demos)
//! and point at a prospect through a weak identifier reference.

mod activity_type;
mod record;

pub use activity_type::ActivityType;
pub use record::{Activity, ActivityDraft, NewActivity};
