//! Prospect domain module.
//!
//! A prospect is a sales lead with contact and qualification metadata.
//! Status and source are closed sets; unknown wire values fail at decode.

mod record;
mod source;
mod status;

pub use record::{NewProspect, Prospect, ProspectDraft};
pub use source::LeadSource;
pub use status::ProspectStatus;
