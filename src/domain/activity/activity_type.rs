//! ActivityType enum: the kind of follow-up that was logged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Kind of interaction logged against a prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityType {
    #[serde(rename = "Follow-up Telepon")]
    CallFollowUp,
    #[serde(rename = "Meeting Offline")]
    OfflineMeeting,
    #[serde(rename = "Penawaran Proposal")]
    Proposal,
    #[serde(rename = "Presentasi Produk")]
    ProductDemo,
}

impl ActivityType {
    pub const ALL: [ActivityType; 4] = [
        ActivityType::CallFollowUp,
        ActivityType::OfflineMeeting,
        ActivityType::Proposal,
        ActivityType::ProductDemo,
    ];

    /// Value as stored in the `activity_type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityType::CallFollowUp => "Follow-up Telepon",
            ActivityType::OfflineMeeting => "Meeting Offline",
            ActivityType::Proposal => "Penawaran Proposal",
            ActivityType::ProductDemo => "Presentasi Produk",
        }
    }
}

impl fmt::Display for ActivityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ActivityType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ActivityType::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format(
                    "activity_type",
                    format!("unknown activity type '{}'", s),
                )
            })
    }
}
