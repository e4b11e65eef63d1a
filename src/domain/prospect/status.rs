//! ProspectStatus enum for qualifying a sales lead.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Qualification status of a prospect.
///
/// Wire values are the ones the record store holds (`baru` for new).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ProspectStatus {
    #[default]
    #[serde(rename = "baru")]
    New,
    #[serde(rename = "pending")]
    Pending,
    #[serde(rename = "hot")]
    Hot,
    #[serde(rename = "deal")]
    Deal,
}

impl ProspectStatus {
    /// All statuses, in form order.
    pub const ALL: [ProspectStatus; 4] = [
        ProspectStatus::New,
        ProspectStatus::Pending,
        ProspectStatus::Hot,
        ProspectStatus::Deal,
    ];

    /// Value as stored in the `status` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProspectStatus::New => "baru",
            ProspectStatus::Pending => "pending",
            ProspectStatus::Hot => "hot",
            ProspectStatus::Deal => "deal",
        }
    }
}

impl fmt::Display for ProspectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ProspectStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProspectStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("status", format!("unknown status '{}'", s))
            })
    }
}
