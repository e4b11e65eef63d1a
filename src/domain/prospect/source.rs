//! LeadSource enum: where a prospect came from.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Acquisition channel of a prospect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LeadSource {
    #[serde(rename = "Instagram")]
    Social,
    #[serde(rename = "Email Campaign")]
    Campaign,
    #[serde(rename = "Kontak Langsung")]
    Direct,
    #[serde(rename = "Referensi")]
    Referral,
}

impl LeadSource {
    pub const ALL: [LeadSource; 4] = [
        LeadSource::Social,
        LeadSource::Campaign,
        LeadSource::Direct,
        LeadSource::Referral,
    ];

    /// Value as stored in the `source` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            LeadSource::Social => "Instagram",
            LeadSource::Campaign => "Email Campaign",
            LeadSource::Direct => "Kontak Langsung",
            LeadSource::Referral => "Referensi",
        }
    }
}

impl fmt::Display for LeadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for LeadSource {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LeadSource::ALL
            .into_iter()
            .find(|source| source.as_str() == s)
            .ok_or_else(|| {
                ValidationError::invalid_format("source", format!("unknown source '{}'", s))
            })
    }
}
