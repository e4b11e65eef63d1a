//! Activity record, its staged draft and the insert payload.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ActivityType;
use crate::domain::foundation::wire::{empty_as_none, null_as_empty};
use crate::domain::foundation::{ActivityId, ProspectId};

/// A logged interaction, referencing its prospect by identifier.
///
/// `prospect_id` is a weak lookup key: nothing guarantees the prospect
/// still exists, and deleting a prospect leaves its activities in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: ActivityId,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub prospect_id: Option<ProspectId>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub activity_type: Option<ActivityType>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub notes: String,
    pub date: NaiveDate,
}

/// Staged input for an activity that has not been persisted yet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActivityDraft {
    #[serde(deserialize_with = "empty_as_none")]
    pub prospect_id: Option<ProspectId>,
    #[serde(deserialize_with = "empty_as_none")]
    pub activity_type: Option<ActivityType>,
    pub notes: String,
    /// `None` means "the day the activity is submitted".
    #[serde(deserialize_with = "empty_as_none")]
    pub date: Option<NaiveDate>,
}

/// Insert payload for an activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewActivity {
    pub prospect_id: Option<ProspectId>,
    pub activity_type: Option<ActivityType>,
    pub notes: String,
    pub date: NaiveDate,
}

impl NewActivity {
    /// Builds the payload, dating it `today` when the draft has no date.
    pub fn from_draft(draft: &ActivityDraft, today: NaiveDate) -> Self {
        Self {
            prospect_id: draft.prospect_id,
            activity_type: draft.activity_type,
            notes: draft.notes.clone(),
            date: draft.date.unwrap_or(today),
        }
    }

    /// The stored record once the store has assigned an identifier.
    pub fn into_activity(self, id: ActivityId) -> Activity {
        Activity {
            id,
            prospect_id: self.prospect_id,
            activity_type: self.activity_type,
            notes: self.notes,
            date: self.date,
        }
    }
}
