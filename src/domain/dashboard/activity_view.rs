use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

use crate::domain::activity::Activity;
use crate::domain::foundation::ProspectId;
use crate::domain::prospect::Prospect;

/// Display text for an activity whose prospect cannot be found.
pub const UNKNOWN_PROSPECT: &str = "N/A";

/// Name of the prospect an activity points at, or the unknown sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ProspectLabel {
    Known(String),
    Unknown,
}

impl ProspectLabel {
    pub fn is_unknown(&self) -> bool {
        matches!(self, ProspectLabel::Unknown)
    }

    pub fn as_str(&self) -> &str {
        match self {
            ProspectLabel::Known(name) => name,
            ProspectLabel::Unknown => UNKNOWN_PROSPECT,
        }
    }
}

impl fmt::Display for ProspectLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An activity joined with its prospect's name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityRow {
    #[serde(flatten)]
    pub activity: Activity,
    pub prospect_name: ProspectLabel,
}

/// Prospects keyed by identifier, built once per render.
///
/// When identifiers repeat, the first prospect in list order wins.
#[derive(Debug)]
pub struct ProspectIndex<'a> {
    by_id: HashMap<ProspectId, &'a Prospect>,
}

impl<'a> ProspectIndex<'a> {
    pub fn new(prospects: &'a [Prospect]) -> Self {
        let mut by_id = HashMap::with_capacity(prospects.len());
        for prospect in prospects {
            by_id.entry(prospect.id).or_insert(prospect);
        }
        Self { by_id }
    }

    pub fn get(&self, id: &ProspectId) -> Option<&'a Prospect> {
        self.by_id.get(id).copied()
    }

    pub fn label_for(&self, reference: Option<ProspectId>) -> ProspectLabel {
        reference
            .and_then(|id| self.get(&id))
            .map(|prospect| ProspectLabel::Known(prospect.name.clone()))
            .unwrap_or(ProspectLabel::Unknown)
    }
}

/// Joins each activity to the name of the prospect it references.
pub fn resolve_prospect_names(activities: &[Activity], prospects: &[Prospect]) -> Vec<ActivityRow> {
    let index = ProspectIndex::new(prospects);
    activities
        .iter()
        .map(|activity| ActivityRow {
            activity: activity.clone(),
            prospect_name: index.label_for(activity.prospect_id),
        })
        .collect()
}

/// Option offered when picking the prospect for a new activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProspectChoice {
    pub id: ProspectId,
    pub label: String,
}

pub fn prospect_choices(prospects: &[Prospect]) -> Vec<ProspectChoice> {
    prospects
        .iter()
        .map(|prospect| ProspectChoice {
            id: prospect.id,
            label: format!("{} - {}", prospect.name, prospect.company),
        })
        .collect()
}

#[cfg(test)]
#[path = "activity_view_test.rs"]
mod activity_view_test;
