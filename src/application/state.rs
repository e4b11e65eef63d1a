//! In-memory mirror of the two collections plus the staged drafts.
//!
//! Every mutation here is local and infallible. `Dashboard` decides when to
//! apply them: only after the record store has confirmed the change.

use crate::domain::activity::{Activity, ActivityDraft};
use crate::domain::dashboard::{
    prospect_choices, resolve_prospect_names, ActivityRow, ProspectChoice, ProspectStats,
};
use crate::domain::foundation::{ActivityId, ProspectId};
use crate::domain::prospect::{Prospect, ProspectDraft};

/// Lists in display order (newest first after a create) and the two drafts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardState {
    prospects: Vec<Prospect>,
    activities: Vec<Activity>,
    prospect_draft: ProspectDraft,
    activity_draft: ActivityDraft,
}

impl DashboardState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prospects(&self) -> &[Prospect] {
        &self.prospects
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    pub fn replace_prospects(&mut self, prospects: Vec<Prospect>) {
        self.prospects = prospects;
    }

    pub fn replace_activities(&mut self, activities: Vec<Activity>) {
        self.activities = activities;
    }

    pub fn prepend_prospect(&mut self, prospect: Prospect) {
        self.prospects.insert(0, prospect);
    }

    pub fn prepend_activity(&mut self, activity: Activity) {
        self.activities.insert(0, activity);
    }

    /// Removes every prospect with this id. Returns whether any was removed.
    pub fn remove_prospect(&mut self, id: ProspectId) -> bool {
        let before = self.prospects.len();
        self.prospects.retain(|p| p.id != id);
        self.prospects.len() != before
    }

    pub fn remove_activity(&mut self, id: ActivityId) -> bool {
        let before = self.activities.len();
        self.activities.retain(|a| a.id != id);
        self.activities.len() != before
    }

    pub fn prospect_draft(&self) -> &ProspectDraft {
        &self.prospect_draft
    }

    pub fn set_prospect_draft(&mut self, draft: ProspectDraft) {
        self.prospect_draft = draft;
    }

    pub fn reset_prospect_draft(&mut self) {
        self.prospect_draft = ProspectDraft::default();
    }

    pub fn activity_draft(&self) -> &ActivityDraft {
        &self.activity_draft
    }

    pub fn set_activity_draft(&mut self, draft: ActivityDraft) {
        self.activity_draft = draft;
    }

    pub fn reset_activity_draft(&mut self) {
        self.activity_draft = ActivityDraft::default();
    }

    /// Drops both lists and both drafts.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn stats(&self) -> ProspectStats {
        ProspectStats::from_prospects(&self.prospects)
    }

    pub fn activity_rows(&self) -> Vec<ActivityRow> {
        resolve_prospect_names(&self.activities, &self.prospects)
    }

    pub fn prospect_choices(&self) -> Vec<ProspectChoice> {
        prospect_choices(&self.prospects)
    }
}
