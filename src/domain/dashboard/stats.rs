use serde::Serialize;

use crate::domain::prospect::{Prospect, ProspectStatus};

/// Prospect counts shown on the dashboard stat cards.
///
/// Recomputed from the in-memory list on every read; nothing is cached.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProspectStats {
    pub total: usize,
    pub new: usize,
    pub pending: usize,
    pub hot: usize,
    pub deal: usize,
}

impl ProspectStats {
    pub fn from_prospects(prospects: &[Prospect]) -> Self {
        prospects
            .iter()
            .fold(Self::default(), |mut stats, prospect| {
                stats.total += 1;
                match prospect.status {
                    ProspectStatus::New => stats.new += 1,
                    ProspectStatus::Pending => stats.pending += 1,
                    ProspectStatus::Hot => stats.hot += 1,
                    ProspectStatus::Deal => stats.deal += 1,
                }
                stats
            })
    }

    /// Count for a single status.
    pub fn count(&self, status: ProspectStatus) -> usize {
        match status {
            ProspectStatus::New => self.new,
            ProspectStatus::Pending => self.pending,
            ProspectStatus::Hot => self.hot,
            ProspectStatus::Deal => self.deal,
        }
    }
}

#[cfg(test)]
#[path = "stats_test.rs"]
mod stats_test;
