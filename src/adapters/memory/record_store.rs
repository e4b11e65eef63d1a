//! In-Memory Record Store Adapter
//!
//! Holds both collections in memory and mints identifiers on insert, the
//! way the hosted store does. Can be switched offline to exercise failure
//! paths.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::activity::{Activity, NewActivity};
use crate::domain::foundation::{ActivityId, ProspectId};
use crate::domain::prospect::{NewProspect, Prospect};
use crate::ports::{ActivityStore, ProspectStore, StoreError};

/// In-memory storage for prospects and activities.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    prospects: Arc<RwLock<Vec<Prospect>>>,
    activities: Arc<RwLock<Vec<Activity>>>,
    offline: Arc<AtomicBool>,
}

impl InMemoryRecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the store with existing rows.
    pub fn with_records(prospects: Vec<Prospect>, activities: Vec<Activity>) -> Self {
        Self {
            prospects: Arc::new(RwLock::new(prospects)),
            activities: Arc::new(RwLock::new(activities)),
            offline: Arc::new(AtomicBool::new(false)),
        }
    }

    /// While offline every call fails with `StoreError::Transport`.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn prospect_count(&self) -> usize {
        self.prospects.read().await.len()
    }

    pub async fn activity_count(&self) -> usize {
        self.activities.read().await.len()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::transport("in-memory store is offline"));
        }
        Ok(())
    }
}

#[async_trait]
impl ProspectStore for InMemoryRecordStore {
    async fn list_all(&self) -> Result<Vec<Prospect>, StoreError> {
        self.ensure_online()?;
        Ok(self.prospects.read().await.clone())
    }

    async fn insert(&self, prospect: &NewProspect) -> Result<Prospect, StoreError> {
        self.ensure_online()?;
        let stored = prospect.clone().into_prospect(ProspectId::new());
        self.prospects.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: ProspectId) -> Result<usize, StoreError> {
        self.ensure_online()?;
        let mut rows = self.prospects.write().await;
        let before = rows.len();
        rows.retain(|p| p.id != id);
        Ok(before - rows.len())
    }
}

#[async_trait]
impl ActivityStore for InMemoryRecordStore {
    async fn list_all(&self) -> Result<Vec<Activity>, StoreError> {
        self.ensure_online()?;
        Ok(self.activities.read().await.clone())
    }

    async fn insert(&self, activity: &NewActivity) -> Result<Activity, StoreError> {
        self.ensure_online()?;
        let stored = activity.clone().into_activity(ActivityId::new());
        self.activities.write().await.push(stored.clone());
        Ok(stored)
    }

    async fn delete(&self, id: ActivityId) -> Result<usize, StoreError> {
        self.ensure_online()?;
        let mut rows = self.activities.write().await;
        let before = rows.len();
        rows.retain(|a| a.id != id);
        Ok(before - rows.len())
    }
}
