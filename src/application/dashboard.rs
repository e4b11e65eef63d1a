//! Dashboard - the session-scoped service behind every user action.
//!
//! A `Dashboard` owns one session and its `DashboardState`. Commands check
//! the session's capabilities, round-trip to the record store and only then
//! touch local state, so a failed call never leaves the lists out of step
//! with the store.

use std::fmt;
use std::sync::Arc;

use thiserror::Error;

use super::state::DashboardState;
use crate::domain::access::Action;
use crate::domain::activity::{Activity, ActivityDraft, NewActivity};
use crate::domain::dashboard::{ActivityRow, ProspectChoice, ProspectStats};
use crate::domain::foundation::{
    ActivityId, ErrorCode, InvalidRole, ProspectId, Role, ValidationError,
};
use crate::domain::prospect::{NewProspect, Prospect, ProspectDraft};
use crate::domain::report::{
    marketing_workbook, prospect_list_document, DEFAULT_DOCUMENT_TITLE, DOCUMENT_BASE_FILENAME,
    WORKBOOK_BASE_FILENAME,
};
use crate::domain::session::Session;
use crate::ports::{
    ActivityStore, ArtifactStorage, Clock, DocumentRenderer, ExportError, ExportFormat,
    ExportedDocument, ProspectStore, SavedArtifact, StoreError, WorkbookRenderer,
};

/// Errors returned by dashboard commands.
#[derive(Debug, Clone, Error)]
pub enum DashboardError {
    #[error("No role is signed in")]
    NotSignedIn,

    #[error("Role '{role}' may not {action} records")]
    Forbidden { role: Role, action: Action },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidRole(#[from] InvalidRole),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

impl DashboardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            DashboardError::NotSignedIn => ErrorCode::Unauthorized,
            DashboardError::Forbidden { .. } => ErrorCode::Forbidden,
            DashboardError::Validation(_) => ErrorCode::ValidationFailed,
            DashboardError::InvalidRole(_) => ErrorCode::InvalidRole,
            DashboardError::Store(err) => err.code(),
            DashboardError::Export(_) => ErrorCode::ExportFailed,
        }
    }
}

/// The two record collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Prospects,
    Activities,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Collection::Prospects => write!(f, "prospects"),
            Collection::Activities => write!(f, "activities"),
        }
    }
}

/// A collection that failed to load at sign-in.
#[derive(Debug, Clone)]
pub struct LoadFailure {
    pub collection: Collection,
    pub error: StoreError,
}

/// Outcome of the initial load after sign-in.
///
/// Sign-in itself never fails on a store error; the dashboard opens with
/// whatever loaded and the failures are listed here.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    pub prospects: usize,
    pub activities: usize,
    pub failures: Vec<LoadFailure>,
}

impl LoadReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Renderers and storage used by the export commands.
#[derive(Clone)]
pub struct ExportServices {
    pub document: Arc<dyn DocumentRenderer>,
    pub workbook: Arc<dyn WorkbookRenderer>,
    pub artifacts: Arc<dyn ArtifactStorage>,
    /// Title line of the prospect list document.
    pub document_title: String,
}

impl ExportServices {
    pub fn new(
        document: Arc<dyn DocumentRenderer>,
        workbook: Arc<dyn WorkbookRenderer>,
        artifacts: Arc<dyn ArtifactStorage>,
    ) -> Self {
        Self {
            document,
            workbook,
            artifacts,
            document_title: DEFAULT_DOCUMENT_TITLE.to_string(),
        }
    }

    pub fn with_document_title(mut self, title: impl Into<String>) -> Self {
        self.document_title = title.into();
        self
    }
}

/// One user's dashboard: session, local lists and drafts, and the ports.
pub struct Dashboard {
    prospect_store: Arc<dyn ProspectStore>,
    activity_store: Arc<dyn ActivityStore>,
    exports: ExportServices,
    clock: Arc<dyn Clock>,
    session: Option<Session>,
    state: DashboardState,
}

impl Dashboard {
    pub fn new(
        prospect_store: Arc<dyn ProspectStore>,
        activity_store: Arc<dyn ActivityStore>,
        exports: ExportServices,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            prospect_store,
            activity_store,
            exports,
            clock,
            session: None,
            state: DashboardState::new(),
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Session
    // ───────────────────────────────────────────────────────────────

    /// Opens a session for `role` and loads both collections.
    ///
    /// Any previous session and its local state are discarded first.
    pub async fn sign_in(&mut self, role: Role) -> LoadReport {
        self.state.clear();
        self.session = Some(Session::new(role));
        tracing::info!("Signed in as {}", role);

        let mut report = LoadReport::default();
        match self.reload_prospects().await {
            Ok(count) => report.prospects = count,
            Err(error) => report.failures.push(LoadFailure {
                collection: Collection::Prospects,
                error,
            }),
        }
        match self.reload_activities().await {
            Ok(count) => report.activities = count,
            Err(error) => report.failures.push(LoadFailure {
                collection: Collection::Activities,
                error,
            }),
        }
        report
    }

    /// Parses a raw role string, then signs in.
    ///
    /// # Errors
    ///
    /// `InvalidRole` for anything outside the three known roles.
    pub async fn sign_in_as(&mut self, raw_role: &str) -> Result<LoadReport, DashboardError> {
        let role: Role = raw_role.parse()?;
        Ok(self.sign_in(role).await)
    }

    /// Ends the session and clears lists and drafts.
    pub fn sign_out(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::info!("Signed out {}", session.role());
        }
        self.state.clear();
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn require_session(&self) -> Result<Session, DashboardError> {
        self.session.ok_or(DashboardError::NotSignedIn)
    }

    fn authorize(&self, action: Action) -> Result<Session, DashboardError> {
        let session = self.require_session()?;
        if !session.capabilities().allows(action) {
            tracing::warn!("Role {} denied {}", session.role(), action);
            return Err(DashboardError::Forbidden {
                role: session.role(),
                action,
            });
        }
        Ok(session)
    }

    // ───────────────────────────────────────────────────────────────
    // Prospects
    // ───────────────────────────────────────────────────────────────

    /// Refreshes the prospect list from the store.
    ///
    /// On failure the local list is left as it was.
    pub async fn list_prospects(&mut self) -> Result<&[Prospect], DashboardError> {
        self.require_session()?;
        self.reload_prospects().await?;
        Ok(self.state.prospects())
    }

    async fn reload_prospects(&mut self) -> Result<usize, StoreError> {
        match self.prospect_store.list_all().await {
            Ok(rows) => {
                tracing::debug!("Loaded {} prospects", rows.len());
                let count = rows.len();
                self.state.replace_prospects(rows);
                Ok(count)
            }
            Err(err) => {
                tracing::warn!("Failed to load prospects: {}", err);
                Err(err)
            }
        }
    }

    /// Stages `draft` and submits it.
    pub async fn create_prospect(&mut self, draft: ProspectDraft) -> Result<Prospect, DashboardError> {
        self.authorize(Action::Create)?;
        self.state.set_prospect_draft(draft);
        self.submit_prospect_draft().await
    }

    /// Inserts the staged prospect draft, owned by the acting role.
    ///
    /// On success the new row is prepended and the draft reset. On failure
    /// the draft stays staged and the list is untouched.
    pub async fn submit_prospect_draft(&mut self) -> Result<Prospect, DashboardError> {
        let session = self.authorize(Action::Create)?;
        let new = NewProspect::from_draft(self.state.prospect_draft(), session.role())?;

        match self.prospect_store.insert(&new).await {
            Ok(stored) => {
                tracing::info!("Created prospect {} ({})", stored.id, stored.name);
                self.state.prepend_prospect(stored.clone());
                self.state.reset_prospect_draft();
                Ok(stored)
            }
            Err(err) => {
                tracing::warn!("Failed to create prospect: {}", err);
                Err(err.into())
            }
        }
    }

    /// Deletes a prospect in the store, then locally.
    ///
    /// Returns whether the row was present in the local list. Activities
    /// that reference it are kept. A listed row the store did not remove
    /// stays listed and the call fails with `StoreError::NothingDeleted`.
    pub async fn delete_prospect(&mut self, id: ProspectId) -> Result<bool, DashboardError> {
        self.authorize(Action::Delete)?;
        match self.prospect_store.delete(id).await {
            Ok(0) if self.state.prospects().iter().any(|p| p.id == id) => {
                tracing::warn!("Store kept prospect {} after delete", id);
                Err(StoreError::nothing_deleted(Collection::Prospects.to_string(), id).into())
            }
            Ok(deleted) => {
                tracing::info!("Deleted prospect {} ({} row(s) in store)", id, deleted);
                Ok(self.state.remove_prospect(id))
            }
            Err(err) => {
                tracing::warn!("Failed to delete prospect {}: {}", id, err);
                Err(err.into())
            }
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Activities
    // ───────────────────────────────────────────────────────────────

    pub async fn list_activities(&mut self) -> Result<&[Activity], DashboardError> {
        self.require_session()?;
        self.reload_activities().await?;
        Ok(self.state.activities())
    }

    async fn reload_activities(&mut self) -> Result<usize, StoreError> {
        match self.activity_store.list_all().await {
            Ok(rows) => {
                tracing::debug!("Loaded {} activities", rows.len());
                let count = rows.len();
                self.state.replace_activities(rows);
                Ok(count)
            }
            Err(err) => {
                tracing::warn!("Failed to load activities: {}", err);
                Err(err)
            }
        }
    }

    pub async fn create_activity(&mut self, draft: ActivityDraft) -> Result<Activity, DashboardError> {
        self.authorize(Action::Create)?;
        self.state.set_activity_draft(draft);
        self.submit_activity_draft().await
    }

    /// Inserts the staged activity draft, dated today when it has no date.
    pub async fn submit_activity_draft(&mut self) -> Result<Activity, DashboardError> {
        self.authorize(Action::Create)?;
        let new = NewActivity::from_draft(self.state.activity_draft(), self.clock.today());

        match self.activity_store.insert(&new).await {
            Ok(stored) => {
                tracing::info!("Created activity {}", stored.id);
                self.state.prepend_activity(stored.clone());
                self.state.reset_activity_draft();
                Ok(stored)
            }
            Err(err) => {
                tracing::warn!("Failed to create activity: {}", err);
                Err(err.into())
            }
        }
    }

    pub async fn delete_activity(&mut self, id: ActivityId) -> Result<bool, DashboardError> {
        self.authorize(Action::Delete)?;
        match self.activity_store.delete(id).await {
            Ok(0) if self.state.activities().iter().any(|a| a.id == id) => {
                tracing::warn!("Store kept activity {} after delete", id);
                Err(StoreError::nothing_deleted(Collection::Activities.to_string(), id).into())
            }
            Ok(deleted) => {
                tracing::info!("Deleted activity {} ({} row(s) in store)", id, deleted);
                Ok(self.state.remove_activity(id))
            }
            Err(err) => {
                tracing::warn!("Failed to delete activity {}: {}", id, err);
                Err(err.into())
            }
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Drafts
    // ───────────────────────────────────────────────────────────────

    pub fn prospect_draft(&self) -> &ProspectDraft {
        self.state.prospect_draft()
    }

    pub fn set_prospect_draft(&mut self, draft: ProspectDraft) {
        self.state.set_prospect_draft(draft);
    }

    pub fn reset_prospect_draft(&mut self) {
        self.state.reset_prospect_draft();
    }

    pub fn activity_draft(&self) -> &ActivityDraft {
        self.state.activity_draft()
    }

    pub fn set_activity_draft(&mut self, draft: ActivityDraft) {
        self.state.set_activity_draft(draft);
    }

    pub fn reset_activity_draft(&mut self) {
        self.state.reset_activity_draft();
    }

    // ───────────────────────────────────────────────────────────────
    // Views
    // ───────────────────────────────────────────────────────────────

    pub fn prospects(&self) -> &[Prospect] {
        self.state.prospects()
    }

    pub fn activities(&self) -> &[Activity] {
        self.state.activities()
    }

    pub fn stats(&self) -> ProspectStats {
        self.state.stats()
    }

    pub fn activity_rows(&self) -> Vec<ActivityRow> {
        self.state.activity_rows()
    }

    pub fn prospect_choices(&self) -> Vec<ProspectChoice> {
        self.state.prospect_choices()
    }

    // ───────────────────────────────────────────────────────────────
    // Exports
    // ───────────────────────────────────────────────────────────────

    /// Renders the prospect list as `daftar_prospek.pdf`.
    pub async fn export_document(&self) -> Result<ExportedDocument, DashboardError> {
        self.require_session()?;
        let document = prospect_list_document(&self.exports.document_title, self.state.prospects());
        let bytes = self.exports.document.render_document(&document).await?;
        Ok(ExportedDocument::new(bytes, ExportFormat::Pdf, DOCUMENT_BASE_FILENAME))
    }

    /// Renders both lists as `laporan_marketing.xlsx`.
    pub async fn export_workbook(&self) -> Result<ExportedDocument, DashboardError> {
        self.require_session()?;
        let workbook = marketing_workbook(self.state.prospects(), self.state.activities());
        let bytes = self.exports.workbook.render_workbook(&workbook).await?;
        Ok(ExportedDocument::new(bytes, ExportFormat::Xlsx, WORKBOOK_BASE_FILENAME))
    }

    /// Renders both exports and writes them to artifact storage.
    pub async fn save_exports(&self) -> Result<Vec<SavedArtifact>, DashboardError> {
        let exported = [self.export_document().await?, self.export_workbook().await?];
        let mut saved = Vec::with_capacity(exported.len());
        for document in &exported {
            match self.exports.artifacts.save(document).await {
                Ok(artifact) => saved.push(artifact),
                Err(err) => {
                    tracing::warn!("Failed to save {}: {}", document.filename, err);
                    return Err(err.into());
                }
            }
        }
        Ok(saved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::activity::ActivityType;
    use crate::domain::prospect::{LeadSource, ProspectStatus};
    use crate::domain::report::{ReportDocument, Workbook};
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::Mutex;

    // ───────────────────────────────────────────────────────────────
    // Mock ports
    // ───────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct MockStore {
        prospects: Mutex<Vec<Prospect>>,
        activities: Mutex<Vec<Activity>>,
        fail: bool,
        /// Accepts deletes without removing anything, like a row-level
        /// security policy that filters the row out.
        keep_on_delete: bool,
    }

    impl MockStore {
        fn new() -> Self {
            Self::default()
        }

        fn failing() -> Self {
            Self {
                fail: true,
                ..Self::default()
            }
        }

        fn with_prospects(prospects: Vec<Prospect>) -> Self {
            Self {
                prospects: Mutex::new(prospects),
                ..Self::default()
            }
        }

        fn keeping_rows_on_delete(prospects: Vec<Prospect>) -> Self {
            Self {
                prospects: Mutex::new(prospects),
                keep_on_delete: true,
                ..Self::default()
            }
        }

        fn check(&self) -> Result<(), StoreError> {
            if self.fail {
                return Err(StoreError::transport("Simulated store failure"));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl ProspectStore for MockStore {
        async fn list_all(&self) -> Result<Vec<Prospect>, StoreError> {
            self.check()?;
            Ok(self.prospects.lock().unwrap().clone())
        }

        async fn insert(&self, prospect: &NewProspect) -> Result<Prospect, StoreError> {
            self.check()?;
            let stored = prospect.clone().into_prospect(ProspectId::new());
            self.prospects.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn delete(&self, id: ProspectId) -> Result<usize, StoreError> {
            self.check()?;
            if self.keep_on_delete {
                return Ok(0);
            }
            let mut rows = self.prospects.lock().unwrap();
            let before = rows.len();
            rows.retain(|p| p.id != id);
            Ok(before - rows.len())
        }
    }

    #[async_trait]
    impl ActivityStore for MockStore {
        async fn list_all(&self) -> Result<Vec<Activity>, StoreError> {
            self.check()?;
            Ok(self.activities.lock().unwrap().clone())
        }

        async fn insert(&self, activity: &NewActivity) -> Result<Activity, StoreError> {
            self.check()?;
            let stored = activity.clone().into_activity(ActivityId::new());
            self.activities.lock().unwrap().push(stored.clone());
            Ok(stored)
        }

        async fn delete(&self, id: ActivityId) -> Result<usize, StoreError> {
            self.check()?;
            if self.keep_on_delete {
                return Ok(0);
            }
            let mut rows = self.activities.lock().unwrap();
            let before = rows.len();
            rows.retain(|a| a.id != id);
            Ok(before - rows.len())
        }
    }

    struct MockRenderer {
        fail: bool,
        last_document: Mutex<Option<ReportDocument>>,
    }

    impl MockRenderer {
        fn new() -> Self {
            Self {
                fail: false,
                last_document: Mutex::new(None),
            }
        }

        fn failing() -> Self {
            Self {
                fail: true,
                last_document: Mutex::new(None),
            }
        }
    }

    #[async_trait]
    impl DocumentRenderer for MockRenderer {
        async fn render_document(&self, document: &ReportDocument) -> Result<Vec<u8>, ExportError> {
            if self.fail {
                return Err(ExportError::render_failed(ExportFormat::Pdf, "Simulated failure"));
            }
            *self.last_document.lock().unwrap() = Some(document.clone());
            Ok(b"pdf".to_vec())
        }
    }

    #[async_trait]
    impl WorkbookRenderer for MockRenderer {
        async fn render_workbook(&self, workbook: &Workbook) -> Result<Vec<u8>, ExportError> {
            if self.fail {
                return Err(ExportError::render_failed(ExportFormat::Xlsx, "Simulated failure"));
            }
            Ok(format!("{} sheets", workbook.sheets.len()).into_bytes())
        }
    }

    #[derive(Default)]
    struct MockArtifacts {
        saved: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ArtifactStorage for MockArtifacts {
        async fn save(&self, document: &ExportedDocument) -> Result<SavedArtifact, ExportError> {
            self.saved.lock().unwrap().push(document.filename.clone());
            Ok(SavedArtifact {
                path: document.filename.clone().into(),
                size_bytes: document.content.len() as u64,
                checksum: String::new(),
            })
        }
    }

    struct StubClock;

    impl Clock for StubClock {
        fn today(&self) -> NaiveDate {
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        }
    }

    fn dashboard_with(store: Arc<MockStore>, renderer: Arc<MockRenderer>) -> Dashboard {
        let exports = ExportServices::new(renderer.clone(), renderer, Arc::new(MockArtifacts::default()));
        Dashboard::new(store.clone(), store, exports, Arc::new(StubClock))
    }

    fn dashboard(store: MockStore) -> Dashboard {
        dashboard_with(Arc::new(store), Arc::new(MockRenderer::new()))
    }

    fn stored_prospect(name: &str) -> Prospect {
        NewProspect::from_draft(&ProspectDraft::named(name), Role::Marketing)
            .unwrap()
            .into_prospect(ProspectId::new())
    }

    fn acme_draft() -> ProspectDraft {
        ProspectDraft {
            name: "Acme".to_string(),
            company: "Acme Corp".to_string(),
            status: ProspectStatus::New,
            source: Some(LeadSource::Referral),
            ..ProspectDraft::default()
        }
    }

    // ───────────────────────────────────────────────────────────────
    // Session
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn sign_in_loads_both_collections() {
        let mut dash = dashboard(MockStore::with_prospects(vec![stored_prospect("Acme")]));
        let report = dash.sign_in(Role::Manager).await;

        assert!(report.is_complete());
        assert_eq!(report.prospects, 1);
        assert_eq!(report.activities, 0);
        assert_eq!(dash.session().map(Session::role), Some(Role::Manager));
    }

    #[tokio::test]
    async fn sign_in_reports_failed_loads_but_keeps_session() {
        let mut dash = dashboard(MockStore::failing());
        let report = dash.sign_in(Role::Marketing).await;

        assert!(!report.is_complete());
        let failed: Vec<Collection> = report.failures.iter().map(|f| f.collection).collect();
        assert_eq!(failed, vec![Collection::Prospects, Collection::Activities]);
        assert!(dash.session().is_some());
    }

    #[tokio::test]
    async fn sign_in_as_rejects_unknown_role() {
        let mut dash = dashboard(MockStore::new());
        let err = dash.sign_in_as("intern").await.unwrap_err();
        assert!(matches!(err, DashboardError::InvalidRole(_)));
        assert_eq!(err.code(), ErrorCode::InvalidRole);
        assert!(dash.session().is_none());
    }

    #[tokio::test]
    async fn sign_out_clears_everything() {
        let mut dash = dashboard(MockStore::with_prospects(vec![stored_prospect("Acme")]));
        dash.sign_in(Role::Marketing).await;
        dash.set_prospect_draft(ProspectDraft::named("half typed"));

        dash.sign_out();

        assert!(dash.session().is_none());
        assert!(dash.prospects().is_empty());
        assert_eq!(dash.prospect_draft(), &ProspectDraft::default());
    }

    #[tokio::test]
    async fn commands_without_session_fail() {
        let mut dash = dashboard(MockStore::new());
        assert!(matches!(dash.list_prospects().await, Err(DashboardError::NotSignedIn)));
        assert!(matches!(
            dash.create_prospect(acme_draft()).await,
            Err(DashboardError::NotSignedIn)
        ));
        assert!(matches!(dash.export_document().await, Err(DashboardError::NotSignedIn)));
    }

    // ───────────────────────────────────────────────────────────────
    // Create
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn marketing_creates_prospect_and_it_is_prepended() {
        let mut dash = dashboard(MockStore::with_prospects(vec![stored_prospect("Old")]));
        dash.sign_in(Role::Marketing).await;

        let created = dash.create_prospect(acme_draft()).await.unwrap();

        assert_eq!(created.assigned_to, Some(Role::Marketing));
        assert_eq!(dash.prospects()[0].id, created.id);
        assert_eq!(dash.prospects().len(), 2);
        assert_eq!(dash.prospect_draft(), &ProspectDraft::default());

        let stats = dash.stats();
        assert_eq!(stats.total, 2);
        assert_eq!((stats.hot, stats.pending, stats.deal), (0, 0, 0));
    }

    #[tokio::test]
    async fn manager_cannot_create() {
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Manager).await;

        let err = dash.create_prospect(acme_draft()).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Forbidden { role: Role::Manager, action: Action::Create }
        ));
        assert_eq!(err.code(), ErrorCode::Forbidden);
        assert!(dash.prospects().is_empty());
    }

    #[tokio::test]
    async fn blank_name_is_a_validation_error_and_keeps_draft() {
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Marketing).await;

        let draft = ProspectDraft::named("  ");
        let err = dash.create_prospect(draft.clone()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Validation(_)));
        assert_eq!(dash.prospect_draft(), &draft);
    }

    #[tokio::test]
    async fn store_failure_on_create_keeps_draft_and_list() {
        let store = Arc::new(MockStore::failing());
        let mut dash = dashboard_with(store, Arc::new(MockRenderer::new()));
        dash.sign_in(Role::Marketing).await;

        let err = dash.create_prospect(acme_draft()).await.unwrap_err();
        assert!(matches!(err, DashboardError::Store(_)));
        assert_eq!(err.code(), ErrorCode::StoreUnavailable);
        assert_eq!(dash.prospect_draft(), &acme_draft());
        assert!(dash.prospects().is_empty());
    }

    #[tokio::test]
    async fn activity_without_date_is_dated_today() {
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Marketing).await;

        let created = dash
            .create_activity(ActivityDraft {
                activity_type: Some(ActivityType::CallFollowUp),
                ..ActivityDraft::default()
            })
            .await
            .unwrap();

        assert_eq!(created.date, NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let rows = dash.activity_rows();
        assert!(rows[0].prospect_name.is_unknown());
    }

    #[tokio::test]
    async fn submit_uses_staged_draft() {
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Marketing).await;
        dash.set_prospect_draft(acme_draft());

        let created = dash.submit_prospect_draft().await.unwrap();
        assert_eq!(created.company, "Acme Corp");
        assert_eq!(dash.prospect_choices()[0].label, "Acme - Acme Corp");
    }

    // ───────────────────────────────────────────────────────────────
    // Delete
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn manager_deletes_prospect() {
        let acme = stored_prospect("Acme");
        let id = acme.id;
        let mut dash = dashboard(MockStore::with_prospects(vec![acme]));
        dash.sign_in(Role::Superadmin).await;

        assert!(dash.delete_prospect(id).await.unwrap());
        assert!(dash.prospects().is_empty());
    }

    #[tokio::test]
    async fn marketing_cannot_delete() {
        let acme = stored_prospect("Acme");
        let id = acme.id;
        let mut dash = dashboard(MockStore::with_prospects(vec![acme]));
        dash.sign_in(Role::Marketing).await;

        let err = dash.delete_prospect(id).await.unwrap_err();
        assert!(matches!(err, DashboardError::Forbidden { action: Action::Delete, .. }));
        assert_eq!(dash.prospects().len(), 1);
    }

    #[tokio::test]
    async fn deleting_unknown_id_leaves_list_unchanged() {
        let mut dash = dashboard(MockStore::with_prospects(vec![stored_prospect("Acme")]));
        dash.sign_in(Role::Manager).await;
        let before = dash.prospects().to_vec();

        assert!(!dash.delete_prospect(ProspectId::new()).await.unwrap());
        assert_eq!(dash.prospects(), before.as_slice());
    }

    #[tokio::test]
    async fn failed_delete_keeps_row_locally() {
        let acme = stored_prospect("Acme");
        let id = acme.id;
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Manager).await;
        dash.state.replace_prospects(vec![acme]);
        let failing: Arc<dyn ProspectStore> = Arc::new(MockStore::failing());
        dash.prospect_store = failing;

        assert!(matches!(dash.delete_prospect(id).await, Err(DashboardError::Store(_))));
        assert_eq!(dash.prospects().len(), 1);
    }

    #[tokio::test]
    async fn delete_the_store_did_not_apply_keeps_row_listed() {
        let acme = stored_prospect("Acme");
        let id = acme.id;
        let mut dash = dashboard(MockStore::keeping_rows_on_delete(vec![acme]));
        dash.sign_in(Role::Manager).await;

        let err = dash.delete_prospect(id).await.unwrap_err();
        assert!(matches!(
            err,
            DashboardError::Store(StoreError::NothingDeleted { ref collection, .. })
                if collection == "prospects"
        ));
        assert_eq!(err.code(), ErrorCode::StoreRejected);
        assert_eq!(dash.prospects().len(), 1);

        dash.list_prospects().await.unwrap();
        assert_eq!(dash.prospects()[0].id, id);
    }

    #[tokio::test]
    async fn unlisted_id_the_store_did_not_delete_is_a_no_op() {
        let mut dash = dashboard(MockStore::keeping_rows_on_delete(vec![stored_prospect("Acme")]));
        dash.sign_in(Role::Manager).await;

        assert!(!dash.delete_activity(ActivityId::new()).await.unwrap());
        assert!(!dash.delete_prospect(ProspectId::new()).await.unwrap());
        assert_eq!(dash.prospects().len(), 1);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let mut dash = dashboard(MockStore::with_prospects(vec![stored_prospect("Acme")]));
        dash.sign_in(Role::Manager).await;
        let failing: Arc<dyn ProspectStore> = Arc::new(MockStore::failing());
        dash.prospect_store = failing;

        assert!(dash.list_prospects().await.is_err());
        assert_eq!(dash.prospects().len(), 1);
    }

    // ───────────────────────────────────────────────────────────────
    // Exports
    // ───────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn document_export_lists_prospects_under_title() {
        let renderer = Arc::new(MockRenderer::new());
        let mut dash = dashboard_with(
            Arc::new(MockStore::with_prospects(vec![stored_prospect("Acme")])),
            renderer.clone(),
        );
        dash.sign_in(Role::Manager).await;

        let exported = dash.export_document().await.unwrap();
        assert_eq!(exported.filename, "daftar_prospek.pdf");
        assert_eq!(exported.content_type, "application/pdf");

        let document = renderer.last_document.lock().unwrap().clone().unwrap();
        assert_eq!(document.title, "Daftar Prospek");
        assert_eq!(document.lines, vec!["1. Acme - ".to_string()]);
    }

    #[tokio::test]
    async fn workbook_export_has_fixed_name() {
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Marketing).await;

        let exported = dash.export_workbook().await.unwrap();
        assert_eq!(exported.filename, "laporan_marketing.xlsx");
        assert_eq!(exported.content, b"2 sheets");
    }

    #[tokio::test]
    async fn save_exports_writes_both_artifacts() {
        let mut dash = dashboard(MockStore::new());
        dash.sign_in(Role::Marketing).await;

        let saved = dash.save_exports().await.unwrap();
        let names: Vec<String> = saved
            .iter()
            .map(|a| a.path.to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["daftar_prospek.pdf", "laporan_marketing.xlsx"]);
    }

    #[tokio::test]
    async fn render_failure_is_an_export_error() {
        let mut dash = dashboard_with(Arc::new(MockStore::new()), Arc::new(MockRenderer::failing()));
        dash.sign_in(Role::Marketing).await;

        let err = dash.export_document().await.unwrap_err();
        assert!(matches!(err, DashboardError::Export(_)));
        assert_eq!(err.code(), ErrorCode::ExportFailed);
    }
}
