//! HTTP handlers for dashboard endpoints.
//!
//! Every handler locks the one shared `Dashboard` for the whole request,
//! store round-trip included, so user actions are applied one at a time.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use tokio::sync::Mutex;

use crate::application::{Dashboard, DashboardError};
use crate::domain::activity::{Activity, ActivityDraft};
use crate::domain::dashboard::{ActivityRow, ProspectChoice, ProspectStats};
use crate::domain::foundation::{ActivityId, ErrorCode, ProspectId};
use crate::domain::prospect::{Prospect, ProspectDraft};
use crate::ports::ExportedDocument;

use super::dto::{
    DeleteResponse, ErrorResponse, HealthResponse, LoadSummary, SavedArtifactResponse,
    SessionResponse, SignInRequest, SignInResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Dashboard API error that implements IntoResponse.
#[derive(Debug)]
pub enum DashboardApiError {
    Dashboard(DashboardError),
    InvalidIdentifier(String),
}

impl From<DashboardError> for DashboardApiError {
    fn from(error: DashboardError) -> Self {
        DashboardApiError::Dashboard(error)
    }
}

impl IntoResponse for DashboardApiError {
    fn into_response(self) -> Response {
        let (status, error) = match self {
            DashboardApiError::InvalidIdentifier(raw) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(
                    ErrorCode::InvalidIdentifier,
                    format!("Invalid identifier: {}", raw),
                ),
            ),
            DashboardApiError::Dashboard(error) => {
                let status = match &error {
                    DashboardError::NotSignedIn => StatusCode::UNAUTHORIZED,
                    DashboardError::Forbidden { .. } => StatusCode::FORBIDDEN,
                    DashboardError::Validation(_) | DashboardError::InvalidRole(_) => {
                        StatusCode::BAD_REQUEST
                    }
                    DashboardError::Store(_) => StatusCode::BAD_GATEWAY,
                    DashboardError::Export(_) => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, ErrorResponse::new(error.code(), error.to_string()))
            }
        };
        (status, Json(error)).into_response()
    }
}

type ApiResult<T> = Result<T, DashboardApiError>;

// ════════════════════════════════════════════════════════════════════════════════
// State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for dashboard handlers.
#[derive(Clone)]
pub struct DashboardAppState {
    dashboard: Arc<Mutex<Dashboard>>,
}

impl DashboardAppState {
    pub fn new(dashboard: Dashboard) -> Self {
        Self {
            dashboard: Arc::new(Mutex::new(dashboard)),
        }
    }
}

fn parse_prospect_id(raw: &str) -> ApiResult<ProspectId> {
    raw.parse()
        .map_err(|_| DashboardApiError::InvalidIdentifier(raw.to_string()))
}

fn parse_activity_id(raw: &str) -> ApiResult<ActivityId> {
    raw.parse()
        .map_err(|_| DashboardApiError::InvalidIdentifier(raw.to_string()))
}

fn download(document: ExportedDocument) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, document.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", document.filename),
            ),
        ],
        document.content,
    )
        .into_response()
}

// ════════════════════════════════════════════════════════════════════════════════
// Session
// ════════════════════════════════════════════════════════════════════════════════

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

/// POST /api/session - Sign in with a role and load both lists
pub async fn sign_in(
    State(state): State<DashboardAppState>,
    Json(req): Json<SignInRequest>,
) -> ApiResult<Json<SignInResponse>> {
    let mut dashboard = state.dashboard.lock().await;
    let report = dashboard.sign_in_as(req.role.trim()).await?;
    let session = dashboard.require_session()?;

    Ok(Json(SignInResponse {
        session: SessionResponse::from(&session),
        loaded: LoadSummary::from(&report),
    }))
}

/// GET /api/session - Current role and capabilities
pub async fn current_session(
    State(state): State<DashboardAppState>,
) -> ApiResult<Json<SessionResponse>> {
    let dashboard = state.dashboard.lock().await;
    let session = dashboard.require_session()?;
    Ok(Json(SessionResponse::from(&session)))
}

/// DELETE /api/session - Sign out
pub async fn sign_out(State(state): State<DashboardAppState>) -> StatusCode {
    state.dashboard.lock().await.sign_out();
    StatusCode::NO_CONTENT
}

// ════════════════════════════════════════════════════════════════════════════════
// Prospects
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/prospects - Refresh from the store and list
pub async fn list_prospects(
    State(state): State<DashboardAppState>,
) -> ApiResult<Json<Vec<Prospect>>> {
    let mut dashboard = state.dashboard.lock().await;
    let prospects = dashboard.list_prospects().await?;
    Ok(Json(prospects.to_vec()))
}

/// POST /api/prospects - Create a prospect from a draft
pub async fn create_prospect(
    State(state): State<DashboardAppState>,
    Json(draft): Json<ProspectDraft>,
) -> ApiResult<(StatusCode, Json<Prospect>)> {
    let mut dashboard = state.dashboard.lock().await;
    let created = dashboard.create_prospect(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/prospects/:id
pub async fn delete_prospect(
    State(state): State<DashboardAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_prospect_id(&id)?;
    let removed = state.dashboard.lock().await.delete_prospect(id).await?;
    Ok(Json(DeleteResponse {
        id: id.to_string(),
        removed,
    }))
}

/// GET /api/prospects/choices - Options for an activity's prospect
pub async fn prospect_choices(
    State(state): State<DashboardAppState>,
) -> ApiResult<Json<Vec<ProspectChoice>>> {
    let dashboard = state.dashboard.lock().await;
    dashboard.require_session()?;
    Ok(Json(dashboard.prospect_choices()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Activities
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/activities - Refresh activities and list them with prospect names
pub async fn list_activities(
    State(state): State<DashboardAppState>,
) -> ApiResult<Json<Vec<ActivityRow>>> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.list_activities().await?;
    Ok(Json(dashboard.activity_rows()))
}

/// POST /api/activities
pub async fn create_activity(
    State(state): State<DashboardAppState>,
    Json(draft): Json<ActivityDraft>,
) -> ApiResult<(StatusCode, Json<Activity>)> {
    let mut dashboard = state.dashboard.lock().await;
    let created = dashboard.create_activity(draft).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// DELETE /api/activities/:id
pub async fn delete_activity(
    State(state): State<DashboardAppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteResponse>> {
    let id = parse_activity_id(&id)?;
    let removed = state.dashboard.lock().await.delete_activity(id).await?;
    Ok(Json(DeleteResponse {
        id: id.to_string(),
        removed,
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Views and drafts
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/stats
pub async fn stats(State(state): State<DashboardAppState>) -> ApiResult<Json<ProspectStats>> {
    let dashboard = state.dashboard.lock().await;
    dashboard.require_session()?;
    Ok(Json(dashboard.stats()))
}

/// GET /api/drafts/prospect
pub async fn get_prospect_draft(
    State(state): State<DashboardAppState>,
) -> ApiResult<Json<ProspectDraft>> {
    let dashboard = state.dashboard.lock().await;
    dashboard.require_session()?;
    Ok(Json(dashboard.prospect_draft().clone()))
}

/// PUT /api/drafts/prospect
pub async fn put_prospect_draft(
    State(state): State<DashboardAppState>,
    Json(draft): Json<ProspectDraft>,
) -> ApiResult<Json<ProspectDraft>> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.require_session()?;
    dashboard.set_prospect_draft(draft);
    Ok(Json(dashboard.prospect_draft().clone()))
}

/// GET /api/drafts/activity
pub async fn get_activity_draft(
    State(state): State<DashboardAppState>,
) -> ApiResult<Json<ActivityDraft>> {
    let dashboard = state.dashboard.lock().await;
    dashboard.require_session()?;
    Ok(Json(dashboard.activity_draft().clone()))
}

/// PUT /api/drafts/activity
pub async fn put_activity_draft(
    State(state): State<DashboardAppState>,
    Json(draft): Json<ActivityDraft>,
) -> ApiResult<Json<ActivityDraft>> {
    let mut dashboard = state.dashboard.lock().await;
    dashboard.require_session()?;
    dashboard.set_activity_draft(draft);
    Ok(Json(dashboard.activity_draft().clone()))
}

// ════════════════════════════════════════════════════════════════════════════════
// Exports
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/exports/prospects.pdf
pub async fn export_document(State(state): State<DashboardAppState>) -> ApiResult<Response> {
    let document = state.dashboard.lock().await.export_document().await?;
    Ok(download(document))
}

/// GET /api/exports/report.xlsx
pub async fn export_workbook(State(state): State<DashboardAppState>) -> ApiResult<Response> {
    let workbook = state.dashboard.lock().await.export_workbook().await?;
    Ok(download(workbook))
}

/// POST /api/exports - Render both exports and save them to the output directory
pub async fn save_exports(
    State(state): State<DashboardAppState>,
) -> ApiResult<(StatusCode, Json<Vec<SavedArtifactResponse>>)> {
    let saved = state.dashboard.lock().await.save_exports().await?;
    Ok((
        StatusCode::CREATED,
        Json(saved.iter().map(SavedArtifactResponse::from).collect()),
    ))
}
