//! HTTP routes for dashboard endpoints.

use axum::routing::{delete, get, post};
use axum::Router;

use super::handlers::{
    create_activity, create_prospect, current_session, delete_activity, delete_prospect,
    export_document, export_workbook, get_activity_draft, get_prospect_draft, health,
    list_activities, list_prospects, prospect_choices, put_activity_draft, put_prospect_draft,
    save_exports, sign_in, sign_out, stats, DashboardAppState,
};

/// Creates the dashboard router with all routes.
pub fn dashboard_routes(state: DashboardAppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/session",
            post(sign_in).get(current_session).delete(sign_out),
        )
        .route("/api/prospects", get(list_prospects).post(create_prospect))
        .route("/api/prospects/choices", get(prospect_choices))
        .route("/api/prospects/:id", delete(delete_prospect))
        .route("/api/activities", get(list_activities).post(create_activity))
        .route("/api/activities/:id", delete(delete_activity))
        .route("/api/stats", get(stats))
        .route(
            "/api/drafts/prospect",
            get(get_prospect_draft).put(put_prospect_draft),
        )
        .route(
            "/api/drafts/activity",
            get(get_activity_draft).put(put_activity_draft),
        )
        .route("/api/exports", post(save_exports))
        .route("/api/exports/prospects.pdf", get(export_document))
        .route("/api/exports/report.xlsx", get(export_workbook))
        .with_state(state)
}
