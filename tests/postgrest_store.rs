//! Integration tests for the PostgREST record store.
//!
//! A small axum server stands in for the hosted table API and records
//! every request, so the tests can check the exact wire shape the client
//! sends and how it reads the responses.

use std::sync::{Arc, Mutex};

use chrono::NaiveDate;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};

use prospect_tracker::adapters::{
    FixedClock, LocalArtifactStorage, PdfDocumentRenderer, PostgrestClient, PostgrestConfig,
    XlsxWorkbookRenderer,
};
use prospect_tracker::application::{Dashboard, DashboardError, ExportServices};
use prospect_tracker::domain::activity::{ActivityDraft, NewActivity};
use prospect_tracker::domain::foundation::{ActivityId, ProspectId, Role};
use prospect_tracker::domain::prospect::{
    LeadSource, NewProspect, ProspectDraft, ProspectStatus,
};
use prospect_tracker::ports::{ActivityStore, ProspectStore, StoreError};

// =============================================================================
// Fake PostgREST server
// =============================================================================

const STORED_ID: &str = "6f1c2a3b-0000-4000-8000-000000000001";

#[derive(Debug, Clone)]
struct Recorded {
    method: Method,
    path: String,
    query: Option<String>,
    headers: HeaderMap,
    body: Bytes,
}

#[derive(Clone, Default)]
struct FakeStore {
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl FakeStore {
    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

async fn handle(
    State(fake): State<FakeStore>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    fake.requests.lock().unwrap().push(Recorded {
        method: method.clone(),
        path: uri.path().to_string(),
        query: uri.query().map(str::to_string),
        headers,
        body: body.clone(),
    });

    match (method, uri.path()) {
        (Method::GET, "/rest/v1/prospects") => Json(json!([{
            "id": STORED_ID,
            "name": "Acme",
            "contact": null,
            "company": "Acme Corp",
            "source": "",
            "status": "hot",
            "description": null,
            "location": "Jakarta",
            "assigned_to": "marketing",
            "created_at": "2024-05-01T08:00:00Z"
        }]))
        .into_response(),
        (Method::POST, "/rest/v1/prospects") => {
            let rows: Value = serde_json::from_slice(&body).unwrap();
            let mut row = rows[0].clone();
            row["id"] = json!(STORED_ID);
            (StatusCode::CREATED, Json(json!([row]))).into_response()
        }
        // Row-level security hides the row from DELETE: 200 with nothing removed.
        (Method::DELETE, "/rest/v1/prospects") => Json(json!([])).into_response(),
        (Method::GET, "/rest/v1/activities") => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "code": "PGRST301", "message": "JWT expired" })),
        )
            .into_response(),
        (Method::POST, "/rest/v1/activities") => {
            (StatusCode::CREATED, Json(json!([]))).into_response()
        }
        (Method::DELETE, "/rest/v1/activities") => Json(json!([{ "id": 5 }])).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn start_fake() -> (FakeStore, PostgrestClient) {
    let fake = FakeStore::default();
    let app = Router::new().fallback(handle).with_state(fake.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    let client =
        PostgrestClient::new(PostgrestConfig::new(format!("http://{}", addr), "anon-key")).unwrap();
    (fake, client)
}

fn header<'a>(request: &'a Recorded, name: &str) -> &'a str {
    request
        .headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn list_selects_all_columns_with_credentials() {
    let (fake, client) = start_fake().await;

    let prospects = ProspectStore::list_all(&client).await.unwrap();

    assert_eq!(prospects.len(), 1);
    let p = &prospects[0];
    assert_eq!(p.id.to_string(), STORED_ID);
    assert_eq!(p.contact, "");
    assert_eq!(p.source, None);
    assert_eq!(p.status, ProspectStatus::Hot);
    assert_eq!(p.assigned_to, Some(Role::Marketing));

    let requests = fake.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, Method::GET);
    assert_eq!(requests[0].query.as_deref(), Some("select=*"));
    assert_eq!(header(&requests[0], "apikey"), "anon-key");
    assert_eq!(header(&requests[0], "authorization"), "Bearer anon-key");
}

#[tokio::test]
async fn insert_posts_one_row_and_returns_the_stored_representation() {
    let (fake, client) = start_fake().await;
    let draft = ProspectDraft {
        company: "Acme Corp".to_string(),
        source: Some(LeadSource::Referral),
        ..ProspectDraft::named("Acme")
    };
    let new = NewProspect::from_draft(&draft, Role::Marketing).unwrap();

    let stored = ProspectStore::insert(&client, &new).await.unwrap();

    assert_eq!(stored.id.to_string(), STORED_ID);
    assert_eq!(stored.name, "Acme");
    assert_eq!(stored.source, Some(LeadSource::Referral));
    assert_eq!(stored.status, ProspectStatus::New);

    let requests = fake.requests();
    let post = &requests[0];
    assert_eq!(post.method, Method::POST);
    assert_eq!(header(post, "prefer"), "return=representation");
    assert!(header(post, "content-type").starts_with("application/json"));

    let body: Value = serde_json::from_slice(&post.body).unwrap();
    let rows = body.as_array().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["name"], "Acme");
    assert_eq!(rows[0]["source"], "Referensi");
    assert_eq!(rows[0]["status"], "baru");
    assert_eq!(rows[0]["assigned_to"], "marketing");
    assert!(rows[0].get("id").is_none());
}

#[tokio::test]
async fn delete_filters_by_id_and_asks_for_removed_rows() {
    let (fake, client) = start_fake().await;
    let id = ProspectId::new();

    let deleted = ProspectStore::delete(&client, id).await.unwrap();

    assert_eq!(deleted, 0);
    let requests = fake.requests();
    assert_eq!(requests[0].method, Method::DELETE);
    assert_eq!(requests[0].path, "/rest/v1/prospects");
    assert_eq!(requests[0].query, Some(format!("id=eq.{}&select=id", id)));
    assert_eq!(header(&requests[0], "prefer"), "return=representation");
}

#[tokio::test]
async fn delete_counts_rows_the_store_returns() {
    let (fake, client) = start_fake().await;
    let id: ActivityId = "5".parse().unwrap();

    let deleted = ActivityStore::delete(&client, id).await.unwrap();

    assert_eq!(deleted, 1);
    assert_eq!(fake.requests()[0].query.as_deref(), Some("id=eq.5&select=id"));
}

#[tokio::test]
async fn dashboard_keeps_a_row_the_store_refused_to_delete() {
    let (_fake, client) = start_fake().await;
    let client = Arc::new(client);
    let exports = ExportServices::new(
        Arc::new(PdfDocumentRenderer::new()),
        Arc::new(XlsxWorkbookRenderer::new()),
        Arc::new(LocalArtifactStorage::new(std::env::temp_dir())),
    );
    let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()));
    let mut dash = Dashboard::new(client.clone(), client, exports, clock);

    let report = dash.sign_in(Role::Manager).await;
    assert_eq!(report.prospects, 1);
    let id = dash.prospects()[0].id;

    let err = dash.delete_prospect(id).await.unwrap_err();
    assert!(matches!(
        err,
        DashboardError::Store(StoreError::NothingDeleted { .. })
    ));
    assert_eq!(dash.prospects().len(), 1);

    dash.list_prospects().await.unwrap();
    assert_eq!(dash.prospects()[0].id, id);
}

#[tokio::test]
async fn error_status_is_reported_with_store_message() {
    let (_fake, client) = start_fake().await;

    let err = ActivityStore::list_all(&client).await.unwrap_err();

    match err {
        StoreError::Rejected { status, message } => {
            assert_eq!(status, 401);
            assert_eq!(message, "JWT expired");
        }
        other => panic!("expected rejection, got {:?}", other),
    }
}

#[tokio::test]
async fn insert_without_returned_row_is_an_error() {
    let (_fake, client) = start_fake().await;
    let new = NewActivity::from_draft(
        &ActivityDraft::default(),
        NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
    );

    let err = ActivityStore::insert(&client, &new).await.unwrap_err();

    assert!(matches!(err, StoreError::EmptyResponse(table) if table == "activities"));
}
