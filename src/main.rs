//! Prospect Tracker server - Application entry point.

use std::sync::Arc;

use http::{HeaderValue, Method};
use secrecy::ExposeSecret;
use thiserror::Error;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use prospect_tracker::adapters::http::{dashboard_routes, DashboardAppState};
use prospect_tracker::adapters::{
    InMemoryRecordStore, LocalArtifactStorage, PdfDocumentRenderer, PostgrestClient,
    PostgrestConfig, SystemClock, XlsxWorkbookRenderer,
};
use prospect_tracker::application::{Dashboard, ExportServices};
use prospect_tracker::config::{AppConfig, ConfigError, StoreBackend, StoreConfig, ValidationError};
use prospect_tracker::ports::{ActivityStore, ProspectStore, StoreError};

/// Reasons the server fails to start or stops abnormally.
#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Record store client: {0}")]
    Store(#[from] StoreError),

    #[error("Server I/O: {0}")]
    Io(#[from] std::io::Error),
}

#[tokio::main]
async fn main() -> Result<(), StartupError> {
    let config = AppConfig::load()?;
    config.validate()?;

    init_tracing(&config);
    tracing::info!(
        "Starting prospect tracker ({:?}, store backend {:?})",
        config.server.environment,
        config.store.backend
    );

    let (prospects, activities) = build_stores(&config.store)?;
    let exports = ExportServices::new(
        Arc::new(PdfDocumentRenderer::new()),
        Arc::new(XlsxWorkbookRenderer::new()),
        Arc::new(LocalArtifactStorage::new(config.export.output_dir.clone())),
    )
    .with_document_title(config.export.document_title.clone());
    let dashboard = Dashboard::new(prospects, activities, exports, Arc::new(SystemClock));

    let app = dashboard_routes(DashboardAppState::new(dashboard))
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(cors_layer(&config.server.cors_origins_list()))
        .layer(TraceLayer::new_for_http());

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Prospect tracker stopped");
    Ok(())
}

fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.server.log_level.as_str()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    if config.is_production() {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn build_stores(
    store: &StoreConfig,
) -> Result<(Arc<dyn ProspectStore>, Arc<dyn ActivityStore>), StartupError> {
    match store.backend {
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory record store; records are lost on restart");
            let memory = Arc::new(InMemoryRecordStore::new());
            let prospects: Arc<dyn ProspectStore> = memory.clone();
            let activities: Arc<dyn ActivityStore> = memory;
            Ok((prospects, activities))
        }
        StoreBackend::Postgrest => {
            let api_key = store
                .api_key
                .as_ref()
                .ok_or(ValidationError::MissingRequired("store.api_key"))?;
            let client = Arc::new(PostgrestClient::new(
                PostgrestConfig::new(store.url.clone(), api_key.expose_secret().clone())
                    .with_rest_path(store.rest_path.clone())
                    .with_tables(store.prospects_table.clone(), store.activities_table.clone())
                    .with_timeout(store.timeout()),
            )?);
            let prospects: Arc<dyn ProspectStore> = client.clone();
            let activities: Arc<dyn ActivityStore> = client;
            Ok((prospects, activities))
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);
    if origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(allowed))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
    }
    tracing::info!("Shutdown signal received");
}
