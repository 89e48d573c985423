//! Dashboard HTTP API: thin handlers over [`TenderService`].

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use axum::Json;
use axum::Router;
use axum::extract::{Query, State};
use axum::routing::get;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tenderwatch_core::TenderRecord;
use tenderwatch_service::{TenderListing, TenderService};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<TenderService>,
}

/// Body of `/api/tenders` and `/api/refresh`.
#[derive(Debug, Serialize)]
pub struct TendersResponse {
    /// Present only on `/api/refresh`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub tenders: Vec<TenderRecord>,
    pub last_updated: Option<DateTime<Utc>>,
    pub count: usize,
}

impl From<TenderListing> for TendersResponse {
    fn from(listing: TenderListing) -> Self {
        Self {
            success: None,
            count: listing.count(),
            tenders: listing.tenders,
            last_updated: listing.last_updated,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TendersQuery {
    refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: &'static str,
}

/// `GET /api/tenders[?refresh=true]`
pub async fn list_tenders(
    State(state): State<AppState>,
    Query(query): Query<TendersQuery>,
) -> Json<TendersResponse> {
    let force_refresh = query
        .refresh
        .is_some_and(|v| v.eq_ignore_ascii_case("true"));
    let listing = state.service.get_tenders(force_refresh).await;
    Json(listing.into())
}

/// `GET /api/refresh` -- always bypasses the cache.
pub async fn refresh_tenders(State(state): State<AppState>) -> Json<TendersResponse> {
    let listing = state.service.get_tenders(true).await;
    Json(TendersResponse {
        success: Some(true),
        ..TendersResponse::from(listing)
    })
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

/// Build the router. Static dashboard files, when given, answer every
/// path the API does not.
pub fn router(state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api = Router::new()
        .route("/health", get(health))
        .route("/api/tenders", get(list_tenders))
        .route("/api/refresh", get(refresh_tenders))
        .with_state(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(ServeDir::new(dir)),
        None => api,
    };
    app.layer(TraceLayer::new_for_http())
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(
    service: TenderService,
    addr: SocketAddr,
    static_dir: Option<PathBuf>,
) -> anyhow::Result<()> {
    let state = AppState {
        service: Arc::new(service),
    };
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    info!(addr = %addr, "dashboard listening");

    axum::serve(listener, router(state, static_dir))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving dashboard")?;
    info!("dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "could not listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
