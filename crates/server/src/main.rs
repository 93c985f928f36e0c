use std::{net::SocketAddr, sync::Arc};

use axum::{
    extract::State,
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde::Serialize;
use tower_http::limit::RequestBodyLimitLayer;
use tracing::info;

use control_api::{
    fleet_status, reload_fleet, rescale_fleet, shutdown_fleet, start_fleet, worker_statuses,
    ControlContext,
};
use shared::{
    domain::{ScaleRequest, StatusReport, WorkerStatusList},
    error::{ApiError, ErrorEnvelope},
};
use supervisor::LocalSupervisor;

mod config;

use config::load_settings;

const MAX_BODY_BYTES: usize = 16 * 1024;

#[derive(Clone)]
struct AppState {
    control: ControlContext,
}

#[derive(Debug, Serialize)]
struct StatusResponse {
    status: StatusReport,
}

#[derive(Debug, Serialize)]
struct WorkersResponse {
    workers: WorkerStatusList,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter("info").init();

    let settings = load_settings();
    let fleet = Arc::new(LocalSupervisor::new(settings.initial_size));
    let state = AppState {
        control: ControlContext::new(fleet),
    };
    let app = build_router(Arc::new(state));

    let addr: SocketAddr = settings.bind_addr.parse()?;
    info!(%addr, "control api listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/status", get(http_fleet_status))
        .route("/status/workers", get(http_worker_statuses))
        .route("/start", put(http_start_fleet))
        .route("/scale", put(http_rescale_fleet))
        .route("/shutdown", put(http_shutdown_fleet))
        .route("/reload", put(http_reload_fleet))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

fn reject(err: ApiError) -> (StatusCode, Json<ErrorEnvelope>) {
    let status = StatusCode::from_u16(err.code.http_status())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    (status, Json(ErrorEnvelope::from(err)))
}

async fn http_fleet_status(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorEnvelope>)> {
    let status = fleet_status(&state.control).await.map_err(reject)?;
    Ok(Json(StatusResponse { status }))
}

async fn http_worker_statuses(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WorkersResponse>, (StatusCode, Json<ErrorEnvelope>)> {
    let workers = worker_statuses(&state.control).await.map_err(reject)?;
    Ok(Json(WorkersResponse { workers }))
}

async fn http_start_fleet(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorEnvelope>)> {
    let status = start_fleet(&state.control).await.map_err(reject)?;
    Ok(Json(StatusResponse { status }))
}

async fn http_rescale_fleet(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ScaleRequest>,
) -> Result<Json<WorkersResponse>, (StatusCode, Json<ErrorEnvelope>)> {
    let workers = rescale_fleet(&state.control, req.size)
        .await
        .map_err(reject)?;
    Ok(Json(WorkersResponse { workers }))
}

async fn http_shutdown_fleet(
    State(state): State<Arc<AppState>>,
) -> Result<Json<StatusResponse>, (StatusCode, Json<ErrorEnvelope>)> {
    let status = shutdown_fleet(&state.control).await.map_err(reject)?;
    Ok(Json(StatusResponse { status }))
}

async fn http_reload_fleet(
    State(state): State<Arc<AppState>>,
) -> Result<Json<WorkersResponse>, (StatusCode, Json<ErrorEnvelope>)> {
    let workers = reload_fleet(&state.control).await.map_err(reject)?;
    Ok(Json(WorkersResponse { workers }))
}
