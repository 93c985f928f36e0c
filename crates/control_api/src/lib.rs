use std::sync::Arc;

use tracing::warn;

use shared::{
    domain::{StatusReport, WorkerStatusList},
    error::{ApiError, ErrorCode},
};
use supervisor::{Supervisor, SupervisorError};

/// Stateless facade over the supervisor. Holds nothing beyond the shared
/// supervisor handle; one clone per request is cheap.
#[derive(Clone)]
pub struct ControlContext {
    pub supervisor: Arc<dyn Supervisor>,
}

impl ControlContext {
    pub fn new(supervisor: Arc<dyn Supervisor>) -> Self {
        Self { supervisor }
    }
}

pub async fn fleet_status(ctx: &ControlContext) -> Result<StatusReport, ApiError> {
    ctx.supervisor.status().await.map_err(unknown)
}

pub async fn worker_statuses(ctx: &ControlContext) -> Result<WorkerStatusList, ApiError> {
    ctx.supervisor.worker_statuses().await.map_err(unknown)
}

/// Starts the fleet, then re-queries status. The query must not begin until
/// the start has fully resolved; clients rely on that ordering.
pub async fn start_fleet(ctx: &ControlContext) -> Result<StatusReport, ApiError> {
    match ctx.supervisor.start().await {
        Ok(()) => {}
        Err(SupervisorError::AlreadyStarted) => {
            return Err(ApiError::new(ErrorCode::AlreadyStarted));
        }
        Err(err) => return Err(unknown(err)),
    }
    ctx.supervisor.status().await.map_err(unknown)
}

pub async fn rescale_fleet(ctx: &ControlContext, size: i64) -> Result<WorkerStatusList, ApiError> {
    match ctx.supervisor.rescale(size).await {
        Ok(()) => {}
        Err(SupervisorError::InappropriateCondition) => {
            return Err(ApiError::new(ErrorCode::InappropriateCondition));
        }
        Err(SupervisorError::InvalidArgument) => {
            return Err(ApiError::new(ErrorCode::InvalidScaleSize));
        }
        Err(err) => return Err(unknown(err)),
    }
    ctx.supervisor.worker_statuses().await.map_err(unknown)
}

pub async fn shutdown_fleet(ctx: &ControlContext) -> Result<StatusReport, ApiError> {
    match ctx.supervisor.graceful_shutdown().await {
        Ok(()) => {}
        Err(SupervisorError::InappropriateCondition) => {
            return Err(ApiError::new(ErrorCode::InappropriateCondition));
        }
        Err(SupervisorError::WorkerStatus) => {
            return Err(ApiError::new(ErrorCode::WorkerStatus));
        }
        Err(err) => return Err(unknown(err)),
    }
    ctx.supervisor.status().await.map_err(unknown)
}

pub async fn reload_fleet(ctx: &ControlContext) -> Result<WorkerStatusList, ApiError> {
    match ctx.supervisor.graceful_reload().await {
        Ok(()) => {}
        Err(SupervisorError::InappropriateCondition) => {
            return Err(ApiError::new(ErrorCode::InappropriateCondition));
        }
        Err(SupervisorError::WorkerStatus) => {
            return Err(ApiError::new(ErrorCode::WorkerStatus));
        }
        Err(err) => return Err(unknown(err)),
    }
    ctx.supervisor.worker_statuses().await.map_err(unknown)
}

/// Catch-all for error kinds the current endpoint has no vocabulary for.
/// The detail is logged here and never reaches the response body.
fn unknown(err: SupervisorError) -> ApiError {
    warn!(error = %err, "supervisor operation failed with unrecognized error");
    ApiError::new(ErrorCode::Unknown)
}

#[cfg(test)]
#[path = "tests/mod_tests.rs"]
mod tests;
