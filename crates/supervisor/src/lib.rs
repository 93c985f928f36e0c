use async_trait::async_trait;
use thiserror::Error;

use shared::domain::{StatusReport, WorkerStatusList};

mod local;

pub use local::LocalSupervisor;

/// Why a supervisor operation was refused. A closed set of tags: the control
/// API matches on the variant, never on message text, so implementations are
/// free to change wording.
#[derive(Debug, Error)]
pub enum SupervisorError {
    #[error("service already started")]
    AlreadyStarted,
    #[error("inappropriate conditions for the requested transition")]
    InappropriateCondition,
    #[error("invalid scale size")]
    InvalidArgument,
    #[error("one or more workers are in error state")]
    WorkerStatus,
    /// Anything the control API has no vocabulary for. The source is logged
    /// server-side and never serialized onto the wire.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Capability set the control API requires of a worker-fleet supervisor.
/// All lifecycle state and admission rules live behind this trait; the
/// control API holds an `Arc<dyn Supervisor>` and never mutates it.
#[async_trait]
pub trait Supervisor: Send + Sync {
    async fn status(&self) -> Result<StatusReport, SupervisorError>;
    async fn worker_statuses(&self) -> Result<WorkerStatusList, SupervisorError>;
    async fn start(&self) -> Result<(), SupervisorError>;
    async fn rescale(&self, size: i64) -> Result<(), SupervisorError>;
    async fn graceful_shutdown(&self) -> Result<(), SupervisorError>;
    async fn graceful_reload(&self) -> Result<(), SupervisorError>;
}
