use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::info;

use shared::domain::{StatusReport, WorkerStatusList};

use crate::{Supervisor, SupervisorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FleetState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl FleetState {
    fn code(self) -> i64 {
        match self {
            FleetState::Stopped => 0,
            FleetState::Starting => 1,
            FleetState::Running => 2,
            FleetState::Stopping => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WorkerState {
    Running,
    Errored,
}

impl WorkerState {
    fn code(self) -> i64 {
        match self {
            WorkerState::Running => 1,
            WorkerState::Errored => 2,
        }
    }
}

#[derive(Debug)]
struct Fleet {
    state: FleetState,
    workers: Vec<WorkerState>,
}

/// In-memory fleet supervisor backing the server binary and the integration
/// tests. It models the lifecycle rules only; no processes are spawned.
pub struct LocalSupervisor {
    initial_size: usize,
    fleet: Mutex<Fleet>,
}

impl LocalSupervisor {
    pub fn new(initial_size: usize) -> Self {
        Self {
            initial_size,
            fleet: Mutex::new(Fleet {
                state: FleetState::Stopped,
                workers: Vec::new(),
            }),
        }
    }

    /// Flips one worker into error state. Test hook for the shutdown/reload
    /// refusal paths.
    pub async fn mark_worker_errored(&self, index: usize) {
        let mut fleet = self.fleet.lock().await;
        if let Some(worker) = fleet.workers.get_mut(index) {
            *worker = WorkerState::Errored;
        }
    }
}

#[async_trait]
impl Supervisor for LocalSupervisor {
    async fn status(&self) -> Result<StatusReport, SupervisorError> {
        let fleet = self.fleet.lock().await;
        Ok(StatusReport(json!(fleet.state.code())))
    }

    async fn worker_statuses(&self) -> Result<WorkerStatusList, SupervisorError> {
        let fleet = self.fleet.lock().await;
        Ok(WorkerStatusList(
            fleet.workers.iter().map(|w| json!(w.code())).collect(),
        ))
    }

    async fn start(&self) -> Result<(), SupervisorError> {
        let mut fleet = self.fleet.lock().await;
        if fleet.state != FleetState::Stopped {
            return Err(SupervisorError::AlreadyStarted);
        }
        fleet.state = FleetState::Starting;
        fleet.workers = vec![WorkerState::Running; self.initial_size];
        fleet.state = FleetState::Running;
        info!(workers = fleet.workers.len(), "fleet started");
        Ok(())
    }

    async fn rescale(&self, size: i64) -> Result<(), SupervisorError> {
        let mut fleet = self.fleet.lock().await;
        if fleet.state != FleetState::Running {
            return Err(SupervisorError::InappropriateCondition);
        }
        if size <= 0 {
            return Err(SupervisorError::InvalidArgument);
        }
        fleet.workers.resize(size as usize, WorkerState::Running);
        info!(workers = fleet.workers.len(), "fleet rescaled");
        Ok(())
    }

    async fn graceful_shutdown(&self) -> Result<(), SupervisorError> {
        let mut fleet = self.fleet.lock().await;
        if fleet.state != FleetState::Running {
            return Err(SupervisorError::InappropriateCondition);
        }
        if fleet.workers.contains(&WorkerState::Errored) {
            return Err(SupervisorError::WorkerStatus);
        }
        fleet.state = FleetState::Stopping;
        fleet.workers.clear();
        fleet.state = FleetState::Stopped;
        info!("fleet shut down");
        Ok(())
    }

    async fn graceful_reload(&self) -> Result<(), SupervisorError> {
        let mut fleet = self.fleet.lock().await;
        if fleet.state != FleetState::Running {
            return Err(SupervisorError::InappropriateCondition);
        }
        if fleet.workers.contains(&WorkerState::Errored) {
            return Err(SupervisorError::WorkerStatus);
        }
        let size = fleet.workers.len();
        fleet.workers = vec![WorkerState::Running; size];
        info!(workers = size, "fleet reloaded");
        Ok(())
    }
}
