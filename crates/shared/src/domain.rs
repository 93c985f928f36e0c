use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Fleet-level status as reported by the supervisor. Opaque to the control
/// API: it is serialized verbatim, never inspected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusReport(pub Value);

/// Ordered per-worker statuses, same opacity rule as [`StatusReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerStatusList(pub Vec<Value>);

/// Body of `PUT /scale`. The size stays signed so that range checking is the
/// supervisor's decision (invalid-argument), not a deserialization bound.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScaleRequest {
    pub size: i64,
}
