use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stable numeric error vocabulary of the control API. Clients branch on the
/// numeric code; do not renumber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Unknown,
    AlreadyStarted,
    InappropriateCondition,
    InvalidScaleSize,
    WorkerStatus,
}

impl ErrorCode {
    pub fn code(self) -> u16 {
        match self {
            ErrorCode::Unknown => 1000,
            ErrorCode::AlreadyStarted => 1001,
            ErrorCode::InappropriateCondition => 1002,
            ErrorCode::InvalidScaleSize => 1003,
            ErrorCode::WorkerStatus => 1004,
        }
    }

    /// Fixed English wire text. Paired with the code, not localized.
    pub fn message(self) -> &'static str {
        match self {
            ErrorCode::Unknown => "Unknown error",
            ErrorCode::AlreadyStarted => "Service already started",
            ErrorCode::InappropriateCondition => "Inappropriate conditions",
            ErrorCode::InvalidScaleSize => "Invalid scale size",
            ErrorCode::WorkerStatus => "One or more workers have error state",
        }
    }

    /// 1000 is the transport-layer catch-all and 1004 a known-bad fleet
    /// condition; both are 500. The remaining codes are client refusals.
    pub fn http_status(self) -> u16 {
        match self {
            ErrorCode::Unknown | ErrorCode::WorkerStatus => 500,
            ErrorCode::AlreadyStarted
            | ErrorCode::InappropriateCondition
            | ErrorCode::InvalidScaleSize => 400,
        }
    }
}

/// Translated control-API error, ready to be rendered as an HTTP response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}: {}", .code.code(), .code.message())]
pub struct ApiError {
    pub code: ErrorCode,
}

impl ApiError {
    pub fn new(code: ErrorCode) -> Self {
        Self { code }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
}

/// Wire shape of every failure response: `{"error":{"code":…,"message":…}}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

impl From<ApiError> for ErrorEnvelope {
    fn from(value: ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: value.code.code(),
                message: value.code.message().to_string(),
            },
        }
    }
}
