//! Error types for policy group synchronization

use crate::policy::PolicyId;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SyncError>;

/// Failures talking to the workload-protection API.
///
/// The status variants render the operator-facing message directly.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Failed to retrieve policies. HTTP Status Code: {status}")]
    ListFailed { status: u16 },

    #[error("Failed to retrieve policy {policy_id}. HTTP Status Code: {status}")]
    FetchFailed { policy_id: PolicyId, status: u16 },

    #[error("Failed to create policy. HTTP Status Code: {status}")]
    CreateFailed { status: u16 },

    #[error("Request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("Unexpected response body from {url}: {reason}")]
    Decode { url: String, reason: String },
}

impl ApiError {
    /// HTTP status of a non-200 response, if one was received
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::ListFailed { status }
            | ApiError::FetchFailed { status, .. }
            | ApiError::CreateFailed { status } => Some(*status),
            ApiError::Transport { .. } | ApiError::Decode { .. } => None,
        }
    }
}

#[derive(Error, Debug)]
pub enum DuplicateError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Policy {policy_id} has no antiMalware settings")]
    MissingAntiMalware { policy_id: PolicyId },
}

#[derive(Error, Debug)]
pub enum ConsoleError {
    #[error("Console input failed: {reason}")]
    Input { reason: String },
}

/// Errors that end a sync run
#[derive(Error, Debug)]
pub enum SyncError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("No policies returned")]
    NoPolicies,

    #[error(transparent)]
    Console(#[from] ConsoleError),
}
