//! Seams between the sync logic and the outside world

use crate::error::{ApiError, ConsoleError};
use crate::policy::{Policy, PolicyId};
use async_trait::async_trait;

/// Policy operations of the workload-protection API
#[async_trait]
pub trait PolicyApi {
    /// List every policy visible to the API key
    async fn fetch_policies(&self) -> Result<Vec<Policy>, ApiError>;

    async fn fetch_policy(&self, policy_id: PolicyId) -> Result<Policy, ApiError>;

    /// Create a policy; only an HTTP 200 counts as success
    async fn create_policy(&self, policy: &Policy) -> Result<(), ApiError>;
}

/// Line-oriented operator console
pub trait Console {
    /// Show `prompt` and read one line of plain-text input
    fn prompt(&mut self, prompt: &str) -> Result<String, ConsoleError>;

    fn println(&mut self, line: &str);
}
