//! # groupsync core
//!
//! Core types and ports for keeping the dev, prd and qas Windows server
//! policy hierarchies of a Cloud One Workload Security account in step.
//!
//! - [`Policy`] keeps a typed core (id, name, parent, anti-malware scan ids)
//!   and passes every other field through unchanged
//! - [`GroupName`] and [`PolicyGroup`] model the three environment tiers
//! - [`PolicyApi`] and [`Console`] are the seams to the HTTP API and the
//!   operator's terminal

pub mod error;
pub mod group;
pub mod policy;
pub mod ports;

pub use error::{ApiError, ConsoleError, DuplicateError, Result, SyncError};
pub use group::{role_name, GroupName, PolicyGroup};
pub use policy::{strip_key, AntiMalware, Policy, PolicyId, LISTS_KEY};
pub use ports::{Console, PolicyApi};

/// Current groupsync version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build information for logs and `--version`
pub const BUILD_INFO: &str = concat!(
    "groupsync ",
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("CARGO_PKG_NAME"),
    ")"
);

/// Workload Security API endpoints
pub mod endpoints {
    pub const POLICIES: &str = "/api/policies";
    pub const API_VERSION: &str = "v1";

    /// Region-specific service host
    pub fn base_url(region: &str) -> String {
        format!("https://workload.{region}.cloudone.trendmicro.com")
    }

    pub fn policy(base_url: &str, policy_id: impl std::fmt::Display) -> String {
        format!("{base_url}{POLICIES}/{policy_id}")
    }
}
