//! HTTP client for the Cloud One Workload Security policy endpoints.
//!
//! Implements [`groupsync_core::PolicyApi`]: every call is a single request
//! with no retries, and any status other than 200 is reported as an
//! [`groupsync_core::ApiError`] carrying the code.

pub use groupsync_core;

mod client;

pub use client::WorkloadClient;
