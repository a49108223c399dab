pub use groupsync_core;

mod driver;
mod duplicate;
mod grouping;
#[cfg(test)]
mod testing;

pub use driver::{
    parse_selection, Credentials, SyncOptions, SyncReport, SyncSession, API_KEY_PROMPT,
    REGION_PROMPT, SELECTION_PROMPT,
};
pub use duplicate::{build_duplicate, duplicate_policy};
pub use grouping::{
    compare_groups, compare_policies, group_policies, ComparisonResult, MissingPolicy,
    PolicyGroups,
};

// Re-export core types for convenience
pub use groupsync_core::{
    DuplicateError, GroupName, Policy, PolicyApi, PolicyGroup, PolicyId, Result, SyncError,
};
