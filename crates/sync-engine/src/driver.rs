//! Interactive sync run: list what each group is missing and duplicate the
//! policies the operator picks.

use crate::duplicate::duplicate_policy;
use crate::grouping::{compare_policies, MissingPolicy, PolicyGroups};
use groupsync_core::{Console, ConsoleError, GroupName, PolicyApi, Result, SyncError};
use tracing::{info, instrument, warn};

pub const REGION_PROMPT: &str = "Enter your region";
pub const API_KEY_PROMPT: &str = "Enter your C1 API key";
pub const SELECTION_PROMPT: &str =
    "Select the policies to duplicate (comma-separated indices, e.g., 1,3,5)";

/// Region and API key for one run
#[derive(Clone)]
pub struct Credentials {
    pub region: String,
    pub api_key: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("region", &self.region)
            .finish_non_exhaustive()
    }
}

impl Credentials {
    /// Use the given values, prompting for whichever is missing.
    ///
    /// Surrounding whitespace is trimmed from both values, whether they come
    /// from flags or from the prompt.
    pub fn resolve<C>(
        console: &mut C,
        region: Option<String>,
        api_key: Option<String>,
    ) -> std::result::Result<Self, ConsoleError>
    where
        C: Console + ?Sized,
    {
        let region = match region {
            Some(region) => region,
            None => console.prompt(REGION_PROMPT)?,
        };
        let api_key = match api_key {
            Some(key) => key,
            None => console.prompt(API_KEY_PROMPT)?,
        };
        Ok(Self {
            region: region.trim().to_string(),
            api_key: api_key.trim().to_string(),
        })
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SyncOptions {
    /// List missing policies without asking for a selection
    pub dry_run: bool,
}

/// Outcome counts for one run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub missing: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
}

/// Parse a comma-separated list of 1-based indices into 0-based positions.
///
/// Entries that are not plain digit strings or fall outside `1..=len` are
/// dropped. Order and repeats are kept.
pub fn parse_selection(input: &str, len: usize) -> Vec<usize> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit()))
        .filter_map(|token| token.parse::<usize>().ok())
        .filter(|index| (1..=len).contains(index))
        .map(|index| index - 1)
        .collect()
}

pub struct SyncSession<'a, A: ?Sized, C: ?Sized> {
    api: &'a A,
    console: &'a mut C,
    options: SyncOptions,
}

impl<'a, A, C> SyncSession<'a, A, C>
where
    A: PolicyApi + ?Sized,
    C: Console + ?Sized,
{
    pub fn new(api: &'a A, console: &'a mut C, options: SyncOptions) -> Self {
        Self {
            api,
            console,
            options,
        }
    }

    /// Fetch, compare and duplicate.
    ///
    /// Only a failed (or empty) initial listing ends the run with an error;
    /// individual duplication failures are printed and counted.
    #[instrument(skip(self), fields(dry_run = self.options.dry_run))]
    pub async fn run(&mut self) -> Result<SyncReport> {
        let policies = match self.api.fetch_policies().await {
            Ok(policies) if !policies.is_empty() => policies,
            Ok(_) => {
                self.console.println("No policies returned.");
                self.console.println("Exiting...");
                return Err(SyncError::NoPolicies);
            }
            Err(err) => {
                self.console.println(&err.to_string());
                self.console.println("Exiting...");
                return Err(err.into());
            }
        };

        let (comparison, groups) = compare_policies(&policies);
        let mut report = SyncReport {
            missing: comparison.total(),
            ..SyncReport::default()
        };

        if comparison.is_empty() {
            self.console.println("All policy groups are in sync.");
        }

        for group in GroupName::ALL {
            let entries = comparison.entries_for(group);
            if entries.is_empty() {
                continue;
            }

            self.console
                .println(&format!("Missing policies for {group}:"));
            for (i, entry) in entries.iter().enumerate() {
                self.console.println(&format!(
                    "{}. {} is missing in {}",
                    i + 1,
                    entry.role,
                    entry.target
                ));
            }

            if self.options.dry_run {
                continue;
            }

            let answer = self.console.prompt(SELECTION_PROMPT)?;
            for index in parse_selection(&answer, entries.len()) {
                self.duplicate_entry(&groups, &entries[index], &mut report)
                    .await;
            }
        }

        info!(
            missing = report.missing,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            skipped = report.skipped,
            "Sync run finished"
        );
        Ok(report)
    }

    async fn duplicate_entry(
        &mut self,
        groups: &PolicyGroups,
        entry: &MissingPolicy,
        report: &mut SyncReport,
    ) {
        let Some(source_id) = groups.get(entry.source).child(&entry.role) else {
            report.skipped += 1;
            return;
        };
        let Some(target_parent_id) = groups.get(entry.target).id else {
            warn!(target = %entry.target, "Target group policy not found");
            self.console.println(&format!(
                "Cannot duplicate {}: no {} policy found.",
                entry.role, entry.target
            ));
            report.skipped += 1;
            return;
        };

        let new_name = entry.duplicate_name();
        report.attempted += 1;
        match duplicate_policy(self.api, source_id, &new_name, target_parent_id).await {
            Ok(_) => {
                report.succeeded += 1;
                self.console
                    .println(&format!("Successfully duplicated policy as {new_name}."));
            }
            Err(err) => {
                report.failed += 1;
                self.console.println(&err.to_string());
            }
        }
    }
}
