//! Policy grouping and cross-environment comparison
//!
//! Groups are discovered before children are assigned, so a child listed
//! ahead of its group policy still lands in that group.

use groupsync_core::{role_name, GroupName, Policy, PolicyGroup, PolicyId};
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument};

/// The three environment groups built from one policy listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyGroups {
    groups: BTreeMap<GroupName, PolicyGroup>,
}

impl Default for PolicyGroups {
    fn default() -> Self {
        Self {
            groups: GroupName::ALL
                .into_iter()
                .map(|name| (name, PolicyGroup::default()))
                .collect(),
        }
    }
}

impl PolicyGroups {
    pub fn get(&self, name: GroupName) -> &PolicyGroup {
        // every name is inserted by Default and never removed
        &self.groups[&name]
    }

    fn get_mut(&mut self, name: GroupName) -> &mut PolicyGroup {
        self.groups.entry(name).or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (GroupName, &PolicyGroup)> {
        self.groups.iter().map(|(name, group)| (*name, group))
    }

    /// Groups whose own policy is `parent_id`
    fn parented_by(&self, parent_id: PolicyId) -> Vec<GroupName> {
        self.iter()
            .filter(|(_, group)| group.id == Some(parent_id))
            .map(|(name, _)| name)
            .collect()
    }
}

/// A role present under `source` but absent under `target`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPolicy {
    pub role: String,
    pub source: GroupName,
    pub target: GroupName,
}

impl MissingPolicy {
    /// Name the copy receives under the target group
    pub fn duplicate_name(&self) -> String {
        format!("{}-{}", self.target, self.role)
    }
}

/// Roles each group has that another group lacks, keyed source then target.
///
/// Only non-empty differences are recorded and a group is never compared
/// with itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonResult {
    missing: BTreeMap<GroupName, BTreeMap<GroupName, Vec<String>>>,
}

impl ComparisonResult {
    /// Roles of `source` missing from `target`, sorted
    pub fn missing(&self, source: GroupName, target: GroupName) -> &[String] {
        self.missing
            .get(&source)
            .and_then(|targets| targets.get(&target))
            .map_or(&[], Vec::as_slice)
    }

    pub fn contains_pair(&self, source: GroupName, target: GroupName) -> bool {
        !self.missing(source, target).is_empty()
    }

    /// Everything `source` could contribute, target by target
    pub fn entries_for(&self, source: GroupName) -> Vec<MissingPolicy> {
        self.missing
            .get(&source)
            .into_iter()
            .flat_map(|targets| targets.iter())
            .flat_map(|(target, roles)| {
                roles.iter().map(move |role| MissingPolicy {
                    role: role.clone(),
                    source,
                    target: *target,
                })
            })
            .collect()
    }

    pub fn total(&self) -> usize {
        self.missing
            .values()
            .flat_map(|targets| targets.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Sort a policy listing into the three environment groups.
///
/// Pass one records each group's own id (a later policy with the same group
/// name wins). Pass two files every other policy under the group whose id
/// matches its parent, keyed by role name; a later child with the same role
/// replaces an earlier one. Policies with no matching parent are ignored.
#[instrument(skip(policies), fields(policies = policies.len()))]
pub fn group_policies(policies: &[Policy]) -> PolicyGroups {
    let mut groups = PolicyGroups::default();

    for policy in policies {
        if let Some(name) = GroupName::from_policy_name(&policy.name) {
            groups.get_mut(name).id = policy.id;
        }
    }

    for policy in policies {
        if GroupName::from_policy_name(&policy.name).is_some() {
            continue;
        }
        let (Some(parent_id), Some(id)) = (policy.parent(), policy.id) else {
            continue;
        };

        for name in groups.parented_by(parent_id) {
            let role = role_name(&policy.name).to_string();
            debug!(group = %name, role = %role, policy_id = %id, "Child policy");
            groups.get_mut(name).children.insert(role, id);
        }
    }

    groups
}

/// Set difference of child role names for every ordered pair of groups
#[instrument(skip(groups))]
pub fn compare_groups(groups: &PolicyGroups) -> ComparisonResult {
    let mut result = ComparisonResult::default();

    for (source, source_group) in groups.iter() {
        let roles: BTreeSet<&str> = source_group.role_names().collect();

        for (target, target_group) in groups.iter() {
            if source == target {
                continue;
            }
            let other: BTreeSet<&str> = target_group.role_names().collect();
            let missing: Vec<String> = roles.difference(&other).map(|r| r.to_string()).collect();

            if !missing.is_empty() {
                result
                    .missing
                    .entry(source)
                    .or_default()
                    .insert(target, missing);
            }
        }
    }

    info!("Found {} missing policies across groups", result.total());
    result
}

/// Group a policy listing and compare the groups in one go
pub fn compare_policies(policies: &[Policy]) -> (ComparisonResult, PolicyGroups) {
    let groups = group_policies(policies);
    (compare_groups(&groups), groups)
}
