//! Environment groups and their child roles

use crate::policy::PolicyId;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The three top-level policies that anchor an environment tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GroupName {
    Dev,
    Prd,
    Qas,
}

impl GroupName {
    pub const ALL: [GroupName; 3] = [GroupName::Dev, GroupName::Prd, GroupName::Qas];

    pub fn as_str(&self) -> &'static str {
        match self {
            GroupName::Dev => "dev-WinSvr",
            GroupName::Prd => "prd-WinSvr",
            GroupName::Qas => "qas-WinSvr",
        }
    }

    /// Exact, case-sensitive match against a policy name
    pub fn from_policy_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|group| group.as_str() == name)
    }
}

impl fmt::Display for GroupName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_policy_name(s).ok_or_else(|| format!("unknown policy group: {s}"))
    }
}

/// Role name of a child policy: everything after the final hyphen.
///
/// A name without a hyphen is its own role name.
pub fn role_name(policy_name: &str) -> &str {
    policy_name
        .rsplit_once('-')
        .map_or(policy_name, |(_, role)| role)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PolicyGroup {
    /// Id of the policy named after the group, once seen
    pub id: Option<PolicyId>,
    /// Role name to child policy id; a later child with the same role wins
    pub children: BTreeMap<String, PolicyId>,
}

impl PolicyGroup {
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.children.keys().map(String::as_str)
    }

    pub fn child(&self, role: &str) -> Option<PolicyId> {
        self.children.get(role).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_takes_suffix_after_last_hyphen() {
        assert_eq!(role_name("prd-WinSvr-AntiMalware"), "AntiMalware");
        assert_eq!(role_name("dev-WinSvr-IIS-Web"), "Web");
        assert_eq!(role_name("Standalone"), "Standalone");
        assert_eq!(role_name("trailing-"), "");
    }

    #[test]
    fn test_group_names_match_exactly() {
        assert_eq!(GroupName::from_policy_name("dev-WinSvr"), Some(GroupName::Dev));
        assert_eq!(GroupName::from_policy_name("qas-WinSvr"), Some(GroupName::Qas));
        assert_eq!(GroupName::from_policy_name("DEV-WinSvr"), None);
        assert_eq!(GroupName::from_policy_name("prd-WinSvr-Base"), None);
        assert_eq!("prd-WinSvr".parse::<GroupName>(), Ok(GroupName::Prd));
    }

    #[test]
    fn test_groups_iterate_in_fixed_order() {
        let names: Vec<_> = GroupName::ALL.iter().map(GroupName::to_string).collect();
        assert_eq!(names, ["dev-WinSvr", "prd-WinSvr", "qas-WinSvr"]);
    }
}
