//! # RoleGroupIndex — Bidirectional Lookup Surface
//!
//! The immutable result of a successful load: a map from role name to
//! that role's group identifiers, in document order.
//!
//! Forward lookup is a direct map access. Reverse lookup is derived by
//! scanning every role's group list — no reverse index is maintained,
//! so memory stays proportional to the declared mappings and reverse
//! queries pay a linear scan.
//!
//! There is no mutation API. Once constructed the index is safe for any
//! number of concurrent readers.

use std::collections::HashMap;

use serde::Serialize;

/// Immutable role ↔ group lookup index.
///
/// Lookup misses are ordinary outcomes, not errors: both query methods
/// return an empty sequence for unknown, empty, or unmatched inputs.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct RoleGroupIndex {
    roles: HashMap<String, Vec<String>>,
}

impl RoleGroupIndex {
    /// Construct the index from a committed role → groups map.
    pub(crate) fn from_entries(roles: HashMap<String, Vec<String>>) -> Self {
        Self { roles }
    }

    /// The group identifiers declared for `role`, in document order.
    ///
    /// Returns an empty slice if `role` is unknown or empty.
    pub fn groups_for_role(&self, role: &str) -> &[String] {
        self.roles.get(role).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Every role whose group list contains `group_dn`.
    ///
    /// Computed by scanning the forward map; the order of the returned
    /// roles is not specified. Returns an empty vec if no role lists
    /// `group_dn`.
    pub fn roles_for_group(&self, group_dn: &str) -> Vec<&str> {
        self.roles
            .iter()
            .filter(|(_, groups)| groups.iter().any(|g| g == group_dn))
            .map(|(role, _)| role.as_str())
            .collect()
    }

    /// Number of roles in the index.
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Whether the index holds no roles.
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Iterate over the role names in the index (unspecified order).
    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RoleGroupIndex {
        let mut roles = HashMap::new();
        roles.insert(
            "role1".to_string(),
            vec!["cn=group1".to_string(), "cn=group2".to_string()],
        );
        roles.insert("role2".to_string(), vec!["cn=group2".to_string()]);
        RoleGroupIndex::from_entries(roles)
    }

    #[test]
    fn test_groups_for_role_hit() {
        let index = sample();
        assert_eq!(index.groups_for_role("role1"), ["cn=group1", "cn=group2"]);
    }

    #[test]
    fn test_groups_for_role_miss_is_empty_not_error() {
        let index = sample();
        assert!(index.groups_for_role("unknown-role").is_empty());
        assert!(index.groups_for_role("").is_empty());
    }

    #[test]
    fn test_roles_for_group_single_match() {
        let index = sample();
        assert_eq!(index.roles_for_group("cn=group1"), ["role1"]);
    }

    #[test]
    fn test_roles_for_group_multiple_matches_as_set() {
        let index = sample();
        // Order among matching roles is not specified.
        let mut roles = index.roles_for_group("cn=group2");
        roles.sort_unstable();
        assert_eq!(roles, ["role1", "role2"]);
    }

    #[test]
    fn test_roles_for_group_miss_is_empty() {
        let index = sample();
        assert!(index.roles_for_group("cn=absent").is_empty());
        assert!(index.roles_for_group("").is_empty());
    }

    #[test]
    fn test_len_and_roles_iter() {
        let index = sample();
        assert_eq!(index.len(), 2);
        assert!(!index.is_empty());
        let mut names: Vec<&str> = index.roles().collect();
        names.sort_unstable();
        assert_eq!(names, ["role1", "role2"]);
    }

    #[test]
    fn test_serializes_as_plain_map() {
        let index = sample();
        let value = serde_json::to_value(&index).unwrap();
        assert_eq!(value["role2"][0], "cn=group2");
    }
}
