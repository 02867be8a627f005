//! # Schema Artifact & Element Vocabulary
//!
//! The role-to-groups document format is governed by a single fixed XSD
//! bundled with the crate. The schema is addressed by a logical resource
//! name ([`SCHEMA_RESOURCE`]) and is not caller-configurable.
//!
//! The vocabulary is exactly four element kinds. Tag dispatch is
//! case-insensitive and treats internal hyphens as word separators, so
//! `role-name`, `ROLE-NAME`, and `Role_Name` all resolve to
//! [`ElementName::RoleName`].

/// Logical resource name of the bundled schema artifact.
pub const SCHEMA_RESOURCE: &str = "schemas/role-to-groups.xsd";

/// The bundled XSD governing role-to-groups documents.
pub const SCHEMA_XSD: &str = include_str!("../schemas/role-to-groups.xsd");

/// The fixed set of element kinds a role-to-groups document may contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementName {
    /// Root container, `<role-to-groups-mappings>`.
    RoleToGroupsMappings,
    /// Per-entry container, `<role-to-groups-mapping>`.
    RoleToGroupsMapping,
    /// Role-name leaf, `<role-name>`.
    RoleName,
    /// Group-identifier leaf, `<group-dn>`.
    GroupDn,
}

impl ElementName {
    /// Resolve a raw tag name to an element kind.
    ///
    /// Normalizes ASCII case and maps `-` to `_` before matching, then
    /// compares against the fixed vocabulary. Returns `None` for any tag
    /// outside the vocabulary.
    pub fn from_tag(tag: &[u8]) -> Option<Self> {
        let normalized: Vec<u8> = tag
            .iter()
            .map(|b| match b {
                b'-' => b'_',
                other => other.to_ascii_uppercase(),
            })
            .collect();

        match normalized.as_slice() {
            b"ROLE_TO_GROUPS_MAPPINGS" => Some(Self::RoleToGroupsMappings),
            b"ROLE_TO_GROUPS_MAPPING" => Some(Self::RoleToGroupsMapping),
            b"ROLE_NAME" => Some(Self::RoleName),
            b"GROUP_DN" => Some(Self::GroupDn),
            _ => None,
        }
    }

    /// Canonical (hyphenated, lowercase) tag name, for diagnostics.
    pub fn as_tag(&self) -> &'static str {
        match self {
            Self::RoleToGroupsMappings => "role-to-groups-mappings",
            Self::RoleToGroupsMapping => "role-to-groups-mapping",
            Self::RoleName => "role-name",
            Self::GroupDn => "group-dn",
        }
    }
}

impl std::fmt::Display for ElementName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_canonical_names() {
        assert_eq!(
            ElementName::from_tag(b"role-to-groups-mappings"),
            Some(ElementName::RoleToGroupsMappings)
        );
        assert_eq!(
            ElementName::from_tag(b"role-to-groups-mapping"),
            Some(ElementName::RoleToGroupsMapping)
        );
        assert_eq!(ElementName::from_tag(b"role-name"), Some(ElementName::RoleName));
        assert_eq!(ElementName::from_tag(b"group-dn"), Some(ElementName::GroupDn));
    }

    #[test]
    fn test_from_tag_case_insensitive() {
        assert_eq!(ElementName::from_tag(b"ROLE-NAME"), Some(ElementName::RoleName));
        assert_eq!(ElementName::from_tag(b"Group-Dn"), Some(ElementName::GroupDn));
    }

    #[test]
    fn test_from_tag_underscores_accepted() {
        // Hyphens normalize to underscores, so underscore spellings also match.
        assert_eq!(ElementName::from_tag(b"role_name"), Some(ElementName::RoleName));
    }

    #[test]
    fn test_from_tag_unknown() {
        assert_eq!(ElementName::from_tag(b"role"), None);
        assert_eq!(ElementName::from_tag(b"group"), None);
        assert_eq!(ElementName::from_tag(b""), None);
    }

    #[test]
    fn test_schema_artifact_bundled() {
        assert!(SCHEMA_XSD.contains("role-to-groups-mappings"));
        assert!(SCHEMA_XSD.contains("minLength"));
        assert!(SCHEMA_RESOURCE.ends_with(".xsd"));
    }

    #[test]
    fn test_display_is_canonical_tag() {
        assert_eq!(ElementName::RoleName.to_string(), "role-name");
    }
}
