//! # Loader — Validate, Then Parse
//!
//! Orchestrates a load: resolve the pathname, validate one stream
//! against the schema, then parse a second, independently opened stream
//! into the index. The parser never runs on a document that failed
//! validation, so no partial index can ever escape.
//!
//! Each stream lives in its own scope; its file handle is dropped on
//! every exit path, success or failure. A failed load is terminal for
//! that call — retry by calling [`load`] again.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::LoadError;
use crate::index::RoleGroupIndex;
use crate::parse::parse;
use crate::resolve::{resolve, resolve_with_base};
use crate::validate::validate;

/// Load a role-to-groups mapping file into a [`RoleGroupIndex`].
///
/// `pathname` may be absolute or relative to the process-level base
/// directory (see [`crate::resolve::BASE_DIR_ENV`], read at call time).
///
/// # Errors
///
/// Any failure — resolution, open, validation, parse — aborts the whole
/// load and surfaces as a single [`LoadError`] carrying the phase cause.
pub fn load(pathname: &str) -> Result<RoleGroupIndex, LoadError> {
    load_resolved(resolve(pathname)?)
}

/// Like [`load`], but resolving relative pathnames against an explicit
/// base directory instead of the environment.
pub fn load_with_base(pathname: &str, base: Option<&Path>) -> Result<RoleGroupIndex, LoadError> {
    load_resolved(resolve_with_base(pathname, base)?)
}

fn load_resolved(path: std::path::PathBuf) -> Result<RoleGroupIndex, LoadError> {
    tracing::debug!(path = %path.display(), "loading role-to-groups mappings");

    // Stream A: validation. The handle is dropped at the end of this
    // scope whether or not the gate passes.
    {
        let stream = open(&path)?;
        validate(stream).map_err(|source| LoadError::Validation {
            path: path.clone(),
            source,
        })?;
    }
    tracing::debug!(path = %path.display(), "validated against bundled schema");

    // Stream B: parse. Re-opened rather than rewound; validation
    // consumed stream A entirely.
    let index = {
        let stream = open(&path)?;
        parse(stream).map_err(|source| LoadError::Parse {
            path: path.clone(),
            source,
        })?
    };
    tracing::debug!(path = %path.display(), roles = index.len(), "load complete");

    Ok(index)
}

fn open(path: &Path) -> Result<BufReader<File>, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(BufReader::new(file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_file() {
        let file = write_temp(
            "<role-to-groups-mappings>\
             <role-to-groups-mapping>\
             <role-name>role1</role-name>\
             <group-dn>cn=group1,ou=groups,dc=lazydog,dc=org</group-dn>\
             </role-to-groups-mapping>\
             </role-to-groups-mappings>",
        );
        let index = load(file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            index.groups_for_role("role1"),
            ["cn=group1,ou=groups,dc=lazydog,dc=org"]
        );
    }

    #[test]
    fn test_load_empty_pathname_fails() {
        assert!(matches!(load(""), Err(LoadError::Resolve(_))));
    }

    #[test]
    fn test_load_missing_file_fails_open() {
        let err = load("/nonexistent/role-to-groups.xml").unwrap_err();
        assert!(matches!(err, LoadError::Open { .. }), "got: {err}");
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let file = write_temp(
            "<role-to-groups-mappings>\
             <role-to-groups-mapping>\
             <role-name>role1</role-name>\
             </role-to-groups-mapping>\
             </role-to-groups-mappings>",
        );
        let err = load(file.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, LoadError::Validation { .. }), "got: {err}");
    }

    #[test]
    fn test_load_with_base_resolves_relative() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("role-to-groups.xml");
        std::fs::write(&path, "<role-to-groups-mappings/>").unwrap();

        let index = load_with_base("role-to-groups.xml", Some(dir.path())).unwrap();
        assert!(index.is_empty());
    }
}
