//! # Pathname Resolution
//!
//! Resolves the configuration pathname handed to the loader. Absolute
//! paths pass through untouched. Relative paths resolve against the
//! process-level base directory named by [`BASE_DIR_ENV`], read at call
//! time; when it is unset, the path stays relative and the operating
//! system resolves it against the working directory on open.

use std::path::{Path, PathBuf};

use crate::error::ResolveError;

/// Environment variable naming the base directory for relative
/// configuration pathnames.
pub const BASE_DIR_ENV: &str = "ROLE_MAPPINGS_BASE_DIR";

/// Resolve `pathname` against the process-level base directory.
///
/// # Errors
///
/// [`ResolveError::EmptyPathname`] if `pathname` is empty.
pub fn resolve(pathname: &str) -> Result<PathBuf, ResolveError> {
    let base = std::env::var_os(BASE_DIR_ENV).map(PathBuf::from);
    resolve_with_base(pathname, base.as_deref())
}

/// Resolve `pathname` against an explicit base directory.
///
/// Absolute pathnames ignore `base`. With `base` of `None`, relative
/// pathnames are returned unchanged.
///
/// # Errors
///
/// [`ResolveError::EmptyPathname`] if `pathname` is empty.
pub fn resolve_with_base(pathname: &str, base: Option<&Path>) -> Result<PathBuf, ResolveError> {
    if pathname.is_empty() {
        return Err(ResolveError::EmptyPathname);
    }

    let path = Path::new(pathname);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }

    Ok(match base {
        Some(base) => base.join(path),
        None => path.to_path_buf(),
    })
}
