//! # Error Types — Structured Error Hierarchy
//!
//! All errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! ## Design
//!
//! Each phase of a load has its own error type: [`ResolveError`] for
//! pathname resolution, [`ValidationError`] for the schema gate,
//! [`ParseError`] for the mapping-builder walk. [`LoadError`] is the
//! single initialization failure surfaced to the lifecycle owner; it
//! wraps the phase error as its source so diagnostics keep the full
//! cause chain, but callers are expected to treat it as opaque and
//! abort bringing up the dependent authorization component.
//!
//! Within [`ValidationError`], malformed XML, schema non-conformance,
//! and I/O failure stay distinct kinds — they collapse only at the
//! loader boundary.

use std::path::PathBuf;

use thiserror::Error;

use crate::validate::ValidationViolations;

/// Error resolving a pathname to an absolute path.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The pathname was empty.
    #[error("pathname is empty")]
    EmptyPathname,
}

/// Error from the validation phase.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// The stream is not well-formed XML. Validation aborts at the first
    /// well-formedness error; the event stream is undefined past it.
    #[error("malformed XML at byte {position}: {source}")]
    Malformed {
        /// Byte offset into the stream where reading failed.
        position: u64,
        /// The underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// The document is well-formed but violates the schema.
    #[error("document does not conform to the role-to-groups schema:\n{violations}")]
    Schema {
        /// Every violation found in one pass over the document.
        violations: ValidationViolations,
    },

    /// I/O failure reading the stream.
    #[error("io error reading stream: {0}")]
    Io(#[from] std::io::Error),
}

impl ValidationError {
    /// Classify a reader error: I/O failures keep their own kind,
    /// everything else is a well-formedness failure.
    pub(crate) fn from_read_error(position: u64, source: quick_xml::Error) -> Self {
        match source {
            quick_xml::Error::Io(e) => {
                Self::Io(std::io::Error::new(e.kind(), e.to_string()))
            }
            other => Self::Malformed {
                position,
                source: other,
            },
        }
    }
}

/// Error from the parse phase.
///
/// Rare in practice — the validator has already consumed an equivalent
/// stream — but the parser never assumes it is impossible: any stream
/// failure aborts the walk rather than committing a partial index.
#[derive(Error, Debug)]
pub enum ParseError {
    /// The event stream failed mid-walk.
    #[error("stream error at byte {position}: {source}")]
    Stream {
        /// Byte offset into the stream where reading failed.
        position: u64,
        /// The underlying reader error.
        #[source]
        source: quick_xml::Error,
    },

    /// Text content could not be decoded.
    #[error("text decode error at byte {position}: {reason}")]
    Text {
        /// Byte offset of the offending text event.
        position: u64,
        /// Why decoding failed.
        reason: String,
    },

    /// I/O failure reading the stream.
    #[error("io error reading stream: {0}")]
    Io(#[from] std::io::Error),
}

impl ParseError {
    /// Classify a reader error: I/O failures keep their own kind,
    /// everything else is a stream failure.
    pub(crate) fn from_read_error(position: u64, source: quick_xml::Error) -> Self {
        match source {
            quick_xml::Error::Io(e) => {
                Self::Io(std::io::Error::new(e.kind(), e.to_string()))
            }
            other => Self::Stream {
                position,
                source: other,
            },
        }
    }
}

/// The single initialization failure surfaced by [`crate::load()`].
///
/// A failure at any phase aborts the entire load; no partial index is
/// ever returned. The wrapped phase error is the diagnostic cause.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The pathname could not be resolved.
    #[error("unable to resolve the pathname: {0}")]
    Resolve(#[from] ResolveError),

    /// The file could not be opened.
    #[error("unable to open {path}: {source}")]
    Open {
        /// The resolved path that failed to open.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file failed validation; the parser was never invoked.
    #[error("unable to validate {path}: {source}")]
    Validation {
        /// The resolved path that failed validation.
        path: PathBuf,
        /// The validation failure.
        #[source]
        source: ValidationError,
    },

    /// The file failed to parse after passing validation.
    #[error("unable to parse {path}: {source}")]
    Parse {
        /// The resolved path that failed to parse.
        path: PathBuf,
        /// The parse failure.
        #[source]
        source: ParseError,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_keeps_cause_chain() {
        let source = ValidationError::Io(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "truncated",
        ));
        let err = LoadError::Validation {
            path: PathBuf::from("/conf/role-to-groups.xml"),
            source,
        };
        let display = err.to_string();
        assert!(display.contains("unable to validate"));
        assert!(display.contains("/conf/role-to-groups.xml"));
        assert!(std::error::Error::source(&err).is_some());
    }

    #[test]
    fn test_resolve_error_display() {
        assert_eq!(ResolveError::EmptyPathname.to_string(), "pathname is empty");
    }
}
