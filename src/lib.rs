//! # role-mappings — Role ↔ Directory-Group Configuration
//!
//! Loads an XML configuration file declaring a many-to-many relationship
//! between application roles and directory-service group identifiers
//! (group DNs), validates it against the bundled schema, and exposes the
//! result as an immutable bidirectional lookup index. Consumed by the
//! authorization subsystem to translate a directory group membership
//! into application roles, and vice versa.
//!
//! ## Pipeline
//!
//! A load is strictly two-phase: [`validate()`] consumes one stream and
//! confirms schema conformance; only then does [`parse()`] consume a
//! second, independently opened stream and build the map. [`load()`]
//! composes the two. A document that fails the gate never reaches the
//! mapping builder, so a partially populated [`RoleGroupIndex`] cannot
//! exist.
//!
//! ## Query surface
//!
//! [`RoleGroupIndex::groups_for_role`] is a direct map access;
//! [`RoleGroupIndex::roles_for_group`] is derived by scanning the
//! forward map. Lookup misses return empty sequences, never errors.
//!
//! ## Crate Policy
//!
//! - The index is read-only after construction; no mutation API.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - Every load failure surfaces as one [`LoadError`] with the phase
//!   cause attached; no partial results on any failure path.
//!
//! ## Example
//!
//! ```no_run
//! use role_mappings::load;
//!
//! let index = load("conf/role-to-groups.xml")?;
//! for group_dn in index.groups_for_role("role1") {
//!     println!("{group_dn}");
//! }
//! # Ok::<(), role_mappings::LoadError>(())
//! ```

pub mod error;
pub mod index;
pub mod load;
pub mod parse;
pub mod resolve;
pub mod schema;
pub mod validate;

// Re-export primary types for ergonomic imports.
pub use error::{LoadError, ParseError, ResolveError, ValidationError};
pub use index::RoleGroupIndex;
pub use load::{load, load_with_base};
pub use resolve::{resolve, resolve_with_base, BASE_DIR_ENV};
pub use schema::{ElementName, SCHEMA_RESOURCE, SCHEMA_XSD};
pub use validate::{validate, ValidationViolations, Violation};
