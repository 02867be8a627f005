//! # Mapping Builder
//!
//! Builds the role → groups map by walking a role-to-groups byte stream
//! as a sequence of structural events.
//!
//! ## Contract
//!
//! The builder trusts a prior successful validation pass for structural
//! shape: it dispatches on the four known element names only, ignores
//! anything else, and does not re-enforce the schema's cardinality
//! rules. Stream-level failures are still propagated — a partial map is
//! never returned.
//!
//! ## Walk state
//!
//! One transient accumulator per mapping entry: the current role name
//! and the current group list. Entering an entry container resets both;
//! leaving it commits them into the map. A role name declared by a later
//! entry replaces an earlier entry's group list outright (last write
//! wins, no merge).

use std::collections::HashMap;
use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ParseError;
use crate::index::RoleGroupIndex;
use crate::schema::ElementName;

/// Build a [`RoleGroupIndex`] from a role-to-groups byte stream.
///
/// Fully consumes the stream. The stream is expected to have passed
/// [`crate::validate()`] already; see the module docs for what the
/// builder does and does not enforce on its own.
///
/// # Errors
///
/// [`ParseError`] if the event stream fails mid-walk or text content
/// cannot be decoded.
pub fn parse<R: BufRead>(stream: R) -> Result<RoleGroupIndex, ParseError> {
    let mut reader = Reader::from_reader(stream);
    let mut buf = Vec::new();

    let mut roles: HashMap<String, Vec<String>> = HashMap::new();
    let mut current_role: Option<String> = None;
    let mut current_groups: Vec<String> = Vec::new();
    // Which leaf, if any, the next text event belongs to.
    let mut pending_leaf: Option<ElementName> = None;

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(ParseError::from_read_error(position, e)),
            Ok(Event::Start(e)) => {
                match ElementName::from_tag(e.local_name().as_ref()) {
                    Some(ElementName::RoleToGroupsMapping) => {
                        current_role = None;
                        current_groups = Vec::new();
                    }
                    Some(leaf @ (ElementName::RoleName | ElementName::GroupDn)) => {
                        pending_leaf = Some(leaf);
                    }
                    // Root container and unknown names: no state change.
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(leaf) = pending_leaf.take() {
                    let text = e.unescape().map_err(|err| ParseError::Text {
                        position,
                        reason: err.to_string(),
                    })?;
                    record(leaf, text.into_owned(), &mut current_role, &mut current_groups);
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(leaf) = pending_leaf.take() {
                    let text = std::str::from_utf8(&e)
                        .map_err(|err| ParseError::Text {
                            position,
                            reason: err.to_string(),
                        })?
                        .to_owned();
                    record(leaf, text, &mut current_role, &mut current_groups);
                }
            }
            Ok(Event::End(e)) => {
                pending_leaf = None;
                if ElementName::from_tag(e.local_name().as_ref())
                    == Some(ElementName::RoleToGroupsMapping)
                {
                    // Commit the entry. An entry without a role name can
                    // only arise on an unvalidated stream; it is skipped,
                    // never committed under a fabricated key.
                    if let Some(role) = current_role.take() {
                        roles.insert(role, std::mem::take(&mut current_groups));
                    } else {
                        current_groups.clear();
                    }
                }
            }
            Ok(Event::Eof) => break,
            // Empty elements carry no text; declarations, comments,
            // processing instructions carry no mapping data.
            Ok(_) => {}
        }
        buf.clear();
    }

    tracing::debug!(roles = roles.len(), "built role-to-groups map");
    Ok(RoleGroupIndex::from_entries(roles))
}

/// Route one leaf's text content into the entry accumulator.
fn record(
    leaf: ElementName,
    text: String,
    current_role: &mut Option<String>,
    current_groups: &mut Vec<String>,
) {
    match leaf {
        ElementName::RoleName => *current_role = Some(text),
        ElementName::GroupDn => current_groups.push(text),
        _ => {}
    }
}
