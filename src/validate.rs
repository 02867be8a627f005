//! # Schema Validation
//!
//! Structural validation of a role-to-groups byte stream against the
//! bundled schema ([`crate::schema::SCHEMA_RESOURCE`]).
//!
//! ## Security Invariant
//!
//! Validation is a trust boundary: the mapping builder runs only after a
//! stream has passed this gate, and it relies on the shape guarantees
//! enforced here (exactly one non-blank `<role-name>` followed by one or
//! more non-blank `<group-dn>` per mapping entry).
//!
//! ## Behavior
//!
//! The validator walks the stream as structural events and enforces the
//! schema's constraints directly — a validating structural-event reader
//! over one fixed vocabulary. It produces no data, only pass/fail. Schema
//! violations are collected across the whole document and reported
//! together as [`ValidationViolations`]; a well-formedness error aborts
//! immediately, since the event stream is undefined past it.

use std::io::BufRead;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::ValidationError;
use crate::schema::ElementName;

/// A single schema violation with its location in the stream.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Byte offset into the stream where the violation was detected.
    pub position: u64,
    /// Human-readable description of the violation.
    pub message: String,
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "  byte {}: {}", self.position, self.message)
    }
}

/// Collection of schema violations found in one pass over a document.
#[derive(Debug, Clone)]
pub struct ValidationViolations {
    violations: Vec<Violation>,
}

impl ValidationViolations {
    /// Returns the number of violations.
    pub fn len(&self) -> usize {
        self.violations.len()
    }

    /// Returns true if there are no violations.
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }

    /// Returns a slice of all violations.
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Consumes self and returns the inner Vec.
    pub fn into_inner(self) -> Vec<Violation> {
        self.violations
    }
}

impl std::fmt::Display for ValidationViolations {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, v) in self.violations.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{v}")?;
        }
        Ok(())
    }
}

/// One open element on the walk stack.
///
/// `name` is `None` for elements outside the fixed vocabulary; their
/// contents are not checked further (the unknown element itself has
/// already been flagged).
struct Frame {
    name: Option<ElementName>,
    /// Entry containers: whether a `<role-name>` child was seen.
    seen_role: bool,
    /// Entry containers: number of `<group-dn>` children seen.
    group_count: usize,
    /// Leaves: whether non-blank text content was seen.
    has_text: bool,
    /// Entry containers: 1-based ordinal for diagnostics.
    ordinal: usize,
}

impl Frame {
    fn new(name: Option<ElementName>, ordinal: usize) -> Self {
        Self {
            name,
            seen_role: false,
            group_count: 0,
            has_text: false,
            ordinal,
        }
    }
}

/// Checker state shared across the event walk.
struct Checker {
    stack: Vec<Frame>,
    violations: Vec<Violation>,
    seen_root: bool,
    entries: usize,
}

impl Checker {
    fn new() -> Self {
        Self {
            stack: Vec::new(),
            violations: Vec::new(),
            seen_root: false,
            entries: 0,
        }
    }

    fn flag(&mut self, position: u64, message: String) {
        self.violations.push(Violation { position, message });
    }

    /// Element-open transition. Returns the frame for the new element.
    fn on_start(&mut self, tag: &[u8], position: u64) -> Frame {
        let kind = ElementName::from_tag(tag);
        let raw = String::from_utf8_lossy(tag);

        match self.stack.last_mut() {
            // Document level.
            None => {
                if self.seen_root {
                    self.flag(position, format!("unexpected element <{raw}> after the document root"));
                } else {
                    self.seen_root = true;
                    if kind != Some(ElementName::RoleToGroupsMappings) {
                        self.flag(
                            position,
                            format!("root element must be <role-to-groups-mappings>, found <{raw}>"),
                        );
                    }
                }
            }
            Some(parent) => match parent.name {
                // Inside the root container.
                Some(ElementName::RoleToGroupsMappings) => {
                    if kind != Some(ElementName::RoleToGroupsMapping) {
                        self.flag(
                            position,
                            format!(
                                "unexpected element <{raw}> inside <role-to-groups-mappings>; \
                                 expected <role-to-groups-mapping>"
                            ),
                        );
                    }
                }
                // Inside a mapping entry.
                Some(ElementName::RoleToGroupsMapping) => {
                    let ordinal = parent.ordinal;
                    match kind {
                        Some(ElementName::RoleName) => {
                            if parent.seen_role {
                                self.flag(
                                    position,
                                    format!("mapping entry {ordinal}: more than one <role-name>"),
                                );
                            } else if parent.group_count > 0 {
                                parent.seen_role = true;
                                self.flag(
                                    position,
                                    format!(
                                        "mapping entry {ordinal}: <role-name> must precede \
                                         every <group-dn>"
                                    ),
                                );
                            } else {
                                parent.seen_role = true;
                            }
                        }
                        Some(ElementName::GroupDn) => {
                            parent.group_count += 1;
                        }
                        _ => {
                            self.flag(
                                position,
                                format!("mapping entry {ordinal}: unexpected element <{raw}>"),
                            );
                        }
                    }
                }
                // Inside a leaf.
                Some(leaf @ (ElementName::RoleName | ElementName::GroupDn)) => {
                    self.flag(
                        position,
                        format!("<{leaf}> must contain text only, found element <{raw}>"),
                    );
                }
                // Inside an element we already flagged as unknown; no cascade.
                None => {}
            },
        }

        let ordinal = if kind == Some(ElementName::RoleToGroupsMapping) {
            self.entries += 1;
            self.entries
        } else {
            0
        };
        Frame::new(kind, ordinal)
    }

    /// Element-close transition for a popped frame.
    fn on_end(&mut self, frame: Frame, position: u64) {
        match frame.name {
            Some(ElementName::RoleToGroupsMapping) => {
                if !frame.seen_role {
                    self.flag(
                        position,
                        format!("mapping entry {}: missing <role-name>", frame.ordinal),
                    );
                }
                if frame.group_count == 0 {
                    self.flag(
                        position,
                        format!(
                            "mapping entry {}: must declare at least one <group-dn>",
                            frame.ordinal
                        ),
                    );
                }
            }
            Some(leaf @ (ElementName::RoleName | ElementName::GroupDn)) => {
                if !frame.has_text {
                    self.flag(position, format!("<{leaf}> must not be empty"));
                }
            }
            _ => {}
        }
    }

    /// Text event. Blank runs between elements are insignificant.
    fn on_text(&mut self, raw: &[u8], position: u64) {
        if raw.iter().all(|b| b.is_ascii_whitespace()) {
            return;
        }
        match self.stack.last_mut() {
            Some(frame) => match frame.name {
                Some(ElementName::RoleName | ElementName::GroupDn) => {
                    frame.has_text = true;
                }
                Some(container) => {
                    self.flag(
                        position,
                        format!("text content not allowed inside <{container}>"),
                    );
                }
                None => {}
            },
            None => {
                self.flag(position, "text content outside the document root".to_string());
            }
        }
    }
}

/// Validate a role-to-groups byte stream against the bundled schema.
///
/// Produces no data — only success or failure. Fully consumes the
/// stream: every violation the document contains is found in one pass.
///
/// # Errors
///
/// [`ValidationError::Malformed`] if the stream is not well-formed XML,
/// [`ValidationError::Schema`] with the collected [`ValidationViolations`]
/// if it is well-formed but does not conform, [`ValidationError::Io`] if
/// the underlying read fails.
pub fn validate<R: BufRead>(stream: R) -> Result<(), ValidationError> {
    let mut reader = Reader::from_reader(stream);
    let mut buf = Vec::new();
    let mut checker = Checker::new();

    loop {
        let position = reader.buffer_position();
        match reader.read_event_into(&mut buf) {
            Err(e) => return Err(ValidationError::from_read_error(position, e)),
            Ok(Event::Start(e)) => {
                let frame = checker.on_start(e.local_name().as_ref(), position);
                checker.stack.push(frame);
            }
            Ok(Event::Empty(e)) => {
                // Self-closing element: open and close in one step.
                let frame = checker.on_start(e.local_name().as_ref(), position);
                checker.on_end(frame, position);
            }
            Ok(Event::End(_)) => {
                if let Some(frame) = checker.stack.pop() {
                    checker.on_end(frame, position);
                }
            }
            Ok(Event::Text(e)) => checker.on_text(&e, position),
            Ok(Event::CData(e)) => checker.on_text(&e, position),
            Ok(Event::Eof) => break,
            // Declaration, comments, processing instructions, doctype.
            Ok(_) => {}
        }
        buf.clear();
    }

    let position = reader.buffer_position();
    if !checker.stack.is_empty() {
        checker.flag(position, "unexpected end of document".to_string());
    }
    if !checker.seen_root {
        checker.flag(position, "document has no root element".to_string());
    }

    if checker.violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Schema {
            violations: ValidationViolations {
                violations: checker.violations,
            },
        })
    }
}
