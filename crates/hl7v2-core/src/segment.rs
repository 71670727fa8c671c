// Dweve HL7 - HL7 v2.x Pipe-and-Hat Messaging
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The generic segment container.
//!
//! Any segment line the typed model does not recognize (Z-segments,
//! vendor extensions, segments from a newer standard version) parses into
//! a [`GenericSegment`] without loss: every repetition, component and
//! subcomponent is retained through the fallback containers and serialized
//! back out.
//!
//! The MSH header segment does not fit this container: its second field is
//! the encoding-character definition and must be copied raw. Header
//! handling belongs to the message layer, which uses
//! [`Delimiters::from_msh_prefix`] and
//! [`SegmentWriter::put_raw`](crate::wire::SegmentWriter::put_raw).

use crate::delim::Delimiters;
use crate::error::{Hl7Error, Hl7Result};
use crate::fallback::Ufld;
use crate::types::{FromPiped, Level, Repeat};
use crate::wire::{next_separator, SegmentWriter, Span, TokenScanner};

/// A segment parsed without a schema: the three-character ID plus every
/// field as a repetition list of [`Ufld`].
///
/// Fields are 1-indexed; HL7 numbers them from the first field after the
/// segment ID.
///
/// # Examples
///
/// ```
/// use hl7v2_core::{GenericSegment, Delimiters};
///
/// let d = Delimiters::default();
/// let seg = GenericSegment::parse(&d, "ZPI|1|A^B~C^D|last").unwrap();
/// assert_eq!(seg.id(), "ZPI");
/// assert_eq!(seg.field_count(), 3);
/// assert_eq!(seg.render(&d), "ZPI|1|A^B~C^D|last");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GenericSegment {
    id: String,
    fields: Vec<Option<Repeat<Ufld>>>,
}

impl GenericSegment {
    /// An empty segment with the given ID.
    ///
    /// # Errors
    ///
    /// Rejects IDs that do not have the three-character shape (see
    /// [`validate_segment_id`]).
    pub fn new(id: impl Into<String>) -> Hl7Result<Self> {
        let id = id.into();
        validate_segment_id(&id)?;
        Ok(Self {
            id,
            fields: Vec::new(),
        })
    }

    /// Parse one segment line.
    ///
    /// A trailing segment terminator (`\r` or `\n`) is tolerated; line
    /// separation itself is owned by the message layer.
    ///
    /// # Errors
    ///
    /// An empty line is a `Structure` error. A leading token that is not a
    /// well-formed segment ID is the recoverable `UnknownSegment` case,
    /// carrying the offending line and position.
    pub fn parse(d: &Delimiters, line: &str) -> Hl7Result<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Err(Hl7Error::structure("empty segment line"));
        }
        let id_end =
            next_separator(line, 0, line.len(), d.field() as u8, d.escape() as u8)
                .unwrap_or(line.len());
        let id = &line[..id_end];
        validate_segment_id(id).map_err(|e| e.with_line(line).with_position(0))?;

        let mut fields = Vec::new();
        if id_end < line.len() {
            let body = Span::new(id_end + 1, line.len());
            let mut sc = TokenScanner::new(line, body, Some(d.field()), d.escape());
            while let Some(sp) = sc.next_span() {
                fields.push(Repeat::<Ufld>::parse_piped(d, line, sp, Level::Field)?);
            }
            while matches!(fields.last(), Some(None)) {
                fields.pop();
            }
        }
        Ok(Self {
            id: id.to_string(),
            fields,
        })
    }

    /// The segment ID.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The field at 1-based `position`.
    pub fn field(&self, position: usize) -> Option<&Repeat<Ufld>> {
        if position == 0 {
            return None;
        }
        self.fields.get(position - 1).and_then(|slot| slot.as_ref())
    }

    /// The primary repetition's first component text at 1-based
    /// `position`; the common case for plain fields.
    pub fn field_text(&self, position: usize) -> Option<&str> {
        self.field(position)
            .and_then(|reps| reps.primary())
            .and_then(|fld| fld.get_text(1))
    }

    /// Set the field at 1-based `position`, growing as needed.
    pub fn set_field(&mut self, position: usize, value: Repeat<Ufld>) {
        if position == 0 {
            return;
        }
        if self.fields.len() < position {
            self.fields.resize(position, None);
        }
        self.fields[position - 1] = Some(value);
    }

    /// Set the field at 1-based `position` to a single plain-text value.
    pub fn set_field_text(&mut self, position: usize, text: impl Into<String>) {
        self.set_field(position, Repeat::single(Ufld::from_text(text)));
    }

    /// Number of field slots, including interior absents.
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Serialize the segment line, eliding trailing absent fields.
    pub fn render(&self, d: &Delimiters) -> String {
        let mut sw = SegmentWriter::new(d, &self.id);
        for slot in &self.fields {
            sw.put(slot.as_ref());
        }
        sw.finish()
    }
}

/// Check the three-character segment ID shape: upper-case letters or
/// digits, the first a letter.
///
/// # Errors
///
/// The failure kind is `UnknownSegment`, the one case the message layer
/// can always recover from by falling back to Z-segment handling.
pub fn validate_segment_id(id: &str) -> Hl7Result<()> {
    let bytes = id.as_bytes();
    let well_formed = bytes.len() == 3
        && bytes[0].is_ascii_uppercase()
        && bytes[1..]
            .iter()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
    if !well_formed {
        return Err(Hl7Error::unknown_segment(format!(
            "not a segment ID: {:?}",
            id
        )));
    }
    Ok(())
}
