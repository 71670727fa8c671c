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

//! Lossless fallback containers for unrecognized structure.
//!
//! Z-segments, vendor extensions and fields from a newer message version
//! than the schema must survive a parse→mutate→serialize cycle verbatim.
//! [`Ucmp`] holds one component's raw subcomponents; [`Ufld`] holds one
//! field's components. Neither has a fixed schema: positions are 1-indexed,
//! sparse, and grow on demand.

use crate::delim::Delimiters;
use crate::error::Hl7Result;
use crate::types::{FromPiped, Level, ToPiped};
use crate::wire::{ComponentWriter, PipeWriter, Span, TokenScanner};

/// An unrecognized component: an open-ended list of raw subcomponent
/// strings (logical, i.e. unescaped).
///
/// # Examples
///
/// ```
/// use hl7v2_core::Ucmp;
///
/// let mut c = Ucmp::new();
/// c.set(1, "alpha");
/// c.set(3, "gamma");
/// assert_eq!(c.get(1), Some("alpha"));
/// assert_eq!(c.get(2), None);
/// assert_eq!(c.get(99), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ucmp {
    subcomponents: Vec<Option<String>>,
}

impl Ucmp {
    /// An empty component.
    pub fn new() -> Self {
        Self::default()
    }

    /// A component holding a single subcomponent.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            subcomponents: vec![Some(text.into())],
        }
    }

    /// The subcomponent at 1-based `position`, or `None` for any unset
    /// index. Never panics.
    pub fn get(&self, position: usize) -> Option<&str> {
        if position == 0 {
            return None;
        }
        self.subcomponents
            .get(position - 1)
            .and_then(|slot| slot.as_deref())
    }

    /// Set the subcomponent at 1-based `position`, growing the backing
    /// list as needed. Position 0 is ignored.
    pub fn set(&mut self, position: usize, value: impl Into<String>) {
        if position == 0 {
            return;
        }
        if self.subcomponents.len() < position {
            self.subcomponents.resize(position, None);
        }
        self.subcomponents[position - 1] = Some(value.into());
    }

    /// Clear the subcomponent at 1-based `position`.
    pub fn unset(&mut self, position: usize) {
        if position == 0 {
            return;
        }
        if let Some(slot) = self.subcomponents.get_mut(position - 1) {
            *slot = None;
        }
    }

    /// Number of subcomponent slots, including interior absents.
    pub fn len(&self) -> usize {
        self.subcomponents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subcomponents.is_empty()
    }

    /// Drop trailing absent slots.
    pub fn prune(&mut self) {
        while matches!(self.subcomponents.last(), Some(None)) {
            self.subcomponents.pop();
        }
    }
}

impl FromPiped for Ucmp {
    fn parse_piped(d: &Delimiters, line: &str, span: Span, level: Level) -> Hl7Result<Option<Self>> {
        if span.is_empty() {
            return Ok(None);
        }
        let mut subcomponents = Vec::new();
        let mut sc = TokenScanner::new(line, span, level.child_separator(d), d.escape());
        while let Some(sp) = sc.next_span() {
            subcomponents.push(String::parse_piped(d, line, sp, level.child())?);
        }
        let mut cmp = Self { subcomponents };
        cmp.prune();
        Ok(Some(cmp))
    }
}

impl ToPiped for Ucmp {
    fn to_piped(&self, w: &mut PipeWriter<'_>, level: Level) {
        let mut cw = ComponentWriter::new(w, level);
        for slot in &self.subcomponents {
            cw.put(slot.as_ref());
        }
    }

    fn is_piped_empty(&self) -> bool {
        self.subcomponents
            .iter()
            .all(|slot| slot.as_ref().map_or(true, |s| s.is_empty()))
    }
}

/// An unrecognized field: an open-ended list of [`Ucmp`] components.
///
/// Same sparse 1-indexed contract as [`Ucmp`], one level up.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ufld {
    components: Vec<Option<Ucmp>>,
}

impl Ufld {
    /// An empty field.
    pub fn new() -> Self {
        Self::default()
    }

    /// A field holding a single plain-text component.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            components: vec![Some(Ucmp::from_text(text))],
        }
    }

    /// The component at 1-based `position`.
    pub fn get(&self, position: usize) -> Option<&Ucmp> {
        if position == 0 {
            return None;
        }
        self.components
            .get(position - 1)
            .and_then(|slot| slot.as_ref())
    }

    /// The first subcomponent of the component at 1-based `position`; the
    /// common case for plain values.
    pub fn get_text(&self, position: usize) -> Option<&str> {
        self.get(position).and_then(|cmp| cmp.get(1))
    }

    /// Set the component at 1-based `position`, growing as needed.
    pub fn set(&mut self, position: usize, value: Ucmp) {
        if position == 0 {
            return;
        }
        if self.components.len() < position {
            self.components.resize(position, None);
        }
        self.components[position - 1] = Some(value);
    }

    /// Set the component at 1-based `position` to a plain-text value.
    pub fn set_text(&mut self, position: usize, text: impl Into<String>) {
        self.set(position, Ucmp::from_text(text));
    }

    /// Number of component slots, including interior absents.
    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// Drop trailing absent slots.
    pub fn prune(&mut self) {
        while matches!(self.components.last(), Some(None)) {
            self.components.pop();
        }
    }
}

impl FromPiped for Ufld {
    fn parse_piped(d: &Delimiters, line: &str, span: Span, level: Level) -> Hl7Result<Option<Self>> {
        if span.is_empty() {
            return Ok(None);
        }
        let mut components = Vec::new();
        let mut sc = TokenScanner::new(line, span, level.child_separator(d), d.escape());
        while let Some(sp) = sc.next_span() {
            components.push(Ucmp::parse_piped(d, line, sp, level.child())?);
        }
        let mut fld = Self { components };
        fld.prune();
        Ok(Some(fld))
    }
}

impl ToPiped for Ufld {
    fn to_piped(&self, w: &mut PipeWriter<'_>, level: Level) {
        let mut cw = ComponentWriter::new(w, level);
        for slot in &self.components {
            cw.put(slot.as_ref());
        }
    }

    fn is_piped_empty(&self) -> bool {
        self.components
            .iter()
            .all(|slot| slot.as_ref().map_or(true, |c| c.is_piped_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{decode_field, encode_field};

    fn d() -> Delimiters {
        Delimiters::default()
    }

    // ==================== Ucmp tests ====================

    #[test]
    fn test_ucmp_sparse_get_set() {
        let mut c = Ucmp::new();
        c.set(3, "three");
        assert_eq!(c.len(), 3);
        assert_eq!(c.get(1), None);
        assert_eq!(c.get(3), Some("three"));
        assert_eq!(c.get(0), None);
    }

    #[test]
    fn test_ucmp_prune() {
        let mut c = Ucmp::new();
        c.set(1, "a");
        c.set(4, "d");
        c.unset(4);
        c.prune();
        assert_eq!(c.len(), 1);
    }

    #[test]
    fn test_ucmp_parse_subcomponents() {
        let line = "a&b&c";
        let c = Ucmp::parse_piped(&d(), line, crate::wire::Span::whole(line), Level::Component)
            .unwrap()
            .unwrap();
        assert_eq!(c.get(1), Some("a"));
        assert_eq!(c.get(2), Some("b"));
        assert_eq!(c.get(3), Some("c"));
    }

    // ==================== Ufld tests ====================

    #[test]
    fn test_ufld_parse_structure() {
        let fld: Ufld = decode_field(&d(), "id^text^sys&1.2&ISO").unwrap().unwrap();
        assert_eq!(fld.get_text(1), Some("id"));
        assert_eq!(fld.get_text(2), Some("text"));
        assert_eq!(fld.get(3).unwrap().get(2), Some("1.2"));
    }

    #[test]
    fn test_ufld_roundtrip_byte_identical() {
        let text = "id^text^sys&1.2&ISO";
        let fld: Ufld = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(encode_field(&d(), &fld), text);
    }

    #[test]
    fn test_ufld_interior_empty_component_preserved() {
        let text = "a^^c";
        let fld: Ufld = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(fld.len(), 3);
        assert!(fld.get(2).is_none());
        assert_eq!(encode_field(&d(), &fld), text);
    }

    #[test]
    fn test_ufld_escaped_content_roundtrip() {
        let text = r"rate\F\hour^5\S\2";
        let fld: Ufld = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(fld.get_text(1), Some("rate|hour"));
        assert_eq!(fld.get_text(2), Some("5^2"));
        assert_eq!(encode_field(&d(), &fld), text);
    }

    #[test]
    fn test_ufld_mutate_then_serialize() {
        let mut fld: Ufld = decode_field(&d(), "a^b").unwrap().unwrap();
        fld.set_text(4, "d");
        assert_eq!(encode_field(&d(), &fld), "a^b^^d");
    }

    #[test]
    fn test_ufld_empty_span_is_none() {
        let fld: Option<Ufld> = decode_field(&d(), "").unwrap();
        assert!(fld.is_none());
    }
}
