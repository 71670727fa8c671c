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

//! The repetition wrapper.

use crate::delim::Delimiters;
use crate::error::Hl7Result;
use crate::types::{FromPiped, Level, ToPiped};
use crate::wire::{ComponentWriter, PipeWriter, Span, TokenScanner};

/// An ordered list of repetitions of one field value.
///
/// Wire order is semantically significant: the first repetition is the
/// primary one. An absent repetition mid-list is preserved as an empty
/// token because its position still matters; trailing absents are trimmed,
/// and a field with no repetitions at all is skipped entirely by the
/// surrounding field writer.
///
/// # Examples
///
/// ```
/// use hl7v2_core::{types::{decode_field, Cx, Repeat}, Delimiters};
///
/// let d = Delimiters::default();
/// let ids: Repeat<Cx> = decode_field(&d, "111^^^A^MR~222^^^B^MR").unwrap().unwrap();
/// assert_eq!(ids.len(), 2);
/// assert_eq!(ids.primary().unwrap().id.as_ref().unwrap().value(), "111");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Repeat<T> {
    items: Vec<Option<T>>,
}

impl<T> Repeat<T> {
    /// An empty list (no repetitions; the field is absent as a whole).
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// A single-repetition list.
    pub fn single(value: T) -> Self {
        Self {
            items: vec![Some(value)],
        }
    }

    /// The primary (first) repetition, if present.
    pub fn primary(&self) -> Option<&T> {
        self.items.first().and_then(|slot| slot.as_ref())
    }

    /// The repetition at `index` (0-based), if present.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index).and_then(|slot| slot.as_ref())
    }

    /// Append a repetition.
    pub fn push(&mut self, value: T) {
        self.items.push(Some(value));
    }

    /// Append an absent repetition slot (an empty token on the wire).
    pub fn push_absent(&mut self) {
        self.items.push(None);
    }

    /// Number of repetition slots, including absent ones.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether there are no repetition slots at all.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterate over all slots in wire order.
    pub fn iter(&self) -> impl Iterator<Item = Option<&T>> {
        self.items.iter().map(|slot| slot.as_ref())
    }

    /// Iterate over the present repetitions in wire order.
    pub fn present(&self) -> impl Iterator<Item = &T> {
        self.items.iter().flatten()
    }

    /// Drop trailing absent slots.
    pub fn prune(&mut self) {
        while matches!(self.items.last(), Some(None)) {
            self.items.pop();
        }
    }
}

impl<T> Default for Repeat<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for Repeat<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().map(Some).collect(),
        }
    }
}

impl<T: FromPiped> FromPiped for Repeat<T> {
    /// Splits on the repetition delimiter; each repetition is decoded at
    /// the same nesting level as the field itself. A span holding only
    /// empty tokens decodes to `None`, not an empty list.
    fn parse_piped(d: &Delimiters, line: &str, span: Span, level: Level) -> Hl7Result<Option<Self>> {
        if span.is_empty() {
            return Ok(None);
        }
        let mut items = Vec::new();
        let mut sc = TokenScanner::new(line, span, Some(d.repetition()), d.escape());
        while let Some(sp) = sc.next_span() {
            items.push(T::parse_piped(d, line, sp, level)?);
        }
        let mut list = Self { items };
        list.prune();
        if list.is_empty() {
            return Ok(None);
        }
        Ok(Some(list))
    }
}

impl<T: ToPiped> ToPiped for Repeat<T> {
    fn to_piped(&self, w: &mut PipeWriter<'_>, level: Level) {
        let sep = w.delims().repetition();
        let mut cw = ComponentWriter::with_separator(w, sep, level);
        for slot in &self.items {
            cw.put(slot.as_ref());
        }
    }

    fn is_piped_empty(&self) -> bool {
        self.items
            .iter()
            .all(|slot| slot.as_ref().map_or(true, |v| v.is_piped_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{decode_field, encode_field, St, Xpn};

    fn d() -> Delimiters {
        Delimiters::default()
    }

    #[test]
    fn test_repeat_parse_order_is_wire_order() {
        let reps: Repeat<St> = decode_field(&d(), "one~two~three").unwrap().unwrap();
        let values: Vec<_> = reps.present().map(|s| s.value().to_string()).collect();
        assert_eq!(values, ["one", "two", "three"]);
    }

    #[test]
    fn test_repeat_primary_is_first() {
        let reps: Repeat<St> = decode_field(&d(), "first~second").unwrap().unwrap();
        assert_eq!(reps.primary().unwrap().value(), "first");
    }

    #[test]
    fn test_repeat_interior_absent_preserved() {
        let reps: Repeat<St> = decode_field(&d(), "a~~c").unwrap().unwrap();
        assert_eq!(reps.len(), 3);
        assert!(reps.get(1).is_none());
        assert_eq!(encode_field(&d(), &reps), "a~~c");
    }

    #[test]
    fn test_repeat_trailing_absent_trimmed() {
        let reps: Repeat<St> = decode_field(&d(), "a~b~~").unwrap().unwrap();
        assert_eq!(reps.len(), 2);
        assert_eq!(encode_field(&d(), &reps), "a~b");
    }

    #[test]
    fn test_repeat_all_empty_is_none() {
        let reps: Option<Repeat<St>> = decode_field(&d(), "~~").unwrap();
        assert!(reps.is_none());
    }

    #[test]
    fn test_repeat_empty_span_is_none() {
        let reps: Option<Repeat<St>> = decode_field(&d(), "").unwrap();
        assert!(reps.is_none());
    }

    #[test]
    fn test_repeat_of_composites() {
        let reps: Repeat<Xpn> = decode_field(&d(), "Doe^John~Doe^Jane").unwrap().unwrap();
        assert_eq!(reps.len(), 2);
        assert_eq!(
            reps.get(1).unwrap().given.as_ref().unwrap().value(),
            "Jane"
        );
        assert_eq!(encode_field(&d(), &reps), "Doe^John~Doe^Jane");
    }

    #[test]
    fn test_repeat_programmatic_build() {
        let mut reps = Repeat::single(St::from("a"));
        reps.push_absent();
        reps.push(St::from("c"));
        assert_eq!(encode_field(&d(), &reps), "a~~c");
    }

    #[test]
    fn test_repeat_from_iterator() {
        let reps: Repeat<St> = [St::from("x"), St::from("y")].into_iter().collect();
        assert_eq!(encode_field(&d(), &reps), "x~y");
    }
}
