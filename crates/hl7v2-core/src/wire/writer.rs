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

//! Escaping-aware writers for pipe-and-hat output.
//!
//! Serialization walks positions in order and emits only as many delimiters
//! as are needed to reach the last populated position (trailing-field
//! elision). [`ComponentWriter`] implements that rule for one composite
//! value; [`SegmentWriter`] implements it at the field level for a whole
//! segment line.

use crate::delim::Delimiters;
use crate::types::{Level, ToPiped};
use crate::wire::escape::escape_into;

/// Initial buffer capacity for rendered output.
///
/// Most segment lines fit comfortably; larger ones still benefit from
/// fewer early reallocations.
const INITIAL_OUTPUT_BUFFER_CAPACITY: usize = 256;

/// An output buffer bound to a delimiter configuration.
///
/// All logical text flows through [`push_value`](PipeWriter::push_value),
/// which escapes it; [`push_raw`](PipeWriter::push_raw) exists for the one
/// place escaping must not happen (MSH-2, which defines the escaping rules
/// themselves).
#[derive(Debug)]
pub struct PipeWriter<'a> {
    delims: &'a Delimiters,
    out: String,
}

impl<'a> PipeWriter<'a> {
    /// Create a writer for one segment line or field rendering.
    pub fn new(delims: &'a Delimiters) -> Self {
        Self {
            delims,
            out: String::with_capacity(INITIAL_OUTPUT_BUFFER_CAPACITY),
        }
    }

    /// The delimiter configuration this writer emits.
    #[inline]
    pub fn delims(&self) -> &Delimiters {
        self.delims
    }

    /// Append a logical string, escaping delimiter collisions.
    pub fn push_value(&mut self, logical: &str) {
        escape_into(&mut self.out, logical, self.delims);
    }

    /// Append raw wire text without escaping.
    pub fn push_raw(&mut self, raw: &str) {
        self.out.push_str(raw);
    }

    /// Append a single separator character.
    #[inline]
    pub fn push_separator(&mut self, sep: char) {
        self.out.push(sep);
    }

    /// The text rendered so far.
    pub fn as_str(&self) -> &str {
        &self.out
    }

    /// Consume the writer, returning the rendered text.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Positional child writer for one composite value.
///
/// Tracks `last`, the high-water mark of populated positions, and pads with
/// `curr - last` separators before each value it writes, so trailing absent
/// positions are never emitted. The separator is chosen by nesting level:
/// the component delimiter one level below a field, the subcomponent
/// delimiter one level below that. Below the subcomponent floor no
/// separator exists, so only position 1 is representable.
pub struct ComponentWriter<'w, 'a> {
    w: &'w mut PipeWriter<'a>,
    sep: Option<char>,
    child_level: Level,
    curr: usize,
    last: usize,
}

impl<'w, 'a> ComponentWriter<'w, 'a> {
    /// Child writer for a composite sitting at `level`.
    pub fn new(w: &'w mut PipeWriter<'a>, level: Level) -> Self {
        let sep = level.child_separator(w.delims());
        Self {
            w,
            sep,
            child_level: level.child(),
            curr: 0,
            last: 1,
        }
    }

    /// Child writer with an explicit separator (the repetition wrapper
    /// splits on the repetition delimiter but keeps its children at the
    /// same nesting level).
    pub fn with_separator(w: &'w mut PipeWriter<'a>, sep: char, child_level: Level) -> Self {
        Self {
            w,
            sep: Some(sep),
            child_level,
            curr: 0,
            last: 1,
        }
    }

    /// Write the next position. Absent or empty values advance the
    /// position counter without emitting anything.
    pub fn put<T: ToPiped>(&mut self, value: Option<&T>) {
        self.curr += 1;
        let Some(value) = value else { return };
        if value.is_piped_empty() {
            return;
        }
        match self.sep {
            Some(sep) => {
                for _ in self.last..self.curr {
                    self.w.push_separator(sep);
                }
            }
            None => {
                // Subcomponent floor: deeper structure is not representable.
                if self.curr > 1 {
                    return;
                }
            }
        }
        value.to_piped(self.w, self.child_level);
        self.last = self.curr;
    }
}

/// Positional field writer for a whole segment line.
///
/// Fields are 1-indexed and written in order; trailing absent fields are
/// elided, interior absent fields appear as adjacent field delimiters.
///
/// # Examples
///
/// ```
/// use hl7v2_core::{types::St, wire::SegmentWriter, Delimiters};
///
/// let d = Delimiters::default();
/// let mut sw = SegmentWriter::new(&d, "QAK");
/// sw.put(Some(&St::from("tag")));
/// sw.put::<St>(None);
/// sw.put(Some(&St::from("OK")));
/// sw.put::<St>(None);
/// assert_eq!(sw.finish(), "QAK|tag||OK");
/// ```
pub struct SegmentWriter<'a> {
    w: PipeWriter<'a>,
    curr: usize,
    last: usize,
}

impl<'a> SegmentWriter<'a> {
    /// Start a segment line with its three-character ID.
    pub fn new(delims: &'a Delimiters, id: &str) -> Self {
        let mut w = PipeWriter::new(delims);
        w.push_raw(id);
        Self { w, curr: 0, last: 0 }
    }

    /// Write the next field.
    pub fn put<T: ToPiped>(&mut self, value: Option<&T>) {
        self.curr += 1;
        let Some(value) = value else { return };
        if value.is_piped_empty() {
            return;
        }
        self.pad();
        value.to_piped(&mut self.w, Level::Field);
        self.last = self.curr;
    }

    /// Write the next field from a slice of repetitions, separated by the
    /// repetition delimiter. An empty slice skips the field.
    pub fn put_list<T: ToPiped>(&mut self, values: &[T]) {
        self.curr += 1;
        if values.iter().all(|v| v.is_piped_empty()) {
            return;
        }
        self.pad();
        let rep = self.w.delims().repetition();
        for (i, v) in values.iter().enumerate() {
            if i > 0 {
                self.w.push_separator(rep);
            }
            v.to_piped(&mut self.w, Level::Field);
        }
        self.last = self.curr;
    }

    /// Write the next field verbatim, bypassing the escaping engine.
    /// This is how MSH-2 is emitted.
    pub fn put_raw(&mut self, raw: Option<&str>) {
        self.curr += 1;
        let Some(raw) = raw else { return };
        if raw.is_empty() {
            return;
        }
        self.pad();
        self.w.push_raw(raw);
        self.last = self.curr;
    }

    fn pad(&mut self) {
        let field = self.w.delims().field();
        for _ in self.last..self.curr {
            self.w.push_separator(field);
        }
    }

    /// Finish the line. No segment terminator is appended; line
    /// separation is owned by the message layer.
    pub fn finish(self) -> String {
        self.w.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::St;

    fn d() -> Delimiters {
        Delimiters::default()
    }

    // ==================== PipeWriter tests ====================

    #[test]
    fn test_push_value_escapes() {
        let delims = d();
        let mut w = PipeWriter::new(&delims);
        w.push_value("a|b");
        assert_eq!(w.finish(), r"a\F\b");
    }

    #[test]
    fn test_push_raw_does_not_escape() {
        let delims = d();
        let mut w = PipeWriter::new(&delims);
        w.push_raw(r"^~\&");
        assert_eq!(w.finish(), r"^~\&");
    }

    // ==================== SegmentWriter tests ====================

    #[test]
    fn test_segment_with_no_fields() {
        let delims = d();
        let sw = SegmentWriter::new(&delims, "PID");
        assert_eq!(sw.finish(), "PID");
    }

    #[test]
    fn test_trailing_fields_elided() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "PID");
        sw.put(Some(&St::from("1")));
        sw.put::<St>(None);
        sw.put::<St>(None);
        assert_eq!(sw.finish(), "PID|1");
    }

    #[test]
    fn test_interior_gap_preserved() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "PID");
        sw.put::<St>(None);
        sw.put::<St>(None);
        sw.put(Some(&St::from("X")));
        assert_eq!(sw.finish(), "PID|||X");
    }

    #[test]
    fn test_empty_value_counts_as_absent() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "PID");
        sw.put(Some(&St::from("")));
        assert_eq!(sw.finish(), "PID");
    }

    #[test]
    fn test_put_list_repetitions() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "PID");
        sw.put_list(&[St::from("A"), St::from("B"), St::from("C")]);
        assert_eq!(sw.finish(), "PID|A~B~C");
    }

    #[test]
    fn test_put_list_empty_skips_field() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "PID");
        sw.put_list::<St>(&[]);
        sw.put(Some(&St::from("X")));
        assert_eq!(sw.finish(), "PID||X");
    }

    #[test]
    fn test_put_raw_msh_style() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "MSH");
        sw.put_raw(Some(r"^~\&"));
        sw.put(Some(&St::from("SENDER")));
        assert_eq!(sw.finish(), r"MSH|^~\&|SENDER");
    }

    #[test]
    fn test_field_text_is_escaped() {
        let delims = d();
        let mut sw = SegmentWriter::new(&delims, "NTE");
        sw.put(Some(&St::from("5'2\" | tall")));
        assert_eq!(sw.finish(), "NTE|5'2\" \\F\\ tall");
    }
}
