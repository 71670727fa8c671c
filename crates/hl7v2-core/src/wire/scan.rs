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

//! The token scanner: locating unescaped delimiters.
//!
//! This is the primitive every delimiter level builds on. It is called once
//! per field/component/subcomponent boundary, so it is a single forward
//! byte scan with no backtracking and no allocation; a pathological field
//! with no delimiters degrades to one linear pass.

use crate::wire::span::Span;

/// Find the next unescaped occurrence of `sep` in `line[start..stop)`.
///
/// A separator that appears inside an escape-sequence span (beginning with
/// the escape character and ending at the next escape character) does not
/// count. An unterminated escape sequence hides the remainder of the span.
///
/// Returns `None` when no unescaped separator exists before `stop`, meaning
/// the token boundary is `stop` itself. `start >= stop` always yields
/// `None`.
///
/// # Examples
///
/// ```
/// use hl7v2_core::wire::next_separator;
///
/// let line = r"A\F\B|C";
/// // The `|` embedded as `\F\` is not a boundary; the real one is at 5.
/// assert_eq!(next_separator(line, 0, line.len(), b'|', b'\\'), Some(5));
/// assert_eq!(next_separator(line, 6, line.len(), b'|', b'\\'), None);
/// ```
pub fn next_separator(line: &str, start: usize, stop: usize, sep: u8, esc: u8) -> Option<usize> {
    let stop = stop.min(line.len());
    if start >= stop {
        return None;
    }
    let bytes = line.as_bytes();
    let mut i = start;
    while i < stop {
        match memchr::memchr2(sep, esc, &bytes[i..stop]) {
            None => return None,
            Some(off) => {
                let hit = i + off;
                if bytes[hit] == sep {
                    return Some(hit);
                }
                // Escape sequence: skip to the closing escape character.
                match memchr::memchr(esc, &bytes[hit + 1..stop]) {
                    None => return None,
                    Some(close) => i = hit + 1 + close + 1,
                }
            }
        }
    }
    None
}

/// Iterator over the token spans of one delimiter level.
///
/// Built with a separator, it yields one span per token, including empty
/// tokens between adjacent separators and after a trailing separator.
/// Built without one (the subcomponent floor), it yields the whole span
/// once. An exhausted input span (`start > stop`) yields nothing, which is
/// how optional trailing components are skipped cheaply.
///
/// # Examples
///
/// ```
/// use hl7v2_core::wire::{Span, TokenScanner};
///
/// let line = "Doe^John^^Jr";
/// let mut sc = TokenScanner::new(line, Span::whole(line), Some('^'), '\\');
/// assert_eq!(sc.next_span().unwrap().slice(line), "Doe");
/// assert_eq!(sc.next_span().unwrap().slice(line), "John");
/// assert_eq!(sc.next_span().unwrap().slice(line), "");
/// assert_eq!(sc.next_span().unwrap().slice(line), "Jr");
/// assert!(sc.next_span().is_none());
/// ```
#[derive(Debug, Clone)]
pub struct TokenScanner<'a> {
    line: &'a str,
    pos: usize,
    stop: usize,
    sep: Option<u8>,
    esc: u8,
    done: bool,
}

impl<'a> TokenScanner<'a> {
    /// Create a scanner over `span`, splitting on `sep` (`None` yields the
    /// whole span as a single token).
    pub fn new(line: &'a str, span: Span, sep: Option<char>, esc: char) -> Self {
        let stop = span.stop.min(line.len());
        Self {
            line,
            pos: span.start,
            stop,
            sep: sep.map(|c| c as u8),
            esc: esc as u8,
            done: span.start > stop,
        }
    }

    /// The next token span, or `None` once the level is exhausted.
    pub fn next_span(&mut self) -> Option<Span> {
        if self.done {
            return None;
        }
        let sep = match self.sep {
            Some(s) => s,
            None => {
                self.done = true;
                return Some(Span::new(self.pos, self.stop));
            }
        };
        match next_separator(self.line, self.pos, self.stop, sep, self.esc) {
            Some(boundary) => {
                let span = Span::new(self.pos, boundary);
                self.pos = boundary + 1;
                Some(span)
            }
            None => {
                self.done = true;
                Some(Span::new(self.pos, self.stop))
            }
        }
    }

    /// The remainder of the level as one span, without consuming tokens.
    pub fn rest(&self) -> Span {
        Span::new(self.pos, self.stop)
    }
}

impl Iterator for TokenScanner<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        self.next_span()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(line: &str, sep: Option<char>) -> Vec<String> {
        TokenScanner::new(line, Span::whole(line), sep, '\\')
            .map(|s| s.slice(line).to_string())
            .collect()
    }

    // ==================== next_separator tests ====================

    #[test]
    fn test_finds_plain_separator() {
        assert_eq!(next_separator("A|B", 0, 3, b'|', b'\\'), Some(1));
    }

    #[test]
    fn test_none_when_absent() {
        assert_eq!(next_separator("ABC", 0, 3, b'|', b'\\'), None);
    }

    #[test]
    fn test_respects_stop() {
        assert_eq!(next_separator("AB|C", 0, 2, b'|', b'\\'), None);
        assert_eq!(next_separator("AB|C", 0, 3, b'|', b'\\'), None);
        assert_eq!(next_separator("AB|C", 0, 4, b'|', b'\\'), Some(2));
    }

    #[test]
    fn test_exhausted_span() {
        assert_eq!(next_separator("A|B", 3, 2, b'|', b'\\'), None);
        assert_eq!(next_separator("A|B", 2, 2, b'|', b'\\'), None);
    }

    #[test]
    fn test_separator_inside_escape_sequence_hidden() {
        let line = r"A\|\B|C";
        assert_eq!(next_separator(line, 0, line.len(), b'|', b'\\'), Some(5));
    }

    #[test]
    fn test_unterminated_escape_hides_remainder() {
        let line = r"A\X|B";
        assert_eq!(next_separator(line, 0, line.len(), b'|', b'\\'), None);
    }

    #[test]
    fn test_scan_from_offset() {
        let line = "A^B^C";
        assert_eq!(next_separator(line, 2, line.len(), b'^', b'\\'), Some(3));
    }

    // ==================== TokenScanner tests ====================

    #[test]
    fn test_scanner_simple_split() {
        assert_eq!(spans("A^B^C", Some('^')), vec!["A", "B", "C"]);
    }

    #[test]
    fn test_scanner_empty_tokens() {
        assert_eq!(spans("A^^C", Some('^')), vec!["A", "", "C"]);
        assert_eq!(spans("^A", Some('^')), vec!["", "A"]);
        assert_eq!(spans("A^", Some('^')), vec!["A", ""]);
    }

    #[test]
    fn test_scanner_single_token() {
        assert_eq!(spans("ABC", Some('^')), vec!["ABC"]);
    }

    #[test]
    fn test_scanner_empty_line_yields_empty_token() {
        assert_eq!(spans("", Some('^')), vec![""]);
    }

    #[test]
    fn test_scanner_exhausted_yields_nothing() {
        let mut sc = TokenScanner::new("ABC", Span::new(5, 3), Some('^'), '\\');
        assert!(sc.next_span().is_none());
    }

    #[test]
    fn test_scanner_no_separator_floor() {
        assert_eq!(spans("A&B", None), vec!["A&B"]);
    }

    #[test]
    fn test_scanner_escaped_separator_kept_in_token() {
        let line = r"A\S\B^C";
        assert_eq!(spans(line, Some('^')), vec![r"A\S\B", "C"]);
    }

    #[test]
    fn test_scanner_rest() {
        let line = "A^B^C";
        let mut sc = TokenScanner::new(line, Span::whole(line), Some('^'), '\\');
        sc.next_span();
        assert_eq!(sc.rest().slice(line), "B^C");
    }
}
