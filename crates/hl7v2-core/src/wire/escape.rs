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

//! The escaping engine: raw wire tokens ↔ logical strings.
//!
//! Escape sequences have the shape `<esc>X…<esc>`. The five delimiter codes
//! `\F\` (field), `\S\` (component), `\T\` (subcomponent), `\R\`
//! (repetition) and `\E\` (escape character) substitute the corresponding
//! delimiter; every other well-formed sequence (`\.br\`, `\H\`, `\N\`,
//! `\Xdd…\`, `\Zxx\`, …) is a formatting directive this layer passes
//! through verbatim.
//!
//! Round-trip laws, for any delimiter set `d`:
//!
//! - `unescape(escape(s)) == s` for every logical string `s`;
//! - `escape(unescape(t)) == t` for every well-formed raw token `t`.
//!
//! Unescaping happens exactly once, at the primitive leaf. Composite-level
//! substrings are never pre-unescaped: an escaped delimiter must still look
//! escaped to the token scanner at the next recursion depth.

use std::borrow::Cow;

use crate::delim::Delimiters;

/// Convert a raw wire token to its logical string.
///
/// Borrows the input unchanged when it contains no escape character.
/// Malformed trailing sequences (no closing escape character) are copied
/// verbatim rather than rejected; this layer has no business failing a
/// message over a formatting directive.
///
/// # Examples
///
/// ```
/// use hl7v2_core::{wire::unescape, Delimiters};
///
/// let d = Delimiters::default();
/// assert_eq!(unescape(r"one\F\two", &d), "one|two");
/// assert_eq!(unescape(r"a\E\b", &d), r"a\b");
/// // Formatting directives pass through untouched.
/// assert_eq!(unescape(r"line\.br\next", &d), r"line\.br\next");
/// ```
pub fn unescape<'a>(raw: &'a str, d: &Delimiters) -> Cow<'a, str> {
    let esc = d.escape() as u8;
    if memchr::memchr(esc, raw.as_bytes()).is_none() {
        return Cow::Borrowed(raw);
    }

    let bytes = raw.as_bytes();
    let mut out = String::with_capacity(raw.len());
    let mut i = 0;
    while i < bytes.len() {
        match memchr::memchr(esc, &bytes[i..]) {
            None => {
                out.push_str(&raw[i..]);
                break;
            }
            Some(off) => {
                let open = i + off;
                out.push_str(&raw[i..open]);
                match memchr::memchr(esc, &bytes[open + 1..]) {
                    None => {
                        // Unterminated: keep the remainder as-is.
                        out.push_str(&raw[open..]);
                        break;
                    }
                    Some(close_off) => {
                        let close = open + 1 + close_off;
                        let inner = &raw[open + 1..close];
                        match delimiter_for_code(inner, d) {
                            Some(c) => out.push(c),
                            None => out.push_str(&raw[open..=close]),
                        }
                        i = close + 1;
                    }
                }
            }
        }
    }
    Cow::Owned(out)
}

/// Convert a logical string to a raw wire token, appending to `out`.
///
/// Delimiter characters become their substitution codes. A well-formed
/// formatting directive already present in the logical string (one the
/// unescaper would have passed through) is copied verbatim; any other
/// escape character becomes `\E\`.
pub fn escape_into(out: &mut String, logical: &str, d: &Delimiters) {
    let esc = d.escape();
    // All five are ASCII by the Delimiters invariant, so byte positions are
    // always character boundaries.
    let special = [
        d.field() as u8,
        d.component() as u8,
        d.subcomponent() as u8,
        d.repetition() as u8,
        esc as u8,
    ];
    let bytes = logical.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        let run_end = (i..bytes.len())
            .find(|&j| special.contains(&bytes[j]))
            .unwrap_or(bytes.len());
        if run_end > i {
            out.push_str(&logical[i..run_end]);
            i = run_end;
            if i >= bytes.len() {
                break;
            }
        }
        let c = bytes[i] as char;
        if c == d.field() {
            push_code(out, esc, 'F');
            i += 1;
        } else if c == d.component() {
            push_code(out, esc, 'S');
            i += 1;
        } else if c == d.subcomponent() {
            push_code(out, esc, 'T');
            i += 1;
        } else if c == d.repetition() {
            push_code(out, esc, 'R');
            i += 1;
        } else {
            match passthrough_end(logical, i, d) {
                Some(close) => {
                    out.push_str(&logical[i..=close]);
                    i = close + 1;
                }
                None => {
                    push_code(out, esc, 'E');
                    i += 1;
                }
            }
        }
    }
}

/// Convert a logical string to a raw wire token.
///
/// # Examples
///
/// ```
/// use hl7v2_core::{wire::escape, Delimiters};
///
/// let d = Delimiters::default();
/// assert_eq!(escape("one|two", &d), r"one\F\two");
/// assert_eq!(escape(r"a\b", &d), r"a\E\b");
/// assert_eq!(escape(r"line\.br\next", &d), r"line\.br\next");
/// ```
pub fn escape(logical: &str, d: &Delimiters) -> String {
    let mut out = String::with_capacity(logical.len() + 8);
    escape_into(&mut out, logical, d);
    out
}

/// The delimiter a single-letter substitution code stands for.
fn delimiter_for_code(inner: &str, d: &Delimiters) -> Option<char> {
    match inner {
        "F" => Some(d.field()),
        "S" => Some(d.component()),
        "T" => Some(d.subcomponent()),
        "R" => Some(d.repetition()),
        "E" => Some(d.escape()),
        _ => None,
    }
}

/// If `logical[open..]` starts a sequence the unescaper would pass through
/// verbatim, return the index of its closing escape character.
///
/// The inner text must not be a delimiter substitution code (those do not
/// survive unescaping unchanged) and must not contain any delimiter
/// character (the emitted token must stay scannable).
fn passthrough_end(logical: &str, open: usize, d: &Delimiters) -> Option<usize> {
    let esc = d.escape() as u8;
    let bytes = logical.as_bytes();
    let close_off = memchr::memchr(esc, &bytes[open + 1..])?;
    let close = open + 1 + close_off;
    let inner = &logical[open + 1..close];
    if delimiter_for_code(inner, d).is_some() {
        return None;
    }
    let forbidden = [d.field(), d.component(), d.subcomponent(), d.repetition()];
    if inner.chars().any(|c| forbidden.contains(&c)) {
        return None;
    }
    Some(close)
}

fn push_code(out: &mut String, esc: char, code: char) {
    out.push(esc);
    out.push(code);
    out.push(esc);
}
