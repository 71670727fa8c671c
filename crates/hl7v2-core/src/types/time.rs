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

//! Date and time types.
//!
//! The wire format is `YYYY[MM[DD[HH[MM[SS[.S…]]]]]][±ZZZZ]`. Partial
//! precision is valid and meaningful: "just a year" is a distinct, legal
//! value from "year and month", so these types store the literal digit
//! string and never normalize into a calendar representation. Accessors
//! slice lazily under the same strict/lax policy as the numeric types.

use std::fmt;
use std::ops::Range;

use crate::delim::Delimiters;
use crate::error::{Hl7Error, Hl7Result};
use crate::types::macros::composite;
use crate::types::{FromPiped, Level, St, ToPiped};
use crate::wire::{PipeWriter, Span};

/// Slice a fixed digit range out of a literal.
///
/// A literal that ends before the range starts is partial precision
/// (`Ok(None)`); one that ends inside the range, or carries non-digits in
/// it, is malformed (strict error / lax `None`).
fn digit_slice(value: &str, literal: &str, range: Range<usize>, lax: bool) -> Hl7Result<Option<u32>> {
    if value.len() <= range.start {
        return Ok(None);
    }
    let malformed = || {
        Hl7Error::conversion(format!(
            "not a valid date/time literal: {:?}",
            literal
        ))
    };
    if value.len() < range.end {
        if lax {
            return Ok(None);
        }
        return Err(malformed());
    }
    let slice = &value[range];
    if !slice.bytes().all(|b| b.is_ascii_digit()) {
        if lax {
            return Ok(None);
        }
        return Err(malformed());
    }
    match slice.parse::<u32>() {
        Ok(v) => Ok(Some(v)),
        Err(_) if lax => Ok(None),
        Err(_) => Err(malformed()),
    }
}

/// The digit body of a timestamp literal, with the fraction and GMT offset
/// suffixes split off.
fn split_literal(literal: &str) -> (&str, Option<&str>, Option<&str>) {
    let (body, offset) = match literal.find(['+', '-']) {
        Some(i) => (&literal[..i], Some(&literal[i..])),
        None => (literal, None),
    };
    match body.find('.') {
        Some(i) => (&body[..i], Some(&body[i + 1..]), offset),
        None => (body, None, offset),
    }
}

macro_rules! literal_time_type {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            value: String,
            lax: bool,
        }

        impl $name {
            /// Wrap a literal under the strict conversion policy.
            pub fn new(value: impl Into<String>) -> Self {
                Self {
                    value: value.into(),
                    lax: false,
                }
            }

            /// The literal, exactly as it appeared on the wire.
            #[inline]
            pub fn value(&self) -> &str {
                &self.value
            }

            /// The `±ZZZZ` GMT offset suffix, if present.
            pub fn gmt_offset(&self) -> Option<&str> {
                split_literal(&self.value).2
            }
        }

        impl PartialEq for $name {
            /// Literal comparison: partial precision is significant, so
            /// `"2024"` and `"202401"` are different values.
            fn eq(&self, other: &Self) -> bool {
                self.value == other.value
            }
        }

        impl Eq for $name {}

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.value)
            }
        }

        impl FromPiped for $name {
            fn parse_piped(
                d: &Delimiters,
                line: &str,
                span: Span,
                _level: Level,
            ) -> Hl7Result<Option<Self>> {
                let raw = span.slice(line);
                if raw.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Self {
                    value: crate::wire::unescape(raw, d).into_owned(),
                    lax: d.is_lax(),
                }))
            }
        }

        impl ToPiped for $name {
            fn to_piped(&self, w: &mut PipeWriter<'_>, _level: Level) {
                w.push_value(&self.value);
            }

            fn is_piped_empty(&self) -> bool {
                self.value.is_empty()
            }
        }
    };
}

literal_time_type! {
    /// Date (DT): `YYYY[MM[DD]]`.
    pub struct Dt;
}

literal_time_type! {
    /// Time (TM): `HH[MM[SS[.S…]]][±ZZZZ]`.
    pub struct Tm;
}

literal_time_type! {
    /// Date/time (DTM): `YYYY[MM[DD[HH[MM[SS[.S…]]]]]][±ZZZZ]`.
    pub struct Dtm;
}

impl Dt {
    pub fn year(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 0..4, self.lax)
    }

    pub fn month(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 4..6, self.lax)
    }

    pub fn day(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 6..8, self.lax)
    }
}

impl Tm {
    pub fn hour(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 0..2, self.lax)
    }

    pub fn minute(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 2..4, self.lax)
    }

    pub fn second(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 4..6, self.lax)
    }

    /// Fractional-second digits, without the leading dot.
    pub fn fraction(&self) -> Option<&str> {
        split_literal(&self.value).1
    }
}

impl Dtm {
    pub fn year(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 0..4, self.lax)
    }

    pub fn month(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 4..6, self.lax)
    }

    pub fn day(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 6..8, self.lax)
    }

    pub fn hour(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 8..10, self.lax)
    }

    pub fn minute(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 10..12, self.lax)
    }

    pub fn second(&self) -> Hl7Result<Option<u32>> {
        digit_slice(split_literal(&self.value).0, &self.value, 12..14, self.lax)
    }

    /// Fractional-second digits, without the leading dot.
    pub fn fraction(&self) -> Option<&str> {
        split_literal(&self.value).1
    }
}

composite! {
    /// Time stamp (TS): a DTM plus an optional degree-of-precision code.
    #[derive(PartialEq)]
    pub struct Ts {
        1: time: Dtm,
        2: degree_of_precision: St,
    }
}

composite! {
    /// Date/time range (DR).
    #[derive(PartialEq)]
    pub struct Dr {
        1: start: Ts,
        2: end: Ts,
    }
}

impl Ts {
    /// Wrap a bare timestamp literal.
    pub fn from_literal(literal: impl Into<String>) -> Self {
        Self {
            time: Some(Dtm::new(literal)),
            degree_of_precision: None,
        }
    }
}
