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

//! Single-token primitive types.
//!
//! Primitives parse one token each and store the unescaped literal as-is;
//! numeric kinds convert lazily on first access. Under the strict policy a
//! malformed literal surfaces a conversion error at the accessor, never at
//! parse time; under the lax policy the accessor yields "no value" while
//! the literal stays intact for round-trip. Production streams routinely
//! contain malformed numeric fields, so the posture is configurable rather
//! than hard-failing.

use std::fmt;
use std::sync::OnceLock;

use crate::delim::Delimiters;
use crate::error::{Hl7Error, Hl7Result};
use crate::types::macros::string_primitive;
use crate::types::{FromPiped, Level, ToPiped};
use crate::wire::{PipeWriter, Span};

string_primitive! {
    /// String data (ST).
    pub struct St;
}

string_primitive! {
    /// Text data (TX). Same wire shape as ST; kept distinct because the
    /// schema positions that carry it are semantically free text.
    pub struct Tx;
}

string_primitive! {
    /// Formatted text (FT). May contain formatting directives such as
    /// `\.br\`, which the escaping engine passes through verbatim.
    pub struct Ft;
}

string_primitive! {
    /// Coded value from an HL7-defined table (ID).
    pub struct Id;
}

string_primitive! {
    /// Coded value from a user-defined table (IS).
    pub struct Is;
}

impl Id {
    /// Case-insensitive comparison against a table code. Table values are
    /// canonically upper-case but arrive in either case.
    pub fn matches_code(&self, code: &str) -> bool {
        self.value().eq_ignore_ascii_case(code)
    }
}

/// Numeric data (NM).
///
/// The literal text is preserved exactly; the numeric value is computed
/// lazily and memoized. Memoization is idempotent (same input, same value),
/// so a `OnceLock` keeps concurrent reads safe without further locking.
///
/// # Examples
///
/// ```
/// use hl7v2_core::types::Nm;
///
/// let n = Nm::new("1.50");
/// assert_eq!(n.value(), "1.50");
/// assert_eq!(n.to_f64().unwrap(), Some(1.5));
///
/// // Equality is by parsed value, not literal text.
/// assert_eq!(Nm::new("1.0"), Nm::new("1"));
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Nm {
    value: String,
    lax: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    cached: OnceLock<Option<f64>>,
}

impl Nm {
    /// Wrap a literal under the strict conversion policy.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lax: false,
            cached: OnceLock::new(),
        }
    }

    /// Build from an already-parsed number.
    pub fn from_f64(value: f64) -> Self {
        Self::new(value.to_string())
    }

    /// The literal display text, exactly as it appeared on the wire.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Whether this node was parsed under the lax policy.
    #[inline]
    pub fn is_lax(&self) -> bool {
        self.lax
    }

    /// The numeric value.
    ///
    /// # Errors
    ///
    /// Under the strict policy a malformed literal raises a `Conversion`
    /// error; under the lax policy it yields `Ok(None)` and the literal
    /// remains available through [`value`](Self::value).
    pub fn to_f64(&self) -> Hl7Result<Option<f64>> {
        if let Some(cached) = self.cached.get() {
            return Ok(*cached);
        }
        let text = self.value.trim();
        if text.is_empty() {
            let _ = self.cached.set(None);
            return Ok(None);
        }
        match text.parse::<f64>() {
            Ok(v) => {
                let _ = self.cached.set(Some(v));
                Ok(Some(v))
            }
            Err(_) if self.lax => {
                let _ = self.cached.set(None);
                Ok(None)
            }
            Err(_) => Err(Hl7Error::conversion(format!(
                "not a valid NM literal: {:?}",
                self.value
            ))),
        }
    }

    /// The numeric value if it parses, without raising; used for equality.
    fn parse_quiet(&self) -> Option<f64> {
        if let Some(cached) = self.cached.get() {
            return *cached;
        }
        self.value.trim().parse::<f64>().ok()
    }

    pub(crate) fn with_policy(value: String, lax: bool) -> Self {
        Self {
            value,
            lax,
            cached: OnceLock::new(),
        }
    }
}

impl PartialEq for Nm {
    /// `"1.0"` equals `"1"`: numeric comparison when both literals parse,
    /// literal comparison otherwise.
    fn eq(&self, other: &Self) -> bool {
        match (self.parse_quiet(), other.parse_quiet()) {
            (Some(a), Some(b)) => a == b,
            _ => self.value == other.value,
        }
    }
}

impl From<&str> for Nm {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Nm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromPiped for Nm {
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
        Ok(Some(Self::with_policy(
            crate::wire::unescape(raw, d).into_owned(),
            d.is_lax(),
        )))
    }
}

impl ToPiped for Nm {
    fn to_piped(&self, w: &mut PipeWriter<'_>, _level: Level) {
        w.push_value(&self.value);
    }

    fn is_piped_empty(&self) -> bool {
        self.value.is_empty()
    }
}

/// Sequence ID (SI): a small non-negative ordinal.
///
/// Same lazy-conversion and policy behavior as [`Nm`], with an integer
/// target type.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Si {
    value: String,
    lax: bool,
    #[cfg_attr(feature = "serde", serde(skip))]
    cached: OnceLock<Option<u32>>,
}

impl Si {
    /// Wrap a literal under the strict conversion policy.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            lax: false,
            cached: OnceLock::new(),
        }
    }

    /// Build from an ordinal.
    pub fn from_u32(value: u32) -> Self {
        Self::new(value.to_string())
    }

    /// The literal display text.
    #[inline]
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The ordinal value; same strict/lax contract as [`Nm::to_f64`].
    pub fn to_u32(&self) -> Hl7Result<Option<u32>> {
        if let Some(cached) = self.cached.get() {
            return Ok(*cached);
        }
        let text = self.value.trim();
        if text.is_empty() {
            let _ = self.cached.set(None);
            return Ok(None);
        }
        match text.parse::<u32>() {
            Ok(v) => {
                let _ = self.cached.set(Some(v));
                Ok(Some(v))
            }
            Err(_) if self.lax => {
                let _ = self.cached.set(None);
                Ok(None)
            }
            Err(_) => Err(Hl7Error::conversion(format!(
                "not a valid SI literal: {:?}",
                self.value
            ))),
        }
    }

    fn parse_quiet(&self) -> Option<u32> {
        if let Some(cached) = self.cached.get() {
            return *cached;
        }
        self.value.trim().parse::<u32>().ok()
    }
}

impl PartialEq for Si {
    fn eq(&self, other: &Self) -> bool {
        match (self.parse_quiet(), other.parse_quiet()) {
            (Some(a), Some(b)) => a == b,
            _ => self.value == other.value,
        }
    }
}

impl From<&str> for Si {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl fmt::Display for Si {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromPiped for Si {
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
            cached: OnceLock::new(),
        }))
    }
}

impl ToPiped for Si {
    fn to_piped(&self, w: &mut PipeWriter<'_>, _level: Level) {
        w.push_value(&self.value);
    }

    fn is_piped_empty(&self) -> bool {
        self.value.is_empty()
    }
}
