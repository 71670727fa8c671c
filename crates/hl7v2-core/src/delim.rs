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

//! Delimiter configuration for one message.
//!
//! The five delimiter characters are fixed at message-header parse time
//! (typically from MSH-1/MSH-2) and passed by reference into every nested
//! parse/serialize call. Changing delimiters mid-document is not supported.

use crate::error::{Hl7Error, Hl7Result};

/// The five HL7 delimiter characters plus the lax conversion policy.
///
/// Invariant: all five characters are distinct, ASCII, and not alphanumeric.
/// The invariant is enforced by [`Delimiters::new`]; the fields are therefore
/// read-only.
///
/// # Examples
///
/// ```
/// use hl7v2_core::Delimiters;
///
/// let d = Delimiters::default();
/// assert_eq!(d.field(), '|');
/// assert_eq!(d.component(), '^');
/// assert_eq!(d.repetition(), '~');
/// assert_eq!(d.escape(), '\\');
/// assert_eq!(d.subcomponent(), '&');
/// assert!(!d.is_lax());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Delimiters {
    field: char,
    component: char,
    repetition: char,
    escape: char,
    subcomponent: char,
    lax: bool,
}

impl Delimiters {
    /// Create a delimiter set, validating the distinctness invariant.
    ///
    /// # Errors
    ///
    /// Returns [`Hl7ErrorKind::Delimiter`](crate::Hl7ErrorKind::Delimiter)
    /// if any character is non-ASCII, alphanumeric, whitespace, or equal to
    /// another delimiter.
    pub fn new(
        field: char,
        component: char,
        repetition: char,
        escape: char,
        subcomponent: char,
    ) -> Hl7Result<Self> {
        let chars = [field, component, repetition, escape, subcomponent];
        for c in chars {
            if !c.is_ascii() || c.is_ascii_alphanumeric() || c.is_ascii_whitespace() {
                return Err(Hl7Error::delimiter(format!(
                    "delimiter {:?} must be a printable non-alphanumeric ASCII character",
                    c
                )));
            }
        }
        for i in 0..chars.len() {
            for j in (i + 1)..chars.len() {
                if chars[i] == chars[j] {
                    return Err(Hl7Error::delimiter(format!(
                        "delimiter {:?} used more than once",
                        chars[i]
                    )));
                }
            }
        }
        Ok(Self {
            field,
            component,
            repetition,
            escape,
            subcomponent,
            lax: false,
        })
    }

    /// Extract the delimiter set from an MSH segment prefix.
    ///
    /// MSH-1 is the character immediately following `MSH` and MSH-2 is the
    /// next four characters (component, repetition, escape, subcomponent).
    /// MSH-2 defines the escaping rules, so it is read raw and never
    /// unescaped.
    ///
    /// # Examples
    ///
    /// ```
    /// use hl7v2_core::Delimiters;
    ///
    /// let d = Delimiters::from_msh_prefix(r"MSH|^~\&|SENDER|...").unwrap();
    /// assert_eq!(d, Delimiters::default());
    ///
    /// let d = Delimiters::from_msh_prefix(r"MSH#*!?%#APP").unwrap();
    /// assert_eq!(d.field(), '#');
    /// assert_eq!(d.component(), '*');
    /// ```
    ///
    /// # Errors
    ///
    /// Returns a `Structure` error when the line does not start with `MSH`
    /// followed by five delimiter characters, or when MSH-2 is not exactly
    /// four characters long; a `Delimiter` error when the extracted
    /// characters violate the distinctness invariant.
    pub fn from_msh_prefix(line: &str) -> Hl7Result<Self> {
        let bytes = line.as_bytes();
        if !line.starts_with("MSH") || bytes.len() < 8 {
            return Err(Hl7Error::structure("line does not start with an MSH header prefix")
                .with_line(line)
                .with_position(0));
        }
        for (i, b) in bytes[3..8].iter().enumerate() {
            if !b.is_ascii() || b.is_ascii_alphanumeric() {
                return Err(Hl7Error::structure("MSH delimiter characters must be ASCII symbols")
                    .with_line(line)
                    .with_position(3 + i));
            }
        }
        let field = bytes[3] as char;
        // A third field delimiter must follow MSH-2 unless the segment ends here.
        if bytes.len() > 8 && bytes[8] != bytes[3] {
            return Err(Hl7Error::structure("MSH-2 must be exactly four characters")
                .with_line(line)
                .with_position(8));
        }
        Self::new(
            field,
            bytes[4] as char,
            bytes[5] as char,
            bytes[6] as char,
            bytes[7] as char,
        )
        .map_err(|e| e.with_line(line).with_position(3))
    }

    /// Switch on the lax conversion policy (malformed numeric/date tokens
    /// yield "no value" from lazy accessors instead of a conversion error).
    #[must_use]
    pub fn lax(mut self) -> Self {
        self.lax = true;
        self
    }

    /// Switch back to the strict conversion policy.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.lax = false;
        self
    }

    /// Whether lazy numeric/date conversion tolerates malformed tokens.
    #[inline]
    pub fn is_lax(&self) -> bool {
        self.lax
    }

    /// The field delimiter (default `|`).
    #[inline]
    pub fn field(&self) -> char {
        self.field
    }

    /// The component delimiter (default `^`).
    #[inline]
    pub fn component(&self) -> char {
        self.component
    }

    /// The repetition delimiter (default `~`).
    #[inline]
    pub fn repetition(&self) -> char {
        self.repetition
    }

    /// The escape character (default `\`).
    #[inline]
    pub fn escape(&self) -> char {
        self.escape
    }

    /// The subcomponent delimiter (default `&`).
    #[inline]
    pub fn subcomponent(&self) -> char {
        self.subcomponent
    }

    /// MSH-2 as it appears on the wire: component, repetition, escape,
    /// subcomponent.
    pub fn encoding_characters(&self) -> String {
        let mut s = String::with_capacity(4);
        s.push(self.component);
        s.push(self.repetition);
        s.push(self.escape);
        s.push(self.subcomponent);
        s
    }
}

impl Default for Delimiters {
    fn default() -> Self {
        Self {
            field: '|',
            component: '^',
            repetition: '~',
            escape: '\\',
            subcomponent: '&',
            lax: false,
        }
    }
}
