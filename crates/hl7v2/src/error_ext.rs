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

//! Error context helpers for improved ergonomics.
//!
//! This module provides extension traits for `Result<T, Hl7Error>` that
//! make it easy to add contextual information to errors as they propagate
//! through the call stack.
//!
//! # Examples
//!
//! ```rust
//! use hl7v2::{parse_segment, Delimiters, Hl7ResultExt};
//!
//! fn load_observation(line: &str) -> Result<hl7v2::GenericSegment, hl7v2::Hl7Error> {
//!     let d = Delimiters::default();
//!     parse_segment(&d, line).context("while reading an observation segment")
//! }
//! ```
//!
//! Use `with_context` when the context message is expensive to compute:
//!
//! ```rust
//! use hl7v2::{parse_segment, Delimiters, Hl7ResultExt};
//!
//! fn process(index: usize, line: &str) -> Result<(), hl7v2::Hl7Error> {
//!     let d = Delimiters::default();
//!     let seg = parse_segment(&d, line)
//!         .with_context(|| format!("processing segment {} ({} bytes)", index, line.len()))?;
//!     let _ = seg;
//!     Ok(())
//! }
//! ```

use hl7v2_core::{Hl7Error, Hl7Result};

/// Extension methods for `Result<T, Hl7Error>`.
pub trait Hl7ResultExt<T> {
    /// Prefix the error message with static context.
    fn context(self, context: impl Into<String>) -> Hl7Result<T>;

    /// Prefix the error message with lazily-computed context.
    fn with_context<F, S>(self, f: F) -> Hl7Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;

    /// Convert a foreign error into an [`Hl7Error`] with a mapping
    /// function.
    fn map_err_to_hl7<F>(self, f: F) -> Hl7Result<T>
    where
        F: FnOnce(Hl7Error) -> Hl7Error;
}

impl<T> Hl7ResultExt<T> for Hl7Result<T> {
    fn context(self, context: impl Into<String>) -> Hl7Result<T> {
        self.map_err(|mut e| {
            e.message = format!("{}: {}", context.into(), e.message);
            e
        })
    }

    fn with_context<F, S>(self, f: F) -> Hl7Result<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|mut e| {
            e.message = format!("{}: {}", f().into(), e.message);
            e
        })
    }

    fn map_err_to_hl7<F>(self, f: F) -> Hl7Result<T>
    where
        F: FnOnce(Hl7Error) -> Hl7Error,
    {
        self.map_err(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hl7v2_core::Hl7ErrorKind;

    #[test]
    fn test_context_prefixes_message() {
        let result: Hl7Result<()> = Err(Hl7Error::structure("bad field"));
        let err = result.context("in PID").unwrap_err();
        assert_eq!(err.message, "in PID: bad field");
        assert_eq!(err.kind, Hl7ErrorKind::Structure);
    }

    #[test]
    fn test_with_context_lazy() {
        let result: Hl7Result<()> = Err(Hl7Error::conversion("bad NM"));
        let err = result.with_context(|| format!("field {}", 7)).unwrap_err();
        assert_eq!(err.message, "field 7: bad NM");
    }

    #[test]
    fn test_context_noop_on_ok() {
        let result: Hl7Result<u8> = Ok(3);
        assert_eq!(result.context("unused").unwrap(), 3);
    }

    #[test]
    fn test_context_preserves_position() {
        let result: Hl7Result<()> =
            Err(Hl7Error::structure("bad").with_line("PID|x").with_position(4));
        let err = result.context("outer").unwrap_err();
        assert_eq!(err.position, Some(4));
        assert_eq!(err.line.as_deref(), Some("PID|x"));
    }
}
