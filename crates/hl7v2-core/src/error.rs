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

//! Error types for HL7 v2.x parsing and serialization.

use std::fmt;
use thiserror::Error;

/// The kind of error that occurred during parsing or value access.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hl7ErrorKind {
    /// Field-level structural contradiction (unexpected trailing content,
    /// malformed header prefix, and the like).
    Structure,
    /// Segment ID does not have the three-character shape. Always
    /// recoverable by the message layer (Z-segment fallback).
    UnknownSegment,
    /// Malformed numeric or date token surfaced by a lazy accessor under
    /// the strict policy.
    Conversion,
    /// Invalid delimiter configuration (duplicate, non-ASCII, alphanumeric).
    Delimiter,
}

impl fmt::Display for Hl7ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structure => write!(f, "StructureError"),
            Self::UnknownSegment => write!(f, "UnknownSegmentError"),
            Self::Conversion => write!(f, "ConversionError"),
            Self::Delimiter => write!(f, "DelimiterError"),
        }
    }
}

/// An error raised by the HL7 parsing/serialization core.
///
/// Structural errors carry the offending line text and character position so
/// the message layer can decide recoverability; this layer never decides
/// whether to fail the whole message.
#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct Hl7Error {
    /// The kind of error.
    pub kind: Hl7ErrorKind,
    /// Human-readable error message.
    pub message: String,
    /// The offending line, if known.
    pub line: Option<String>,
    /// Character position within the line (0-based), if known.
    pub position: Option<usize>,
}

impl Hl7Error {
    /// Create a new error.
    pub fn new(kind: Hl7ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            line: None,
            position: None,
        }
    }

    /// Attach the offending line text.
    pub fn with_line(mut self, line: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self
    }

    /// Attach the character position within the offending line.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    // Convenience constructors for each error kind
    pub fn structure(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::Structure, message)
    }

    pub fn unknown_segment(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::UnknownSegment, message)
    }

    pub fn conversion(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::Conversion, message)
    }

    pub fn delimiter(message: impl Into<String>) -> Self {
        Self::new(Hl7ErrorKind::Delimiter, message)
    }

    /// Whether the message layer can always recover from this error by
    /// falling back to generic segment handling.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind, Hl7ErrorKind::UnknownSegment)
    }
}

/// Result type for HL7 core operations.
pub type Hl7Result<T> = Result<T, Hl7Error>;

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Hl7ErrorKind Display tests ====================

    #[test]
    fn test_error_kind_display_structure() {
        assert_eq!(format!("{}", Hl7ErrorKind::Structure), "StructureError");
    }

    #[test]
    fn test_error_kind_display_unknown_segment() {
        assert_eq!(
            format!("{}", Hl7ErrorKind::UnknownSegment),
            "UnknownSegmentError"
        );
    }

    #[test]
    fn test_error_kind_display_conversion() {
        assert_eq!(format!("{}", Hl7ErrorKind::Conversion), "ConversionError");
    }

    #[test]
    fn test_error_kind_display_delimiter() {
        assert_eq!(format!("{}", Hl7ErrorKind::Delimiter), "DelimiterError");
    }

    #[test]
    fn test_error_kind_equality() {
        assert_eq!(Hl7ErrorKind::Structure, Hl7ErrorKind::Structure);
        assert_ne!(Hl7ErrorKind::Structure, Hl7ErrorKind::Conversion);
    }

    // ==================== Hl7Error tests ====================

    #[test]
    fn test_error_display() {
        let err = Hl7Error::structure("unexpected trailing content");
        let msg = format!("{}", err);
        assert!(msg.contains("StructureError"));
        assert!(msg.contains("unexpected trailing content"));
    }

    #[test]
    fn test_error_with_line() {
        let err = Hl7Error::structure("bad field").with_line("PID|1||X");
        assert_eq!(err.line.as_deref(), Some("PID|1||X"));
    }

    #[test]
    fn test_error_with_position() {
        let err = Hl7Error::structure("bad field").with_position(7);
        assert_eq!(err.position, Some(7));
    }

    #[test]
    fn test_error_chained_builders() {
        let err = Hl7Error::structure("bad field")
            .with_line("OBX|1|NM|x")
            .with_position(4);
        assert_eq!(err.line.as_deref(), Some("OBX|1|NM|x"));
        assert_eq!(err.position, Some(4));
    }

    #[test]
    fn test_error_structure() {
        let err = Hl7Error::structure("test");
        assert_eq!(err.kind, Hl7ErrorKind::Structure);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_error_unknown_segment_is_recoverable() {
        let err = Hl7Error::unknown_segment("ZZZ9");
        assert_eq!(err.kind, Hl7ErrorKind::UnknownSegment);
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_error_conversion() {
        let err = Hl7Error::conversion("not a number");
        assert_eq!(err.kind, Hl7ErrorKind::Conversion);
    }

    #[test]
    fn test_error_delimiter() {
        let err = Hl7Error::delimiter("duplicate delimiter");
        assert_eq!(err.kind, Hl7ErrorKind::Delimiter);
    }

    #[test]
    fn test_error_is_std_error() {
        fn accepts_error<E: std::error::Error>(_: E) {}
        accepts_error(Hl7Error::structure("test"));
    }

    #[test]
    fn test_error_clone() {
        let original = Hl7Error::conversion("bad NM").with_position(3);
        let cloned = original.clone();
        assert_eq!(original.kind, cloned.kind);
        assert_eq!(original.message, cloned.message);
        assert_eq!(original.position, cloned.position);
    }
}
