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

//! # HL7 v2.x pipe-and-hat messaging
//!
//! Parsing and serialization for the HL7 v2.x delimited message format:
//! the recursive descent over delimiter levels, the escape/unescape engine,
//! the typed composite-field catalog, and a lossless fallback for
//! unrecognized structure.
//!
//! ## Quick Start
//!
//! ```rust
//! use hl7v2::{parse_segment, types::{decode_field, Repeat, Cx}, Delimiters};
//!
//! // Delimiters come from the message header and drive every parse call.
//! let d = Delimiters::from_msh_prefix(r"MSH|^~\&|SENDER").unwrap();
//!
//! // A field of repeating patient identifiers:
//! let ids: Repeat<Cx> = decode_field(&d, "1234^^^HOSP^MR~5678^^^LAB^PI")
//!     .unwrap()
//!     .unwrap();
//! assert_eq!(ids.primary().unwrap().id.as_ref().unwrap().value(), "1234");
//!
//! // Anything unrecognized survives verbatim:
//! let seg = parse_segment(&d, "ZPV|1|custom^stuff&here").unwrap();
//! assert_eq!(seg.render(&d), "ZPV|1|custom^stuff&here");
//! ```
//!
//! ## Strict and lax parsing
//!
//! Production streams routinely carry malformed numeric fields. Under the
//! default strict policy a malformed literal raises a conversion error at
//! the lazy accessor; under `Delimiters::lax()` it yields "no value" while
//! the literal text is preserved for round-trip.
//!
//! ## Modules
//!
//! - [`types`]: the data-type catalog (primitives, composites, repetition)
//! - [`wire`]: spans, scanning and the escaping engine
//! - [`fallback`]: the lossless UFLD/UCMP containers

// Re-export core types
pub use hl7v2_core::{
    // Configuration
    Delimiters,
    // Segment fallback
    GenericSegment,
    // Errors
    Hl7Error,
    Hl7ErrorKind,
    Hl7Result,
    // Traits and dispatch
    FromPiped,
    Level,
    Repeat,
    ToPiped,
    Ucmp,
    Ufld,
    Value,
    ValueKind,
};

// Error handling extensions
mod error_ext;
pub use error_ext::Hl7ResultExt;

// Re-export the data-type catalog
pub mod types {
    //! The HL7 data-type catalog.
    pub use hl7v2_core::types::{
        decode_field, encode_field, Ce, Cn, Cne, Cp, Cq, Cwe, Cx, Dln, Dr, Dt, Dtm, Ei,
        FamilyName, Ft, Hd, Id, Is, Mo, Nm, Pl, Repeat, Sad, Si, St, Tm, Ts, Tx, Vid, Xad, Xcn,
        Xpn,
    };
}

// Re-export the wire layer
pub mod wire {
    //! Spans, scanning and escaping.
    pub use hl7v2_core::wire::{
        escape, escape_into, next_separator, unescape, ComponentWriter, PipeWriter,
        SegmentWriter, Span, TokenScanner,
    };
}

// Re-export the fallback containers
pub mod fallback {
    //! Lossless containers for unrecognized structure.
    pub use hl7v2_core::fallback::{Ucmp, Ufld};
}

/// Parse one segment line through the generic fallback container.
///
/// # Errors
///
/// See [`GenericSegment::parse`].
pub fn parse_segment(d: &Delimiters, line: &str) -> Hl7Result<GenericSegment> {
    GenericSegment::parse(d, line)
}

/// Serialize a generic segment back to a line.
pub fn render_segment(d: &Delimiters, segment: &GenericSegment) -> String {
    segment.render(d)
}
