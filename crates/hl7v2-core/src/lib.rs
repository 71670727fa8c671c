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

//! Core parser and data-type model for HL7 v2.x pipe-and-hat messages.
//!
//! This crate implements the recursive descent over delimiter levels
//! (segment → field → repetition → component → subcomponent), the
//! escape/unescape engine, and the typed composite-field catalog, with a
//! lossless fallback for structure the catalog does not model.
//!
//! # Layers
//!
//! - [`wire`]: token spans, the unescaped-delimiter scanner, the escaping
//!   engine, and the level-aware writers
//! - [`types`]: primitive and composite data types (NM, DT, TS, CX, XPN,
//!   XCN, XAD, and the rest of the catalog) built on the wire layer
//! - [`fallback`] / [`segment`]: schema-less containers that round-trip
//!   unrecognized content verbatim
//!
//! # Example
//!
//! ```
//! use hl7v2_core::{types::{decode_field, encode_field, Xpn}, Delimiters};
//!
//! let d = Delimiters::default();
//! let name: Xpn = decode_field(&d, "Doe^John^^Jr^Dr").unwrap().unwrap();
//! assert_eq!(name.given.as_ref().unwrap().value(), "John");
//! assert_eq!(encode_field(&d, &name), "Doe^John^^Jr^Dr");
//! ```
//!
//! Parsing is synchronous and CPU-only: a call owns its line buffer and
//! delimiter configuration by reference, touches no global state, and
//! recurses only as deep as the fixed three-level schema.

mod delim;
mod error;
pub mod fallback;
pub mod segment;
pub mod types;
pub mod wire;

pub use delim::Delimiters;
pub use error::{Hl7Error, Hl7ErrorKind, Hl7Result};
pub use fallback::{Ucmp, Ufld};
pub use segment::{validate_segment_id, GenericSegment};
pub use types::{FromPiped, Level, Repeat, ToPiped, Value, ValueKind};
