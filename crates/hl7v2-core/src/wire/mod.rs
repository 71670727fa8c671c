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

//! Lexical layer for pipe-and-hat wire text.
//!
//! This module owns the three primitives every data type builds on:
//!
//! - [`Span`]: the zero-copy token range passed down the recursion
//! - [`next_separator`] / [`TokenScanner`]: unescaped-delimiter scanning
//! - [`escape`] / [`unescape`]: the escaping engine
//!
//! plus the level-aware output side ([`PipeWriter`], [`ComponentWriter`],
//! [`SegmentWriter`]).

mod escape;
mod scan;
mod span;
mod writer;

pub use escape::{escape, escape_into, unescape};
pub use scan::{next_separator, TokenScanner};
pub use span::Span;
pub use writer::{ComponentWriter, PipeWriter, SegmentWriter};
