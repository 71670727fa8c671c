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

//! Property-based tests at the umbrella surface: whatever a consumer
//! builds or receives, parse → render must reach a fixed point.

use hl7v2::{parse_segment, render_segment, Delimiters};
use proptest::prelude::*;

fn field_text() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-zA-Z0-9 .|^~&\\\\]{0,16}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Property: rendering a parsed segment and parsing it again is a
    /// fixed point: the second render is byte-identical to the first.
    #[test]
    fn prop_parse_render_fixed_point(fields in proptest::collection::vec(field_text(), 0..6)) {
        let d = Delimiters::default();
        let mut seg = hl7v2::GenericSegment::new("ZFX").unwrap();
        for (i, text) in fields.iter().enumerate() {
            if !text.is_empty() {
                seg.set_field_text(i + 1, text.clone());
            }
        }
        let first = render_segment(&d, &seg);
        let reparsed = parse_segment(&d, &first).unwrap();
        let second = render_segment(&d, &reparsed);
        prop_assert_eq!(second, first);
    }

    /// Property: parsing is deterministic.
    #[test]
    fn prop_parse_determinism(fields in proptest::collection::vec(field_text(), 1..5)) {
        let d = Delimiters::default();
        let mut seg = hl7v2::GenericSegment::new("ZDT").unwrap();
        for (i, text) in fields.iter().enumerate() {
            seg.set_field_text(i + 1, text.clone());
        }
        let line = render_segment(&d, &seg);
        let a = parse_segment(&d, &line).unwrap();
        let b = parse_segment(&d, &line).unwrap();
        prop_assert_eq!(a, b);
    }
}
