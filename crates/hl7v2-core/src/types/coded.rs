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

//! Coded-element composites: HD, the CE family, EI and VID.

use crate::types::macros::composite;
use crate::types::{Id, Is, St};

composite! {
    /// Hierarchic designator (HD): a namespace plus an optional universal
    /// ID and its type.
    #[derive(PartialEq)]
    pub struct Hd {
        1: namespace_id: Is,
        2: universal_id: St,
        3: universal_id_type: Id,
    }
}

impl Hd {
    /// Designator carrying only a local namespace.
    pub fn from_namespace(namespace: impl Into<String>) -> Self {
        Self {
            namespace_id: Some(Is::new(namespace)),
            universal_id: None,
            universal_id_type: None,
        }
    }
}

composite! {
    /// Coded element (CE).
    #[derive(PartialEq)]
    pub struct Ce {
        1: identifier: St,
        2: text: St,
        3: name_of_coding_system: Is,
        4: alternate_identifier: St,
        5: alternate_text: St,
        6: name_of_alternate_coding_system: Is,
    }
}

impl Ce {
    /// Build a coded element, applying fallbacks when neither identifier
    /// nor text is present.
    ///
    /// Returns `None` only when the supplied values *and* the defaults are
    /// all absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use hl7v2_core::types::{Ce, Is, St};
    ///
    /// let ce = Ce::with_default(
    ///     None,
    ///     None,
    ///     None,
    ///     Some(St::from("Unknown")),
    ///     Some(Is::from("L")),
    /// )
    /// .unwrap();
    /// assert_eq!(ce.text.unwrap().value(), "Unknown");
    /// assert_eq!(ce.name_of_coding_system.unwrap().value(), "L");
    /// ```
    pub fn with_default(
        identifier: Option<St>,
        text: Option<St>,
        coding_system: Option<Is>,
        default_text: Option<St>,
        default_coding_system: Option<Is>,
    ) -> Option<Self> {
        if identifier.is_none() && text.is_none() {
            return Self::new(
                None,
                default_text,
                default_coding_system.or(coding_system),
                None,
                None,
                None,
            );
        }
        Self::new(identifier, text, coding_system, None, None, None)
    }
}

composite! {
    /// Coded with exceptions (CWE): CE plus coding-system versions and the
    /// original text.
    #[derive(PartialEq)]
    pub struct Cwe {
        1: identifier: St,
        2: text: St,
        3: name_of_coding_system: Is,
        4: alternate_identifier: St,
        5: alternate_text: St,
        6: name_of_alternate_coding_system: Is,
        7: coding_system_version_id: St,
        8: alternate_coding_system_version_id: St,
        9: original_text: St,
    }
}

composite! {
    /// Coded with no exceptions (CNE). Same wire shape as CWE; the
    /// difference is a conformance posture, not a structure.
    #[derive(PartialEq)]
    pub struct Cne {
        1: identifier: St,
        2: text: St,
        3: name_of_coding_system: Is,
        4: alternate_identifier: St,
        5: alternate_text: St,
        6: name_of_alternate_coding_system: Is,
        7: coding_system_version_id: St,
        8: alternate_coding_system_version_id: St,
        9: original_text: St,
    }
}

composite! {
    /// Entity identifier (EI).
    #[derive(PartialEq)]
    pub struct Ei {
        1: entity_identifier: St,
        2: namespace_id: Is,
        3: universal_id: St,
        4: universal_id_type: Id,
    }
}

composite! {
    /// Version identifier (VID).
    #[derive(PartialEq)]
    pub struct Vid {
        1: version_id: Id,
        2: internationalization_code: Ce,
        3: international_version_id: Ce,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{decode_field, encode_field};
    use crate::Delimiters;

    fn d() -> Delimiters {
        Delimiters::default()
    }

    // ==================== HD tests ====================

    #[test]
    fn test_hd_parse() {
        let hd: Hd = decode_field(&d(), "LAB1^2.16.840.1^ISO").unwrap().unwrap();
        assert_eq!(hd.namespace_id.as_ref().unwrap().value(), "LAB1");
        assert_eq!(hd.universal_id.as_ref().unwrap().value(), "2.16.840.1");
        assert_eq!(hd.universal_id_type.as_ref().unwrap().value(), "ISO");
    }

    #[test]
    fn test_hd_namespace_only_serializes_bare() {
        let hd = Hd::from_namespace("LAB1");
        assert_eq!(encode_field(&d(), &hd), "LAB1");
    }

    #[test]
    fn test_hd_new_all_none_propagates_absence() {
        assert!(Hd::new(None, None, None).is_none());
    }

    #[test]
    fn test_hd_trailing_empty_components_tolerated() {
        let hd: Hd = decode_field(&d(), "LAB1^^").unwrap().unwrap();
        assert_eq!(hd.namespace_id.as_ref().unwrap().value(), "LAB1");
        assert!(hd.universal_id.is_none());
    }

    #[test]
    fn test_hd_content_past_schema_is_structure_error() {
        let err = decode_field::<Hd>(&d(), "LAB1^1.2^ISO^EXTRA").unwrap_err();
        assert_eq!(err.kind, crate::Hl7ErrorKind::Structure);
        assert_eq!(err.position, Some(13));
        assert_eq!(err.line.as_deref(), Some("LAB1^1.2^ISO^EXTRA"));
    }

    // ==================== CE tests ====================

    #[test]
    fn test_ce_parse_and_roundtrip() {
        let text = "1234^Glucose^LN";
        let ce: Ce = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(ce.identifier.as_ref().unwrap().value(), "1234");
        assert_eq!(ce.text.as_ref().unwrap().value(), "Glucose");
        assert_eq!(encode_field(&d(), &ce), text);
    }

    #[test]
    fn test_ce_with_default_prefers_supplied() {
        let ce = Ce::with_default(
            Some(St::from("88304")),
            Some(St::from("Biopsy")),
            Some(Is::from("CPT")),
            Some(St::from("fallback")),
            None,
        )
        .unwrap();
        assert_eq!(ce.identifier.unwrap().value(), "88304");
        assert_eq!(ce.text.unwrap().value(), "Biopsy");
    }

    #[test]
    fn test_ce_with_default_all_absent_is_none() {
        assert!(Ce::with_default(None, None, None, None, None).is_none());
    }

    // ==================== CWE tests ====================

    #[test]
    fn test_cwe_nine_positions() {
        let cwe: Cwe = decode_field(&d(), "A^B^C^D^E^F^G^H^I").unwrap().unwrap();
        assert_eq!(cwe.original_text.as_ref().unwrap().value(), "I");
        assert_eq!(cwe.coding_system_version_id.as_ref().unwrap().value(), "G");
    }

    #[test]
    fn test_cwe_short_field_tolerated() {
        let cwe: Cwe = decode_field(&d(), "A^B").unwrap().unwrap();
        assert!(cwe.name_of_coding_system.is_none());
        assert!(cwe.original_text.is_none());
    }

    // ==================== EI tests ====================

    #[test]
    fn test_ei_roundtrip() {
        let text = "ORD-1^PLACER^1.2.3^ISO";
        let ei: Ei = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(ei.entity_identifier.as_ref().unwrap().value(), "ORD-1");
        assert_eq!(encode_field(&d(), &ei), text);
    }

    // ==================== VID tests ====================

    #[test]
    fn test_vid_nested_ce() {
        // Nested CE components sit at subcomponent depth.
        let vid: Vid = decode_field(&d(), "2.4^US&English&ISO639").unwrap().unwrap();
        assert_eq!(vid.version_id.as_ref().unwrap().value(), "2.4");
        let code = vid.internationalization_code.as_ref().unwrap();
        assert_eq!(code.identifier.as_ref().unwrap().value(), "US");
        assert_eq!(code.text.as_ref().unwrap().value(), "English");
    }
}
