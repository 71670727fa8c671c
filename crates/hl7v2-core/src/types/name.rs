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

//! Person-name composites: FN, XPN, CN and XCN.
//!
//! CN, XPN and XCN model the same real-world concept at different richness
//! levels, so they are mutually convertible; conversion is a pure
//! field-by-field copy with missing target fields left absent.

use crate::types::macros::composite;
use crate::types::{Hd, Id, Is, St};

composite! {
    /// Family name (FN): a surname with its optional prefix decomposition.
    #[derive(PartialEq)]
    pub struct FamilyName {
        1: surname: St,
        2: own_surname_prefix: St,
        3: own_surname: St,
        4: surname_prefix_from_partner: St,
        5: surname_from_partner: St,
    }
}

impl FamilyName {
    /// A plain surname with no decomposition.
    pub fn from_surname(surname: impl Into<String>) -> Self {
        Self {
            surname: Some(St::new(surname)),
            own_surname_prefix: None,
            own_surname: None,
            surname_prefix_from_partner: None,
            surname_from_partner: None,
        }
    }
}

composite! {
    /// Extended person name (XPN).
    #[derive(PartialEq)]
    pub struct Xpn {
        1: family: FamilyName,
        2: given: St,
        /// Second and further given names, space-separated.
        3: middle: St,
        4: suffix: St,
        5: prefix: St,
        6: degree: Is,
        7: name_type_code: Id,
        8: name_representation_code: Id,
    }
}

composite! {
    /// Composite ID number and name (CN). The older, flatter shape of XCN.
    #[derive(PartialEq)]
    pub struct Cn {
        1: id_number: St,
        2: family_name: St,
        3: given_name: St,
        4: middle: St,
        5: suffix: St,
        6: prefix: St,
        7: degree: Is,
        8: source_table: Is,
        9: assigning_authority: Hd,
    }
}

composite! {
    /// Extended composite ID number and name (XCN).
    #[derive(PartialEq)]
    pub struct Xcn {
        1: id_number: St,
        2: family: FamilyName,
        3: given: St,
        4: middle: St,
        5: suffix: St,
        6: prefix: St,
        7: degree: Is,
        8: source_table: Is,
        9: assigning_authority: Hd,
        10: name_type_code: Id,
        11: check_digit: St,
        12: check_digit_scheme: Id,
        13: identifier_type_code: Id,
        14: assigning_facility: Hd,
        15: name_representation_code: Id,
    }
}

impl From<Cn> for Xcn {
    fn from(cn: Cn) -> Self {
        Self {
            id_number: cn.id_number,
            family: cn.family_name.map(|s| FamilyName::from_surname(s.into_string())),
            given: cn.given_name,
            middle: cn.middle,
            suffix: cn.suffix,
            prefix: cn.prefix,
            degree: cn.degree,
            source_table: cn.source_table,
            assigning_authority: cn.assigning_authority,
            name_type_code: None,
            check_digit: None,
            check_digit_scheme: None,
            identifier_type_code: None,
            assigning_facility: None,
            name_representation_code: None,
        }
    }
}

impl From<Xcn> for Cn {
    fn from(xcn: Xcn) -> Self {
        Self {
            id_number: xcn.id_number,
            family_name: xcn.family.and_then(|f| f.surname),
            given_name: xcn.given,
            middle: xcn.middle,
            suffix: xcn.suffix,
            prefix: xcn.prefix,
            degree: xcn.degree,
            source_table: xcn.source_table,
            assigning_authority: xcn.assigning_authority,
        }
    }
}

impl From<Xpn> for Xcn {
    fn from(xpn: Xpn) -> Self {
        Self {
            id_number: None,
            family: xpn.family,
            given: xpn.given,
            middle: xpn.middle,
            suffix: xpn.suffix,
            prefix: xpn.prefix,
            degree: xpn.degree,
            source_table: None,
            assigning_authority: None,
            name_type_code: xpn.name_type_code,
            check_digit: None,
            check_digit_scheme: None,
            identifier_type_code: None,
            assigning_facility: None,
            name_representation_code: xpn.name_representation_code,
        }
    }
}

impl From<Xcn> for Xpn {
    fn from(xcn: Xcn) -> Self {
        Self {
            family: xcn.family,
            given: xcn.given,
            middle: xcn.middle,
            suffix: xcn.suffix,
            prefix: xcn.prefix,
            degree: xcn.degree,
            name_type_code: xcn.name_type_code,
            name_representation_code: xcn.name_representation_code,
        }
    }
}

impl From<crate::types::Cx> for Xcn {
    fn from(cx: crate::types::Cx) -> Self {
        Self {
            id_number: cx.id,
            family: None,
            given: None,
            middle: None,
            suffix: None,
            prefix: None,
            degree: None,
            source_table: None,
            assigning_authority: cx.assigning_authority,
            name_type_code: None,
            check_digit: cx.check_digit,
            check_digit_scheme: cx.check_digit_scheme,
            identifier_type_code: cx.identifier_type_code,
            assigning_facility: cx.assigning_facility,
            name_representation_code: None,
        }
    }
}

impl From<Xcn> for crate::types::Cx {
    fn from(xcn: Xcn) -> Self {
        Self {
            id: xcn.id_number,
            check_digit: xcn.check_digit,
            check_digit_scheme: xcn.check_digit_scheme,
            assigning_authority: xcn.assigning_authority,
            identifier_type_code: xcn.identifier_type_code,
            assigning_facility: xcn.assigning_facility,
            effective_date: None,
            expiration_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{decode_field, encode_field, Cx};
    use crate::Delimiters;

    fn d() -> Delimiters {
        Delimiters::default()
    }

    // ==================== XPN tests ====================

    #[test]
    fn test_xpn_doe_john() {
        let xpn: Xpn = decode_field(&d(), "Doe^John^^Jr^Dr").unwrap().unwrap();
        assert_eq!(xpn.family.as_ref().unwrap().surname.as_ref().unwrap().value(), "Doe");
        assert_eq!(xpn.given.as_ref().unwrap().value(), "John");
        assert!(xpn.middle.is_none());
        assert_eq!(xpn.suffix.as_ref().unwrap().value(), "Jr");
        assert_eq!(xpn.prefix.as_ref().unwrap().value(), "Dr");
    }

    #[test]
    fn test_xpn_doe_john_roundtrip() {
        let text = "Doe^John^^Jr^Dr";
        let xpn: Xpn = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(encode_field(&d(), &xpn), text);
    }

    #[test]
    fn test_xpn_family_only_no_trailing_delimiters() {
        let xpn = Xpn {
            family: Some(FamilyName::from_surname("Solo")),
            ..Default::default()
        };
        assert_eq!(encode_field(&d(), &xpn), "Solo");
    }

    #[test]
    fn test_xpn_family_subcomponents() {
        let xpn: Xpn = decode_field(&d(), "van&van&Berg^Piet").unwrap().unwrap();
        let family = xpn.family.as_ref().unwrap();
        assert_eq!(family.surname.as_ref().unwrap().value(), "van");
        assert_eq!(family.own_surname.as_ref().unwrap().value(), "Berg");
    }

    #[test]
    fn test_xpn_new_all_none_is_none() {
        assert!(Xpn::new(None, None, None, None, None, None, None, None).is_none());
    }

    // ==================== conversion tests ====================

    #[test]
    fn test_cn_to_xcn_copies_fields() {
        let cn: Cn = decode_field(&d(), "007^Bond^James").unwrap().unwrap();
        let xcn = Xcn::from(cn);
        assert_eq!(xcn.id_number.as_ref().unwrap().value(), "007");
        assert_eq!(xcn.family.as_ref().unwrap().surname.as_ref().unwrap().value(), "Bond");
        assert!(xcn.check_digit.is_none());
    }

    #[test]
    fn test_xcn_to_cn_flattens_family() {
        let xcn: Xcn = decode_field(&d(), "007^Bond^James^^^^^^HOSP").unwrap().unwrap();
        let cn = Cn::from(xcn);
        assert_eq!(cn.family_name.as_ref().unwrap().value(), "Bond");
        assert_eq!(
            cn.assigning_authority.as_ref().unwrap().namespace_id.as_ref().unwrap().value(),
            "HOSP"
        );
    }

    #[test]
    fn test_xpn_xcn_roundtrip_preserves_name() {
        let xpn: Xpn = decode_field(&d(), "Doe^John^Q^Jr^Dr^MD").unwrap().unwrap();
        let back = Xpn::from(Xcn::from(xpn.clone()));
        assert_eq!(back, xpn);
    }

    #[test]
    fn test_cx_to_xcn_and_back() {
        let cx: Cx = decode_field(&d(), "12345^9^M10^NS&1.2.3&ISO^MR").unwrap().unwrap();
        let xcn = Xcn::from(cx.clone());
        assert_eq!(xcn.id_number.as_ref().unwrap().value(), "12345");
        assert_eq!(xcn.check_digit.as_ref().unwrap().value(), "9");
        let back = Cx::from(xcn);
        assert_eq!(back, cx);
    }
}
