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

//! Address composites: SAD and XAD.

use std::fmt;

use crate::types::macros::composite;
use crate::types::{Cwe, Dr, Id, Is, St};

composite! {
    /// Street address (SAD).
    #[derive(PartialEq)]
    pub struct Sad {
        1: street_or_mailing_address: St,
        2: street_name: St,
        3: dwelling_number: St,
    }
}

impl Sad {
    /// One-line street address.
    pub fn from_line(line: impl Into<String>) -> Self {
        Self {
            street_or_mailing_address: Some(St::new(line)),
            street_name: None,
            dwelling_number: None,
        }
    }
}

impl fmt::Display for Sad {
    /// The mailing line when present, otherwise dwelling number and street
    /// name.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(line) = &self.street_or_mailing_address {
            return write!(f, "{}", line.value());
        }
        let mut first = true;
        for part in [&self.dwelling_number, &self.street_name].into_iter().flatten() {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{}", part.value())?;
            first = false;
        }
        Ok(())
    }
}

composite! {
    /// Extended address (XAD).
    pub struct Xad {
        1: street_address: Sad,
        2: other_designation: St,
        3: city: St,
        4: state_or_province: St,
        5: zip_or_postal_code: St,
        6: country: Id,
        7: address_type: Id,
        8: other_geographic_designation: St,
        9: county_code: Cwe,
        10: census_tract: Is,
        11: address_representation_code: Id,
        12: address_validity_range: Dr,
    }
}

impl Xad {
    /// Whether two ZIP codes denote the same place: the base and the +4
    /// extension are compared after stripping the formatting hyphen, so
    /// `75001-2201` matches `750012201`.
    ///
    /// This encodes the US ZIP+4 convention; other postal systems should
    /// compare [`zip_or_postal_code`](Self::zip_or_postal_code) directly.
    pub fn zip_matches(&self, other: &Self) -> bool {
        normalized_zip(&self.zip_or_postal_code) == normalized_zip(&other.zip_or_postal_code)
    }
}

fn normalized_zip(zip: &Option<St>) -> Option<String> {
    zip.as_ref()
        .map(|z| z.value().chars().filter(|c| *c != '-').collect())
}

impl PartialEq for Xad {
    /// Structural equality except for the ZIP component, which is compared
    /// through [`zip_matches`](Xad::zip_matches).
    fn eq(&self, other: &Self) -> bool {
        self.street_address == other.street_address
            && self.other_designation == other.other_designation
            && self.city == other.city
            && self.state_or_province == other.state_or_province
            && normalized_zip(&self.zip_or_postal_code) == normalized_zip(&other.zip_or_postal_code)
            && self.country == other.country
            && self.address_type == other.address_type
            && self.other_geographic_designation == other.other_geographic_designation
            && self.county_code == other.county_code
            && self.census_tract == other.census_tract
            && self.address_representation_code == other.address_representation_code
            && self.address_validity_range == other.address_validity_range
    }
}

impl fmt::Display for Xad {
    /// Single-line rendering: street, other designation, city, state and
    /// ZIP, in that priority, skipping absent parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut wrote = false;
        if let Some(street) = &self.street_address {
            write!(f, "{}", street)?;
            wrote = true;
        }
        for part in [&self.other_designation, &self.city].into_iter().flatten() {
            if wrote {
                write!(f, ", ")?;
            }
            write!(f, "{}", part.value())?;
            wrote = true;
        }
        if let Some(state) = &self.state_or_province {
            if wrote {
                write!(f, ", ")?;
            }
            write!(f, "{}", state.value())?;
            wrote = true;
        }
        if let Some(zip) = &self.zip_or_postal_code {
            if wrote {
                write!(f, " ")?;
            }
            write!(f, "{}", zip.value())?;
        }
        Ok(())
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

    // ==================== SAD tests ====================

    #[test]
    fn test_sad_display_prefers_mailing_line() {
        let sad: Sad = decode_field(&d(), "123 Main St^Main St^123").unwrap().unwrap();
        assert_eq!(format!("{}", sad), "123 Main St");
    }

    #[test]
    fn test_sad_display_falls_back_to_parts() {
        let sad = Sad {
            street_or_mailing_address: None,
            street_name: Some(St::from("Main St")),
            dwelling_number: Some(St::from("123")),
        };
        assert_eq!(format!("{}", sad), "123 Main St");
    }

    // ==================== XAD tests ====================

    #[test]
    fn test_xad_parse() {
        let xad: Xad = decode_field(&d(), "123 Main St^Apt 4^Dallas^TX^75001^USA^H")
            .unwrap()
            .unwrap();
        assert_eq!(xad.city.as_ref().unwrap().value(), "Dallas");
        assert_eq!(xad.state_or_province.as_ref().unwrap().value(), "TX");
        assert_eq!(xad.address_type.as_ref().unwrap().value(), "H");
    }

    #[test]
    fn test_xad_roundtrip() {
        let text = "123 Main St^^Dallas^TX^75001";
        let xad: Xad = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(encode_field(&d(), &xad), text);
    }

    #[test]
    fn test_xad_zip_normalized_equality() {
        let a: Xad = decode_field(&d(), "^^Dallas^TX^75001-2201").unwrap().unwrap();
        let b: Xad = decode_field(&d(), "^^Dallas^TX^750012201").unwrap().unwrap();
        assert_eq!(a, b);
        assert!(a.zip_matches(&b));
    }

    #[test]
    fn test_xad_different_zip_base_not_equal() {
        let a: Xad = decode_field(&d(), "^^Dallas^TX^75001").unwrap().unwrap();
        let b: Xad = decode_field(&d(), "^^Dallas^TX^75002").unwrap().unwrap();
        assert_ne!(a, b);
        assert!(!a.zip_matches(&b));
    }

    #[test]
    fn test_xad_county_code_is_cwe() {
        let xad: Xad = decode_field(&d(), "^^^^^^^^113&Dallas County&FIPS")
            .unwrap()
            .unwrap();
        let county = xad.county_code.as_ref().unwrap();
        assert_eq!(county.identifier.as_ref().unwrap().value(), "113");
        assert_eq!(county.text.as_ref().unwrap().value(), "Dallas County");
    }

    #[test]
    fn test_xad_display() {
        let xad: Xad = decode_field(&d(), "123 Main St^Apt 4^Dallas^TX^75001")
            .unwrap()
            .unwrap();
        assert_eq!(format!("{}", xad), "123 Main St, Apt 4, Dallas, TX 75001");
    }

    #[test]
    fn test_xad_display_sparse() {
        let xad: Xad = decode_field(&d(), "^^Dallas^TX").unwrap().unwrap();
        assert_eq!(format!("{}", xad), "Dallas, TX");
    }
}
