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

//! Patient location (PL).

use std::fmt;

use crate::types::macros::composite;
use crate::types::{Hd, Is, St};

composite! {
    /// Person location (PL).
    #[derive(PartialEq)]
    pub struct Pl {
        1: point_of_care: Is,
        2: room: Is,
        3: bed: Is,
        4: facility: Hd,
        5: location_status: Is,
        6: person_location_type: Is,
        7: building: Is,
        8: floor: Is,
        9: location_description: St,
    }
}

impl fmt::Display for Pl {
    /// A single point-of-care code when present, otherwise the
    /// building/floor/room/bed coordinates joined with `-`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(poc) = &self.point_of_care {
            return write!(f, "{}", poc.value());
        }
        let mut first = true;
        for part in [&self.building, &self.floor, &self.room, &self.bed]
            .into_iter()
            .flatten()
        {
            if !first {
                write!(f, "-")?;
            }
            write!(f, "{}", part.value())?;
            first = false;
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

    #[test]
    fn test_pl_parse_and_roundtrip() {
        let text = "ICU^12^A^GENHOSP";
        let pl: Pl = decode_field(&d(), text).unwrap().unwrap();
        assert_eq!(pl.point_of_care.as_ref().unwrap().value(), "ICU");
        assert_eq!(pl.room.as_ref().unwrap().value(), "12");
        assert_eq!(pl.bed.as_ref().unwrap().value(), "A");
        assert_eq!(encode_field(&d(), &pl), text);
    }

    #[test]
    fn test_pl_display_prefers_point_of_care() {
        let pl: Pl = decode_field(&d(), "ICU^12^A").unwrap().unwrap();
        assert_eq!(format!("{}", pl), "ICU");
    }

    #[test]
    fn test_pl_display_falls_back_to_coordinates() {
        let pl: Pl = decode_field(&d(), "^12^A^^^^West^3").unwrap().unwrap();
        assert_eq!(format!("{}", pl), "West-3-12-A");
    }

    #[test]
    fn test_pl_facility_subcomponents() {
        let pl: Pl = decode_field(&d(), "ER^^^GENHOSP&1.2.3&ISO").unwrap().unwrap();
        let fac = pl.facility.as_ref().unwrap();
        assert_eq!(fac.universal_id.as_ref().unwrap().value(), "1.2.3");
    }
}
