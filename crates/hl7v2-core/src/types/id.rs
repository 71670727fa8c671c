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

//! Identifier composites: CX and DLN.

use crate::types::macros::composite;
use crate::types::{Dt, Hd, Id, Is, St};

composite! {
    /// Extended composite ID with check digit (CX).
    pub struct Cx {
        1: id: St,
        2: check_digit: St,
        3: check_digit_scheme: Id,
        4: assigning_authority: Hd,
        5: identifier_type_code: Id,
        6: assigning_facility: Hd,
        7: effective_date: Dt,
        8: expiration_date: Dt,
    }
}

impl Cx {
    /// Identifier with no qualifying components.
    pub fn from_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(St::new(id)),
            check_digit: None,
            check_digit_scheme: None,
            assigning_authority: None,
            identifier_type_code: None,
            assigning_facility: None,
            effective_date: None,
            expiration_date: None,
        }
    }

    /// Whether two identifiers refer to the same ID once formatting
    /// hyphens are stripped: `123-45-6789` matches `123456789`.
    ///
    /// This encodes a US formatting convention; callers needing a
    /// different normalization compare [`id`](Self::id) themselves.
    pub fn same_identifier(&self, other: &Self) -> bool {
        normalized_id(&self.id) == normalized_id(&other.id)
            && self.check_digit == other.check_digit
    }
}

fn normalized_id(id: &Option<St>) -> Option<String> {
    id.as_ref()
        .map(|v| v.value().chars().filter(|c| *c != '-').collect())
}

impl PartialEq for Cx {
    /// Equality normalizes the ID component the way
    /// [`same_identifier`](Cx::same_identifier) does; all other components
    /// compare structurally.
    fn eq(&self, other: &Self) -> bool {
        normalized_id(&self.id) == normalized_id(&other.id)
            && self.check_digit == other.check_digit
            && self.check_digit_scheme == other.check_digit_scheme
            && self.assigning_authority == other.assigning_authority
            && self.identifier_type_code == other.identifier_type_code
            && self.assigning_facility == other.assigning_facility
            && self.effective_date == other.effective_date
            && self.expiration_date == other.expiration_date
    }
}

composite! {
    /// Driver's license number (DLN).
    #[derive(PartialEq)]
    pub struct Dln {
        1: license_number: St,
        2: issuing_state: Is,
        3: expiration_date: Dt,
    }
}
