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

//! Money and quantity composites: MO, CP and CQ.

use crate::error::{Hl7Error, Hl7Result};
use crate::types::macros::composite;
use crate::types::{Ce, Id, Nm};

composite! {
    /// Money (MO): a quantity and a denomination code.
    #[derive(PartialEq)]
    pub struct Mo {
        1: quantity: Nm,
        2: denomination: Id,
    }
}

impl Mo {
    /// Build an amount in a denomination.
    pub fn from_amount(quantity: impl Into<String>, denomination: impl Into<String>) -> Self {
        Self {
            quantity: Some(Nm::new(quantity)),
            denomination: Some(Id::new(denomination)),
        }
    }

    /// The amount as exact integer hundredths (pennies for USD).
    ///
    /// Conversion shifts the decimal point on the literal digit string.
    /// Multiplying the parsed float by 100 is off by one cent for amounts
    /// like `36.67`, so the float path is never taken. A third and further
    /// fractional digit is truncated.
    ///
    /// # Errors
    ///
    /// Same contract as [`Nm::to_f64`]: a malformed quantity raises a
    /// `Conversion` error under the strict policy and yields `Ok(None)`
    /// under the lax policy.
    pub fn to_pennies(&self) -> Hl7Result<Option<i64>> {
        let Some(quantity) = &self.quantity else {
            return Ok(None);
        };
        let text = quantity.value().trim();
        if text.is_empty() {
            return Ok(None);
        }
        match pennies_from_decimal(text) {
            Some(v) => Ok(Some(v)),
            None if quantity.is_lax() => Ok(None),
            None => Err(Hl7Error::conversion(format!(
                "not a valid MO quantity: {:?}",
                quantity.value()
            ))),
        }
    }

    /// The quantity as a float, for callers that can tolerate rounding.
    pub fn to_f64(&self) -> Hl7Result<Option<f64>> {
        match &self.quantity {
            Some(q) => q.to_f64(),
            None => Ok(None),
        }
    }
}

/// Decimal-string to hundredths by digit shifting.
fn pennies_from_decimal(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, f),
        None => (unsigned, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().all(|b| b.is_ascii_digit())
        || !frac_part.bytes().all(|b| b.is_ascii_digit())
    {
        return None;
    }
    let mut digits = String::with_capacity(int_part.len() + 2);
    digits.push_str(int_part);
    let mut frac = frac_part.chars();
    digits.push(frac.next().unwrap_or('0'));
    digits.push(frac.next().unwrap_or('0'));
    let magnitude: i64 = digits.parse().ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

composite! {
    /// Composite price (CP).
    #[derive(PartialEq)]
    pub struct Cp {
        1: price: Mo,
        2: price_type: Id,
        3: from_value: Nm,
        4: to_value: Nm,
        5: range_units: Ce,
        6: range_type: Id,
    }
}

composite! {
    /// Composite quantity with units (CQ).
    #[derive(PartialEq)]
    pub struct Cq {
        1: quantity: Nm,
        2: units: Ce,
    }
}
