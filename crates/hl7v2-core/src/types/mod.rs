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

//! The HL7 data-type catalog.
//!
//! Every type implements two small traits at the seams: [`FromPiped`]
//! (decode from a token span) and [`ToPiped`] (write with level-aware
//! delimiter padding). The scanner and escaping engine are free functions
//! in [`wire`](crate::wire), not inherited behavior.
//!
//! Composite schemas are positional: a value at a given delimiter level
//! splits into children one level down, and a child's meaning is determined
//! solely by its 1-based index. Decoding a truncated field stops silently;
//! encoding elides trailing absent positions.

pub(crate) mod macros;

mod address;
mod coded;
mod id;
mod location;
mod money;
mod name;
mod primitive;
mod repeat;
mod time;

pub use address::{Sad, Xad};
pub use coded::{Ce, Cne, Cwe, Ei, Hd, Vid};
pub use id::{Cx, Dln};
pub use location::Pl;
pub use money::{Cp, Cq, Mo};
pub use name::{Cn, FamilyName, Xcn, Xpn};
pub use primitive::{Ft, Id, Is, Nm, Si, St, Tx};
pub use repeat::Repeat;
pub use time::{Dr, Dt, Dtm, Tm, Ts};

use crate::delim::Delimiters;
use crate::error::Hl7Result;
use crate::fallback::Ufld;
use crate::wire::{PipeWriter, Span};

/// The delimiter level a value sits at.
///
/// A field-level value splits into components, a component-level value into
/// subcomponents, and a subcomponent-level value cannot split further (the
/// subcomponent floor). Repetitions are not a level: they wrap field-level
/// values and are handled by [`Repeat`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Level {
    /// Directly inside a segment field.
    Field,
    /// One level down: inside a component.
    Component,
    /// The floor: inside a subcomponent.
    Subcomponent,
}

impl Level {
    /// The level children of a value at this level sit at.
    #[inline]
    pub fn child(self) -> Level {
        match self {
            Level::Field => Level::Component,
            Level::Component | Level::Subcomponent => Level::Subcomponent,
        }
    }

    /// The separator between children of a value at this level, or `None`
    /// at the subcomponent floor.
    #[inline]
    pub fn child_separator(self, d: &Delimiters) -> Option<char> {
        match self {
            Level::Field => Some(d.component()),
            Level::Component => Some(d.subcomponent()),
            Level::Subcomponent => None,
        }
    }
}

/// Decode a value from a token span.
///
/// Implementations return `Ok(None)` for an empty span rather than an
/// empty object; absence propagates instead of materializing hollow nodes.
pub trait FromPiped: Sized {
    fn parse_piped(d: &Delimiters, line: &str, span: Span, level: Level) -> Hl7Result<Option<Self>>;
}

/// Write a value in pipe-and-hat form at the given nesting level.
pub trait ToPiped {
    fn to_piped(&self, w: &mut PipeWriter<'_>, level: Level);

    /// Whether the value would render as empty text. Empty values are
    /// treated as absent by the positional writers.
    fn is_piped_empty(&self) -> bool;
}

// Raw logical strings act as schema-less primitives; the fallback
// containers are built on this.
impl FromPiped for String {
    fn parse_piped(
        d: &Delimiters,
        line: &str,
        span: Span,
        _level: Level,
    ) -> Hl7Result<Option<Self>> {
        let raw = span.slice(line);
        if raw.is_empty() {
            return Ok(None);
        }
        Ok(Some(crate::wire::unescape(raw, d).into_owned()))
    }
}

impl ToPiped for String {
    fn to_piped(&self, w: &mut PipeWriter<'_>, _level: Level) {
        w.push_value(self);
    }

    fn is_piped_empty(&self) -> bool {
        self.is_empty()
    }
}

/// Decode a whole field's text as one value of type `T`.
///
/// # Examples
///
/// ```
/// use hl7v2_core::{types::{decode_field, Xpn}, Delimiters};
///
/// let d = Delimiters::default();
/// let name: Xpn = decode_field(&d, "Doe^John^^Jr^Dr").unwrap().unwrap();
/// assert_eq!(name.family.unwrap().surname.unwrap().value(), "Doe");
/// assert!(name.middle.is_none());
/// ```
pub fn decode_field<T: FromPiped>(d: &Delimiters, text: &str) -> Hl7Result<Option<T>> {
    T::parse_piped(d, text, Span::whole(text), Level::Field)
}

/// Render one value as field text.
pub fn encode_field<T: ToPiped>(d: &Delimiters, value: &T) -> String {
    let mut w = PipeWriter::new(d);
    value.to_piped(&mut w, Level::Field);
    w.finish()
}

macro_rules! value_kinds {
    ( $( $(#[$vmeta:meta])* $variant:ident => $ty:ty ),+ $(,)? ) => {
        /// A field value of any catalogued kind.
        ///
        /// This is the closed sum over the data-type catalog used wherever a
        /// field list is heterogeneous; [`Value::Unrecognized`] is the one
        /// open-ended case, carrying structure the typed model does not know.
        #[derive(Debug, Clone, PartialEq)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum Value {
            $( $(#[$vmeta])* $variant($ty), )+
        }

        /// Type tag for [`Value`], used to drive generic decoding.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub enum ValueKind {
            $( $(#[$vmeta])* $variant, )+
        }

        impl Value {
            /// The kind tag of this value.
            pub fn kind(&self) -> ValueKind {
                match self {
                    $( Self::$variant(_) => ValueKind::$variant, )+
                }
            }
        }

        impl ValueKind {
            /// Decode a span as this kind. Returns `None` for an empty span.
            pub fn decode(
                self,
                d: &Delimiters,
                line: &str,
                span: Span,
                level: Level,
            ) -> Hl7Result<Option<Value>> {
                match self {
                    $(
                        Self::$variant => Ok(
                            <$ty as FromPiped>::parse_piped(d, line, span, level)?
                                .map(Value::$variant),
                        ),
                    )+
                }
            }
        }

        impl ToPiped for Value {
            fn to_piped(&self, w: &mut PipeWriter<'_>, level: Level) {
                match self {
                    $( Self::$variant(v) => v.to_piped(w, level), )+
                }
            }

            fn is_piped_empty(&self) -> bool {
                match self {
                    $( Self::$variant(v) => v.is_piped_empty(), )+
                }
            }
        }

        $(
            impl From<$ty> for Value {
                fn from(value: $ty) -> Self {
                    Self::$variant(value)
                }
            }
        )+
    };
}

value_kinds! {
    St => St,
    Tx => Tx,
    Ft => Ft,
    Id => Id,
    Is => Is,
    Nm => Nm,
    Si => Si,
    Dt => Dt,
    Tm => Tm,
    Dtm => Dtm,
    Ts => Ts,
    Dr => Dr,
    Hd => Hd,
    Ce => Ce,
    Cwe => Cwe,
    Cne => Cne,
    Ei => Ei,
    Vid => Vid,
    Cx => Cx,
    Dln => Dln,
    Pl => Pl,
    Sad => Sad,
    Xad => Xad,
    FamilyName => FamilyName,
    Xpn => Xpn,
    Cn => Cn,
    Xcn => Xcn,
    Mo => Mo,
    Cp => Cp,
    Cq => Cq,
    /// Lossless fallback for structure the catalog does not model.
    Unrecognized => Ufld,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d() -> Delimiters {
        Delimiters::default()
    }

    // ==================== Level tests ====================

    #[test]
    fn test_level_child_chain() {
        assert_eq!(Level::Field.child(), Level::Component);
        assert_eq!(Level::Component.child(), Level::Subcomponent);
        assert_eq!(Level::Subcomponent.child(), Level::Subcomponent);
    }

    #[test]
    fn test_level_separators() {
        let d = d();
        assert_eq!(Level::Field.child_separator(&d), Some('^'));
        assert_eq!(Level::Component.child_separator(&d), Some('&'));
        assert_eq!(Level::Subcomponent.child_separator(&d), None);
    }

    // ==================== Value tests ====================

    #[test]
    fn test_value_kind_tag() {
        let v = Value::from(St::from("abc"));
        assert_eq!(v.kind(), ValueKind::St);
    }

    #[test]
    fn test_value_kind_decode() {
        let line = "12.5";
        let v = ValueKind::Nm
            .decode(&d(), line, Span::whole(line), Level::Field)
            .unwrap()
            .unwrap();
        assert_eq!(v.kind(), ValueKind::Nm);
    }

    #[test]
    fn test_value_kind_decode_empty_span_is_none() {
        let v = ValueKind::Xpn
            .decode(&d(), "", Span::new(0, 0), Level::Field)
            .unwrap();
        assert!(v.is_none());
    }

    #[test]
    fn test_value_roundtrip_through_encode_field() {
        let v = Value::from(St::from("a|b"));
        assert_eq!(encode_field(&d(), &v), r"a\F\b");
    }

    // ==================== helper tests ====================

    #[test]
    fn test_decode_field_empty_text_is_none() {
        let parsed: Option<St> = decode_field(&d(), "").unwrap();
        assert!(parsed.is_none());
    }

    #[test]
    fn test_string_roundtrip() {
        let parsed: Option<String> = decode_field(&d(), r"a\F\b").unwrap();
        assert_eq!(parsed.as_deref(), Some("a|b"));
    }
}
