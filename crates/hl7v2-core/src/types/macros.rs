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

//! Schema-descriptor macros for the data-type catalog.
//!
//! A composite type is fully described by its ordered position table, so
//! the positional decode (stop when the span is exhausted) and encode
//! (trailing truncation) walks are generated from that table instead of
//! being duplicated per type.

/// Declare a composite data type from its positional schema.
///
/// Generates the struct (every position an `Option`), the null-propagating
/// `new` factory, and the [`FromPiped`](crate::types::FromPiped) /
/// [`ToPiped`](crate::types::ToPiped) implementations.
///
/// Decoding stops silently the moment the scanned span is exhausted; all
/// remaining positions keep `None`. Truncated fields are the normal shape
/// of real-world messages, not an error.
macro_rules! composite {
    (
        $(#[$meta:meta])*
        pub struct $name:ident {
            $(
                $(#[$fmeta:meta])* $pos:literal : $field:ident : $child:ty
            ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            $(
                $(#[$fmeta])*
                pub $field: Option<$child>,
            )+
        }

        impl $name {
            /// Build a value from optional parts, propagating absence:
            /// returns `None` when every argument is `None`, so a caller
            /// assembling a field from optional source data never needs a
            /// pre-check.
            #[allow(clippy::too_many_arguments)]
            pub fn new( $( $field: Option<$child> ),+ ) -> Option<Self> {
                if $( $field.is_none() )&&+ {
                    return None;
                }
                Some(Self { $( $field ),+ })
            }
        }

        impl $crate::types::FromPiped for $name {
            fn parse_piped(
                d: &$crate::Delimiters,
                line: &str,
                span: $crate::wire::Span,
                level: $crate::types::Level,
            ) -> $crate::Hl7Result<Option<Self>> {
                if span.is_empty() {
                    return Ok(None);
                }
                let mut sc = $crate::wire::TokenScanner::new(
                    line,
                    span,
                    level.child_separator(d),
                    d.escape(),
                );
                let node = Self {
                    $(
                        $field: match sc.next_span() {
                            Some(sp) => <$child as $crate::types::FromPiped>::parse_piped(
                                d, line, sp, level.child(),
                            )?,
                            None => None,
                        },
                    )+
                };
                // Content past the last schema position is a structural
                // violation; trailing empty tokens are tolerated. The
                // caller (message layer) decides recoverability.
                while let Some(extra) = sc.next_span() {
                    if !extra.is_empty() {
                        return Err($crate::Hl7Error::structure(format!(
                            "unexpected content past the last {} component",
                            stringify!($name),
                        ))
                        .with_line(line)
                        .with_position(extra.start));
                    }
                }
                Ok(Some(node))
            }
        }

        impl $crate::types::ToPiped for $name {
            fn to_piped(
                &self,
                w: &mut $crate::wire::PipeWriter<'_>,
                level: $crate::types::Level,
            ) {
                let mut cw = $crate::wire::ComponentWriter::new(w, level);
                $( cw.put(self.$field.as_ref()); )+
            }

            fn is_piped_empty(&self) -> bool {
                $(
                    self.$field
                        .as_ref()
                        .map_or(true, |v| $crate::types::ToPiped::is_piped_empty(v))
                )&&+
            }
        }
    };
}

/// Declare a single-token string primitive (ST, TX, FT, ID, IS, …).
///
/// The wrapped value is the logical (unescaped) string; escaping is applied
/// on write. An empty span parses to `None` rather than an empty value.
macro_rules! string_primitive {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name(String);

        impl $name {
            /// Wrap a logical string value.
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            /// The logical string value.
            #[inline]
            pub fn value(&self) -> &str {
                &self.0
            }

            /// Consume the wrapper, returning the owned string.
            pub fn into_string(self) -> String {
                self.0
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl $crate::types::FromPiped for $name {
            fn parse_piped(
                d: &$crate::Delimiters,
                line: &str,
                span: $crate::wire::Span,
                _level: $crate::types::Level,
            ) -> $crate::Hl7Result<Option<Self>> {
                let raw = span.slice(line);
                if raw.is_empty() {
                    return Ok(None);
                }
                Ok(Some(Self($crate::wire::unescape(raw, d).into_owned())))
            }
        }

        impl $crate::types::ToPiped for $name {
            fn to_piped(
                &self,
                w: &mut $crate::wire::PipeWriter<'_>,
                _level: $crate::types::Level,
            ) {
                w.push_value(&self.0);
            }

            fn is_piped_empty(&self) -> bool {
                self.0.is_empty()
            }
        }
    };
}

pub(crate) use composite;
pub(crate) use string_primitive;
