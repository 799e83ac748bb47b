// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Declarative macros shared across the workspace.

/// Tie each unit variant of a `Copy` enum to its wire name.
///
/// Generates `as_str()`, the inverse `from_wire()` and a `Display` impl from a
/// single table, so the two directions cannot drift apart.
///
/// ```ignore
/// bw_core::wire_names! {
///     BatchAction {
///         Stop => "stop",
///         RetryFailed => "retry-failed",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_names {
    ($enum:ident { $( $variant:ident => $wire:literal ),+ $(,)? }) => {
        impl $enum {
            pub fn as_str(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )+
                }
            }

            /// Unknown names yield `None`.
            pub fn from_wire(name: &str) -> Option<Self> {
                match name {
                    $( $wire => Some(Self::$variant), )+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $enum {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

/// Generate by-value setter methods inside an existing `impl` block.
///
/// ```ignore
/// impl CoordinatorConfig {
///     bw_core::setters! {
///         interval: Duration,
///         chunk_size: usize,
///     }
/// }
/// ```
#[macro_export]
macro_rules! setters {
    ( $( $field:ident : $ty:ty ),* $(,)? ) => {
        $(
            pub fn $field(mut self, v: $ty) -> Self {
                self.$field = v;
                self
            }
        )*
    };
}
