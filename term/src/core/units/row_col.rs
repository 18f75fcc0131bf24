// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! 0-based row and column index newtypes.

use std::fmt::Debug;

use super::Length;

/// Generates a 0-based index newtype over `u16` together with its
/// constructor function, conversions, and saturating arithmetic.
macro_rules! generate_index_unit {
    ($(#[$meta:meta])* $name:ident, $ctor:ident) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        pub struct $name(pub u16);

        /// Convenience constructor, equivalent to
        #[doc = concat!("[`", stringify!($name), "::new`].")]
        pub fn $ctor(arg: impl Into<$name>) -> $name { arg.into() }

        impl $name {
            pub fn new(arg: impl Into<$name>) -> Self { arg.into() }

            #[must_use]
            pub const fn as_usize(&self) -> usize { self.0 as usize }

            #[must_use]
            pub const fn as_u16(&self) -> u16 { self.0 }

            /// Add 1 to this 0-based index to get the 1-based [`Length`] that
            /// a component must have for this index to be its last valid
            /// position.
            #[must_use]
            pub const fn convert_to_length(&self) -> Length {
                Length(self.0 as usize + 1)
            }

            #[must_use]
            pub const fn saturating_add(self, delta: u16) -> Self {
                Self(self.0.saturating_add(delta))
            }

            #[must_use]
            pub const fn saturating_sub(self, delta: u16) -> Self {
                Self(self.0.saturating_sub(delta))
            }

            /// `true` when this index addresses a valid position in a
            /// component of the given length.
            #[must_use]
            pub const fn overflows(&self, length: Length) -> bool {
                self.as_usize() >= length.as_usize()
            }

            /// Clamp to the last valid index of the given length. A zero
            /// length clamps to index 0.
            #[must_use]
            #[allow(clippy::cast_possible_truncation)]
            pub fn clamp_to(self, length: Length) -> Self {
                let max = length.as_usize().saturating_sub(1);
                if self.as_usize() > max { Self(max as u16) } else { self }
            }
        }

        impl Debug for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!(stringify!($name), "({})"), self.0)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u16> for $name {
            fn from(value: u16) -> Self { Self(value) }
        }

        impl From<usize> for $name {
            #[allow(clippy::cast_possible_truncation)]
            fn from(value: usize) -> Self {
                Self(value.min(u16::MAX as usize) as u16)
            }
        }

        impl From<i32> for $name {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            fn from(value: i32) -> Self {
                Self(value.clamp(0, i32::from(u16::MAX)) as u16)
            }
        }

        impl std::ops::Add for $name {
            type Output = Self;
            fn add(self, rhs: Self) -> Self { Self(self.0.saturating_add(rhs.0)) }
        }

        impl std::ops::Sub for $name {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self { Self(self.0.saturating_sub(rhs.0)) }
        }

        impl std::ops::AddAssign for $name {
            fn add_assign(&mut self, rhs: Self) { *self = *self + rhs; }
        }

        impl std::ops::SubAssign for $name {
            fn sub_assign(&mut self, rhs: Self) { *self = *self - rhs; }
        }
    };
}

generate_index_unit! {
    /// 0-based column position in a grid row.
    ColIndex, col
}

generate_index_unit! {
    /// 0-based row position in a grid.
    RowIndex, row
}
