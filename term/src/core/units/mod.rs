// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Type-safe 0-based grid indices and 1-based lengths.
//!
//! The grid code mixes three kinds of numbers: column positions, row
//! positions, and sizes. Using bare `u16`/`usize` for all three is how
//! off-by-one bugs are born, so each gets its own newtype:
//!
//! - [`ColIndex`] / [`RowIndex`] - 0-based positions, created with [`col`] /
//!   [`row`].
//! - [`Length`] - 1-based size, created with [`len`].
//!
//! The last valid index in a dimension of length `L` is `L - 1`. Arithmetic
//! on indices saturates rather than wrapping; converting an index to the
//! length it implies is [`RowIndex::convert_to_length`].

// Attach sources.
pub mod length;
pub mod row_col;

// Re-export.
pub use length::*;
pub use row_col::*;
