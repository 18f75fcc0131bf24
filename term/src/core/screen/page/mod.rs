// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The page: a fixed-capacity, self-contained grid region.
//!
//! A [`Page`] holds a `rows × cols` grid of [`Row`]s and [`Cell`]s plus all
//! the side storage those cells reference: the interned [`Style`] set, the
//! grapheme codepoint arena, the string arena with the hyperlink set, and a
//! dirty bitset. Everything a cell points at is a typed offset into the
//! page's own storage; a page never holds host pointers, so deep copies and
//! host-side serialization need no fixups.
//!
//! Capacity is fixed at creation ([`PageCapacity`]); exhausting any pool
//! surfaces a typed [`PageError`] and leaves the page unchanged, which the
//! screen layer answers by migrating to a larger page.

// Attach sources.
pub mod bitmap_allocator;
pub mod capacity;
pub mod cell;
pub mod dirty_rows;
pub mod errors;
pub mod grapheme_storage;
pub mod hyperlink;
pub mod integrity;
pub mod interning;
pub mod page_struct;
pub mod row;
pub mod string_arena;
pub mod style;

// Re-export.
pub use bitmap_allocator::*;
pub use capacity::*;
pub use cell::*;
pub use dirty_rows::*;
pub use errors::*;
pub use grapheme_storage::*;
pub use hyperlink::*;
pub use integrity::*;
pub use interning::*;
pub use page_struct::*;
pub use row::*;
pub use string_arena::*;
pub use style::*;
