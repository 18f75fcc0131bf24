// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Recoverable page errors.
//!
//! Every variant here means "this page's capacity is exhausted"; callers
//! recover by allocating a larger page and cloning into it. The rehash
//! variants are deliberately distinct from the out-of-memory ones because
//! the recovery differs: a rehash rebuilds the same-sized table, growth
//! needs a bigger page.

/// Out-of-capacity family surfaced by page operations. The page is left in
/// its prior state (modulo the documented refcount-high fast paths).
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum PageError {
    /// The string arena cannot fit another allocation.
    #[error("string arena exhausted")]
    StringsOutOfMemory,
    /// The style set has no free slot.
    #[error("style set exhausted")]
    StyleSetOutOfMemory,
    /// The style set is clogged with tombstones; rebuild it.
    #[error("style set needs rehash")]
    StyleSetNeedsRehash,
    /// The hyperlink set has no free slot.
    #[error("hyperlink set exhausted")]
    HyperlinkSetOutOfMemory,
    /// The hyperlink set is clogged with tombstones; rebuild it.
    #[error("hyperlink set needs rehash")]
    HyperlinkSetNeedsRehash,
    /// The cell → hyperlink map is at capacity.
    #[error("hyperlink map exhausted")]
    HyperlinkMapOutOfMemory,
    /// The cell → grapheme map is at capacity.
    #[error("grapheme map exhausted")]
    GraphemeMapOutOfMemory,
    /// The grapheme codepoint arena cannot fit another slice.
    #[error("grapheme arena exhausted")]
    GraphemeAllocOutOfMemory,
    /// The page region itself cannot fit even one row at the requested
    /// geometry (capacity re-adjustment).
    #[error("page region exhausted")]
    OutOfMemory,
}
