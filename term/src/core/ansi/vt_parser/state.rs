// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Machine states of the VT parser.

/// States of the escape sequence recognizer, following the DEC ANSI parser
/// reference (vt100.net) with one addition: [`VtState::Utf8`] collects
/// multi-byte UTF-8 sequences started from [`VtState::Ground`].
///
/// [`VtState::Anywhere`] is a pseudo-state: it never becomes the current
/// state and exists only as the first-consulted row of the transition table
/// (global transitions like `CAN`, `SUB`, `ESC`, and raw `ST`).
///
/// The discriminants index the transition table; keep them dense.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, strum_macros::Display)]
#[repr(u8)]
pub enum VtState {
    #[default]
    Ground = 0,
    Escape = 1,
    EscapeIntermediate = 2,
    CsiEntry = 3,
    CsiParam = 4,
    CsiIntermediate = 5,
    CsiIgnore = 6,
    DcsEntry = 7,
    DcsParam = 8,
    DcsIntermediate = 9,
    DcsPassthrough = 10,
    DcsIgnore = 11,
    OscString = 12,
    SosPmApcString = 13,
    Utf8 = 14,
    Anywhere = 15,
}

/// Number of rows in the transition table ([`VtState::Anywhere`] included).
pub const VT_STATE_COUNT: usize = 16;

impl VtState {
    /// `true` for the states whose entry clears the parameter and
    /// intermediate buffers.
    #[must_use]
    pub const fn clears_on_entry(self) -> bool {
        matches!(self, Self::Escape | Self::CsiEntry | Self::DcsEntry)
    }
}
