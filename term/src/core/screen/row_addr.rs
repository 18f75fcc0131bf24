// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Row addressing across the four coordinate spaces.
//!
//! The same physical row can be named four ways; mixing them silently is a
//! classic scrollback bug, so conversions go through [`RowAddr`]:
//!
//! - `Screen` - absolute from the top of scrollback.
//! - `Viewport` - relative to the first visible row.
//! - `Active` - relative to the first row of the active area.
//! - `History` - scrollback only (absolute, must be above the active area).
//!
//! Resolution happens in `Screen::resolve_row`; out-of-range addresses are
//! debug assertions there, not runtime errors.

use crate::RowIndex;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum RowAddr {
    Screen(RowIndex),
    Viewport(RowIndex),
    Active(RowIndex),
    History(RowIndex),
}
