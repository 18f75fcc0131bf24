// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Stable references into the scrolling screen.
//!
//! A [`Pin`] names a screen position (absolute row from the top of
//! scrollback, plus column) and **stays valid while the screen mutates**:
//! when scrollback trimming drops the oldest rows, every live pin shifts
//! with its content (clamping at the top once the content itself is gone).
//!
//! The page list owns a [`PinRegistry`] of weak handles and adjusts live
//! pins on every structural mutation; dropping a [`Pin`] unregisters it
//! implicitly. Selections hold their endpoints this way, which is what
//! keeps a selection anchored to its text while output scrolls.

use std::{cell::RefCell, rc::{Rc, Weak}};

use crate::{ColIndex, RowIndex};

/// A pinned screen position. `row` is absolute from the top of scrollback.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct PinPos {
    pub row: RowIndex,
    pub col: ColIndex,
}

impl PinPos {
    #[must_use]
    pub const fn new(row: RowIndex, col: ColIndex) -> Self { Self { row, col } }
}

/// Shared handle to a tracked position. Cheap to clone; all clones observe
/// the registry's adjustments.
#[derive(Clone, Debug)]
pub struct Pin {
    inner: Rc<RefCell<PinPos>>,
}

impl Pin {
    #[must_use]
    pub fn get(&self) -> PinPos { *self.inner.borrow() }

    pub fn set(&self, pos: PinPos) { *self.inner.borrow_mut() = pos; }
}

impl PartialEq for Pin {
    fn eq(&self, other: &Self) -> bool { self.get() == other.get() }
}

/// The page list's side of pin tracking.
#[derive(Debug, Default)]
pub struct PinRegistry {
    pins: Vec<Weak<RefCell<PinPos>>>,
}

impl PinRegistry {
    /// Start tracking a position.
    pub fn track(&mut self, pos: PinPos) -> Pin {
        let inner = Rc::new(RefCell::new(pos));
        self.pins.push(Rc::downgrade(&inner));
        Pin { inner }
    }

    /// The oldest `trimmed_rows` rows were dropped: shift every live pin up,
    /// clamping pins whose row no longer exists to the new top. Dead weak
    /// handles are pruned on the way.
    pub fn on_rows_trimmed(&mut self, trimmed_rows: usize) {
        self.pins.retain(|weak| {
            let Some(inner) = weak.upgrade() else {
                return false;
            };
            let mut pos = inner.borrow_mut();
            #[allow(clippy::cast_possible_truncation)]
            let delta = trimmed_rows.min(u16::MAX as usize) as u16;
            if pos.row.as_usize() < trimmed_rows {
                // The pinned content itself was trimmed away.
                pos.row = RowIndex(0);
                pos.col = ColIndex(0);
            } else {
                pos.row = pos.row.saturating_sub(delta);
            }
            true
        });
    }

    #[must_use]
    pub fn live_count(&self) -> usize {
        self.pins.iter().filter(|weak| weak.strong_count() > 0).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{col, row};

    #[test]
    fn test_pins_shift_on_trim() {
        let mut registry = PinRegistry::default();
        let pin = registry.track(PinPos::new(row(10), col(3)));
        registry.on_rows_trimmed(4);
        assert_eq!(pin.get(), PinPos::new(row(6), col(3)));
    }

    #[test]
    fn test_pin_clamps_when_content_trimmed() {
        let mut registry = PinRegistry::default();
        let pin = registry.track(PinPos::new(row(2), col(7)));
        registry.on_rows_trimmed(5);
        assert_eq!(pin.get(), PinPos::new(row(0), col(0)));
    }

    #[test]
    fn test_dropped_pins_are_pruned() {
        let mut registry = PinRegistry::default();
        let keep = registry.track(PinPos::new(row(1), col(0)));
        {
            let _drop_me = registry.track(PinPos::new(row(2), col(0)));
        }
        registry.on_rows_trimmed(0);
        assert_eq!(registry.live_count(), 1);
        assert_eq!(keep.get().row, row(1));
    }
}
