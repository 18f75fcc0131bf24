// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Horizontal tab stops.
//!
//! Default stops every 8 columns; HTS (`ESC H`) sets one at the cursor, TBC
//! (`CSI g`) clears one or all.

use crate::{ColIndex, Length};

pub const DEFAULT_TAB_INTERVAL: u16 = 8;

#[derive(Clone, Debug)]
pub struct TabStops {
    stops: Vec<bool>,
}

impl TabStops {
    #[must_use]
    pub fn new(cols: Length) -> Self {
        let stops = (0..cols.as_usize())
            .map(|x| x % DEFAULT_TAB_INTERVAL as usize == 0 && x != 0)
            .collect();
        Self { stops }
    }

    /// Rebuild for a new width, reapplying the default interval.
    pub fn resize(&mut self, cols: Length) {
        *self = Self::new(cols);
    }

    pub fn set(&mut self, x: ColIndex) {
        if let Some(stop) = self.stops.get_mut(x.as_usize()) {
            *stop = true;
        }
    }

    pub fn clear(&mut self, x: ColIndex) {
        if let Some(stop) = self.stops.get_mut(x.as_usize()) {
            *stop = false;
        }
    }

    pub fn clear_all(&mut self) {
        self.stops.fill(false);
    }

    /// The next stop strictly right of `x`, or the last column.
    #[must_use]
    pub fn next_stop(&self, x: ColIndex) -> ColIndex {
        let last = self.stops.len().saturating_sub(1);
        for candidate in (x.as_usize() + 1)..self.stops.len() {
            if self.stops[candidate] {
                return ColIndex::from(candidate);
            }
        }
        ColIndex::from(last)
    }

    /// The previous stop strictly left of `x`, or column 0.
    #[must_use]
    pub fn previous_stop(&self, x: ColIndex) -> ColIndex {
        for candidate in (0..x.as_usize()).rev() {
            if self.stops[candidate] {
                return ColIndex::from(candidate);
            }
        }
        ColIndex(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{col, len};

    #[test]
    fn test_default_stops_every_eight() {
        let stops = TabStops::new(len(40_usize));
        assert_eq!(stops.next_stop(col(0)), col(8));
        assert_eq!(stops.next_stop(col(8)), col(16));
        assert_eq!(stops.next_stop(col(35)), col(39), "clamps to last column");
        assert_eq!(stops.previous_stop(col(20)), col(16));
        assert_eq!(stops.previous_stop(col(8)), col(0));
    }

    #[test]
    fn test_custom_stops() {
        let mut stops = TabStops::new(len(20_usize));
        stops.clear_all();
        stops.set(col(5));
        assert_eq!(stops.next_stop(col(0)), col(5));
        assert_eq!(stops.next_stop(col(5)), col(19));
        stops.clear(col(5));
        assert_eq!(stops.next_stop(col(0)), col(19));
    }
}
