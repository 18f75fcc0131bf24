// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Page capacity knobs and the layout arithmetic behind them.
//!
//! All capacities are fixed at page creation. Changing one dimension under
//! a fixed total budget (notably growing `cols`) is pure arithmetic: the
//! fixed-cost pools are laid out from the end of the budget and the row
//! count is solved from whatever remains.

use serde::{Deserialize, Serialize};

use super::PageError;

/// Nominal size of one packed cell, bytes.
pub const CELL_SIZE_BYTES: usize = 8;
/// Nominal size of one packed row header, bytes.
pub const ROW_SIZE_BYTES: usize = 8;
/// Nominal per-style cost in the style set (value + refcount + index),
/// bytes.
pub const STYLE_SIZE_BYTES: usize = 32;

/// Capacity knobs for one page. Fixed at creation.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct PageCapacity {
    pub cols: u16,
    pub rows: u16,
    /// Maximum distinct styles.
    pub styles: u16,
    /// Byte budget for extra grapheme codepoints.
    pub grapheme_bytes: u32,
    /// Byte budget for the string arena (hyperlink ids and URIs).
    pub string_bytes: u32,
    /// Byte budget for the hyperlink set.
    pub hyperlink_bytes: u32,
}

impl Default for PageCapacity {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            styles: 128,
            grapheme_bytes: 8 * 1024,
            string_bytes: 4 * 1024,
            hyperlink_bytes: 4 * 1024,
        }
    }
}

impl PageCapacity {
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.cols as usize * self.rows as usize
    }

    /// Nominal total size of the backing region this capacity implies:
    /// row headers + cells + the dirty bitset (one bit per row, rounded up
    /// to bytes) + the fixed pools.
    #[must_use]
    pub const fn total_size_bytes(&self) -> usize {
        let rows = self.rows as usize;
        let grid = rows * (ROW_SIZE_BYTES + self.cols as usize * CELL_SIZE_BYTES)
            + rows.div_ceil(8);
        grid + self.fixed_cost_bytes()
    }

    /// Everything that does not scale with the row count.
    #[must_use]
    pub const fn fixed_cost_bytes(&self) -> usize {
        self.styles as usize * STYLE_SIZE_BYTES
            + self.grapheme_bytes as usize
            + self.string_bytes as usize
            + self.hyperlink_bytes as usize
    }

    /// Re-solve this capacity for a new column count under a fixed total
    /// budget: metadata pools keep their sizes, and `rows` becomes the
    /// largest integer satisfying
    /// `rows × (row_header + cols × cell + dirty bit) ≤ available`.
    ///
    /// # Errors
    ///
    /// [`PageError::OutOfMemory`] when not even one row fits.
    pub fn adjust_cols(
        &self,
        new_cols: u16,
        total_budget_bytes: usize,
    ) -> Result<Self, PageError> {
        let available = total_budget_bytes.saturating_sub(self.fixed_cost_bytes());
        // Solve in bits: rows × (row_bits + cols × cell_bits + 1) ≤ bits.
        let available_bits = available * 8;
        let per_row_bits =
            (ROW_SIZE_BYTES + new_cols as usize * CELL_SIZE_BYTES) * 8 + 1;
        let rows = available_bits / per_row_bits;
        if rows == 0 {
            return Err(PageError::OutOfMemory);
        }
        #[allow(clippy::cast_possible_truncation)]
        let rows = rows.min(u16::MAX as usize) as u16;
        Ok(Self {
            cols: new_cols,
            rows,
            ..*self
        })
    }
}
