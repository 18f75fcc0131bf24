// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Full cross-check of every page invariant.
//!
//! [`Page::verify_integrity`] is for tests and debug builds; a failure is a
//! bug in this crate, never a recoverable condition. It re-derives the
//! relationships the fast paths maintain incrementally:
//!
//! - grapheme cells ↔ grapheme-map entries (both directions);
//! - hyperlink-flagged cells ↔ hyperlink-map entries (both directions);
//! - row content flags cover their cells' content;
//! - style / hyperlink use counts never exceed stored reference counts
//!   (fast paths may leave counts strictly greater, never less);
//! - spacer-cell geometry around wide glyphs.

use rustc_hash::FxHashMap;

use super::{Page, Wide};
use crate::{ColIndex, RowIndex};

/// Everything [`Page::verify_integrity`] can detect. Diagnostic only.
#[derive(Copy, Clone, PartialEq, Eq, Debug, thiserror::Error)]
pub enum PageIntegrityError {
    #[error("page has zero rows")]
    ZeroRowCount,
    #[error("page has zero cols")]
    ZeroColCount,
    #[error("row {row} has a grapheme cell but no grapheme flag")]
    UnmarkedGraphemeRow { row: u16 },
    #[error("cell ({row},{col}) is tagged grapheme but has no data")]
    MissingGraphemeData { row: u16, col: u16 },
    #[error("grapheme entry for cell offset {offset} is empty")]
    InvalidGraphemeCount { offset: u32 },
    #[error("grapheme entry exists for cell offset {offset} without the tag")]
    UnmarkedGraphemeCell { offset: u32 },
    #[error("cell ({row},{col}) references a dead style {style_id}")]
    MissingStyle { row: u16, col: u16, style_id: u16 },
    #[error("row {row} has a styled cell but no styled flag")]
    UnmarkedStyleRow { row: u16 },
    #[error("style {style_id} is used by {uses} cells but counts {count}")]
    MismatchedStyleRef {
        style_id: u16,
        uses: u32,
        count: u32,
    },
    #[error("cell ({row},{col}) has the hyperlink flag but no map entry")]
    MissingHyperlinkData { row: u16, col: u16 },
    #[error("hyperlink {id} is used by {uses} cells but counts {count}")]
    MismatchedHyperlinkRef { id: u16, uses: u32, count: u32 },
    #[error("hyperlink entry exists for cell offset {offset} without the flag")]
    UnmarkedHyperlinkCell { offset: u32 },
    #[error("row {row} has a hyperlink cell but no hyperlink flag")]
    UnmarkedHyperlinkRow { row: u16 },
    #[error("spacer tail at ({row},{col}) has no wide cell to its left")]
    InvalidSpacerTailLocation { row: u16, col: u16 },
    #[error("spacer head at ({row},{col}) is not at the last column")]
    InvalidSpacerHeadLocation { row: u16, col: u16 },
    #[error("spacer head on unwrapped row {row}")]
    UnwrappedSpacerHead { row: u16 },
}

impl Page {
    /// Cross-check all invariants. See the [module docs](self).
    ///
    /// # Errors
    ///
    /// The first violated invariant, as a [`PageIntegrityError`].
    pub fn verify_integrity(&self) -> Result<(), PageIntegrityError> {
        if self.capacity.rows == 0 {
            return Err(PageIntegrityError::ZeroRowCount);
        }
        if self.capacity.cols == 0 {
            return Err(PageIntegrityError::ZeroColCount);
        }

        let mut style_uses: FxHashMap<u16, u32> = FxHashMap::default();

        for y in 0..self.capacity.rows {
            let row = self.get_row(RowIndex(y));
            for x in 0..self.capacity.cols {
                let cell = self.get_cell(RowIndex(y), ColIndex(x));
                let offset = self.cell_offset(RowIndex(y), ColIndex(x));

                if cell.content.is_grapheme() {
                    if self.graphemes.get(offset).is_none() {
                        return Err(PageIntegrityError::MissingGraphemeData {
                            row: y,
                            col: x,
                        });
                    }
                    if !row.flags.grapheme() {
                        return Err(PageIntegrityError::UnmarkedGraphemeRow {
                            row: y,
                        });
                    }
                }

                if cell.style_id != 0 {
                    if self.styles.get(cell.style_id).is_none() {
                        return Err(PageIntegrityError::MissingStyle {
                            row: y,
                            col: x,
                            style_id: cell.style_id,
                        });
                    }
                    if !row.flags.styled() {
                        return Err(PageIntegrityError::UnmarkedStyleRow { row: y });
                    }
                    *style_uses.entry(cell.style_id).or_insert(0) += 1;
                }

                if cell.hyperlink {
                    let Some(id) = self.hyperlink_map.get(offset) else {
                        return Err(PageIntegrityError::MissingHyperlinkData {
                            row: y,
                            col: x,
                        });
                    };
                    if self.hyperlinks.ref_count(id) == 0 {
                        return Err(PageIntegrityError::MissingHyperlinkData {
                            row: y,
                            col: x,
                        });
                    }
                    if !row.flags.hyperlink() {
                        return Err(PageIntegrityError::UnmarkedHyperlinkRow {
                            row: y,
                        });
                    }
                }

                match cell.wide {
                    Wide::SpacerTail => {
                        let left_is_wide = x > 0
                            && self
                                .get_cell(RowIndex(y), ColIndex(x - 1))
                                .wide
                                == Wide::Wide;
                        if !left_is_wide {
                            return Err(
                                PageIntegrityError::InvalidSpacerTailLocation {
                                    row: y,
                                    col: x,
                                },
                            );
                        }
                    }
                    Wide::SpacerHead => {
                        if x != self.capacity.cols - 1 {
                            return Err(
                                PageIntegrityError::InvalidSpacerHeadLocation {
                                    row: y,
                                    col: x,
                                },
                            );
                        }
                        if !row.flags.wrap() {
                            return Err(PageIntegrityError::UnwrappedSpacerHead {
                                row: y,
                            });
                        }
                    }
                    Wide::Narrow | Wide::Wide => {}
                }
            }
        }

        // Reverse direction: every map entry points at a matching cell.
        for (offset, extra) in self.graphemes.iter() {
            if extra.is_empty() {
                return Err(PageIntegrityError::InvalidGraphemeCount { offset });
            }
            if !self.cells[offset as usize].content.is_grapheme() {
                return Err(PageIntegrityError::UnmarkedGraphemeCell { offset });
            }
        }
        let mut hyperlink_uses: FxHashMap<u16, u32> = FxHashMap::default();
        for (offset, id) in self.hyperlink_map.iter() {
            if !self.cells[offset as usize].hyperlink {
                return Err(PageIntegrityError::UnmarkedHyperlinkCell { offset });
            }
            *hyperlink_uses.entry(id).or_insert(0) += 1;
        }

        // Use counts never exceed stored reference counts.
        for (style_id, uses) in style_uses {
            let count = self.styles.ref_count(style_id);
            if uses > count {
                return Err(PageIntegrityError::MismatchedStyleRef {
                    style_id,
                    uses,
                    count,
                });
            }
        }
        for (id, uses) in hyperlink_uses {
            let count = self.hyperlinks.ref_count(id);
            if uses > count {
                return Err(PageIntegrityError::MismatchedHyperlinkRef {
                    id,
                    uses,
                    count,
                });
            }
        }

        Ok(())
    }
}
