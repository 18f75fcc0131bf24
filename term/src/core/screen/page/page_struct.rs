// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`Page`] struct and its cell-level operations.
//!
//! # Reference counting protocol
//!
//! - [`Page::intern_style`] / [`Page::insert_hyperlink`] hand the caller one
//!   reference. Installing the handle into a cell ([`Page::put_cell`],
//!   [`Page::set_hyperlink`]) transfers that reference to the cell.
//! - Clearing or overwriting a cell releases whatever the cell referenced.
//! - [`Page::set_hyperlink`] releases any previously-associated link on the
//!   cell even when it equals the new one, so the caller's reference always
//!   balances.
//!
//! Fast paths may leave counts strictly greater than the number of using
//! cells; [`verify_integrity`] checks `uses ≤ count`, never equality.
//!
//! [`verify_integrity`]: Page::verify_integrity

use super::{Cell, CellContent, DirtyRows, GraphemeStorage, HyperlinkData,
            HyperlinkId, HyperlinkMap, HyperlinkSet, PageCapacity, PageError,
            RefCountedSet, Row, SetError, Style, StyleId, StringArena, Wide};
use crate::{ColIndex, Length, RowIndex, len};

#[derive(Clone, Debug)]
pub struct Page {
    pub(crate) capacity: PageCapacity,
    pub(crate) rows: Vec<Row>,
    pub(crate) cells: Vec<Cell>,
    pub(crate) styles: RefCountedSet<Style>,
    pub(crate) graphemes: GraphemeStorage,
    pub(crate) strings: StringArena,
    pub(crate) hyperlinks: HyperlinkSet,
    pub(crate) hyperlink_map: HyperlinkMap,
    pub(crate) dirty: DirtyRows,
    /// Rows currently in use by the screen (the page list appends rows one
    /// at a time until the page is full).
    pub(crate) live_rows: u16,
}

impl Page {
    /// Allocate a zero-initialized page: every cell blank, rows linked to
    /// their cell ranges.
    #[must_use]
    pub fn new(capacity: PageCapacity) -> Self {
        let rows = (0..capacity.rows)
            .map(|y| Row {
                cells_offset: u32::from(y) * u32::from(capacity.cols),
                ..Row::default()
            })
            .collect();
        Self {
            rows,
            cells: vec![Cell::blank(); capacity.cell_count()],
            styles: RefCountedSet::new(capacity.styles as usize),
            graphemes: GraphemeStorage::new(capacity.grapheme_bytes as usize),
            strings: StringArena::new(capacity.string_bytes as usize),
            hyperlinks: HyperlinkSet::new(capacity.hyperlink_bytes as usize),
            hyperlink_map: HyperlinkMap::new(capacity.hyperlink_bytes as usize),
            dirty: DirtyRows::new(len(capacity.rows)),
            live_rows: 0,
            capacity,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> &PageCapacity { &self.capacity }

    #[must_use]
    pub fn cols(&self) -> Length { len(self.capacity.cols) }

    #[must_use]
    pub fn row_count(&self) -> Length { len(self.capacity.rows) }

    #[must_use]
    pub fn live_rows(&self) -> Length { len(self.live_rows) }

    /// The map key for a grid position.
    #[must_use]
    pub fn cell_offset(&self, y: RowIndex, x: ColIndex) -> u32 {
        debug_assert!(!y.overflows(self.row_count()));
        debug_assert!(!x.overflows(self.cols()));
        u32::from(y.as_u16()) * u32::from(self.capacity.cols) + u32::from(x.as_u16())
    }

    #[must_use]
    pub fn get_row(&self, y: RowIndex) -> &Row {
        debug_assert!(!y.overflows(self.row_count()));
        &self.rows[y.as_usize()]
    }

    pub fn get_row_mut(&mut self, y: RowIndex) -> &mut Row {
        debug_assert!(!y.overflows(self.row_count()));
        self.dirty.mark(y);
        &mut self.rows[y.as_usize()]
    }

    #[must_use]
    pub fn get_cell(&self, y: RowIndex, x: ColIndex) -> &Cell {
        let offset = self.cell_offset(y, x) as usize;
        &self.cells[offset]
    }

    fn cell_mut(&mut self, y: RowIndex, x: ColIndex) -> &mut Cell {
        let offset = self.cell_offset(y, x) as usize;
        &mut self.cells[offset]
    }

    #[must_use]
    pub fn is_dirty(&self, y: RowIndex) -> bool { self.dirty.is_dirty(y) }

    pub fn clear_dirty(&mut self) { self.dirty.clear_all(); }

    /// Deep-copy into an equal-capacity page. The result is valid with no
    /// pointer patching (all internal references are offsets) and compares
    /// equal cell-for-cell.
    pub fn clone_into(&self, target: &mut Page) {
        assert_eq!(
            self.capacity, target.capacity,
            "clone_into requires equal capacities"
        );
        target.clone_from(self);
    }

    // ─── styles ───

    /// Intern a style, receiving one reference. The default style is id 0
    /// and is never stored.
    pub fn intern_style(&mut self, style: &Style) -> Result<StyleId, PageError> {
        if style.is_default() {
            return Ok(0);
        }
        self.styles.intern(style).map_err(|e| match e {
            SetError::OutOfMemory => PageError::StyleSetOutOfMemory,
            SetError::NeedsRehash => PageError::StyleSetNeedsRehash,
        })
    }

    pub fn release_style(&mut self, id: StyleId) {
        if id != 0 {
            self.styles.release(id);
        }
    }

    pub fn acquire_style(&mut self, id: StyleId) {
        if id != 0 {
            self.styles.acquire(id);
        }
    }

    #[must_use]
    pub fn style(&self, id: StyleId) -> Option<&Style> { self.styles.get(id) }

    #[must_use]
    pub fn style_ref_count(&self, id: StyleId) -> u32 { self.styles.ref_count(id) }

    /// Rebuild the style index after [`PageError::StyleSetNeedsRehash`].
    pub fn rehash_styles(&mut self) { self.styles.rehash(); }

    // ─── cells ───

    /// Install a cell, releasing whatever the previous occupant referenced.
    /// The new cell must not claim grapheme or hyperlink side state; those
    /// are attached afterwards via [`Page::set_graphemes`] /
    /// [`Page::set_hyperlink`]. The style reference transfers from the
    /// caller.
    pub fn put_cell(&mut self, y: RowIndex, x: ColIndex, cell: Cell) {
        debug_assert!(!cell.content.is_grapheme());
        debug_assert!(!cell.hyperlink);
        self.release_cell_side_state(y, x);
        *self.cell_mut(y, x) = cell;
        let flags = &mut self.rows[y.as_usize()].flags;
        if cell.style_id != 0 {
            flags.set_styled(true);
        }
        self.dirty.mark(y);
    }

    /// Release the style / grapheme / hyperlink references a cell holds,
    /// leaving the cell bits untouched (caller overwrites next).
    fn release_cell_side_state(&mut self, y: RowIndex, x: ColIndex) {
        let offset = self.cell_offset(y, x);
        let cell = self.cells[offset as usize];
        if cell.style_id != 0 {
            self.styles.release(cell.style_id);
        }
        if cell.content.is_grapheme() {
            self.graphemes.clear(offset);
        }
        if cell.hyperlink {
            if let Some(id) = self.hyperlink_map.remove(offset) {
                self.hyperlinks.release(&mut self.strings, id);
            }
        }
    }

    /// Clear cells in `[left, right)` of a row: release their references
    /// and zero them.
    pub fn clear_cells(&mut self, y: RowIndex, left: ColIndex, right: ColIndex) {
        debug_assert!(left.as_usize() <= right.as_usize());
        for x in left.as_u16()..right.as_u16() {
            let x = ColIndex(x);
            self.release_cell_side_state(y, x);
            *self.cell_mut(y, x) = Cell::blank();
        }
        self.dirty.mark(y);
    }

    /// Clear a whole row including its flags and semantic prompt tag.
    pub fn clear_row(&mut self, y: RowIndex) {
        self.clear_cells(y, ColIndex(0), ColIndex(self.capacity.cols));
        let row = &mut self.rows[y.as_usize()];
        row.flags = super::RowFlags::default();
        row.semantic_prompt = super::SemanticPrompt::default();
        self.dirty.mark(y);
    }

    /// Move `count` cells between positions, carrying grapheme and
    /// hyperlink side state along and clearing the source. Source and
    /// destination must be disjoint (different rows, or non-overlapping
    /// ranges in the same row). Style reference counts are untouched: the
    /// reference moves with the cell.
    pub fn move_cells(
        &mut self,
        src_y: RowIndex,
        src_x: ColIndex,
        dst_y: RowIndex,
        dst_x: ColIndex,
        count: usize,
    ) {
        debug_assert!(
            src_y != dst_y
                || src_x.as_usize() + count <= dst_x.as_usize()
                || dst_x.as_usize() + count <= src_x.as_usize(),
            "move_cells ranges overlap"
        );
        for i in 0..count {
            #[allow(clippy::cast_possible_truncation)]
            let step = i as u16;
            let from = self.cell_offset(src_y, src_x.saturating_add(step));
            let to = self.cell_offset(dst_y, dst_x.saturating_add(step));
            // The destination must not leak references.
            self.release_cell_side_state(dst_y, dst_x.saturating_add(step));
            let cell = self.cells[from as usize];
            self.cells[to as usize] = cell;
            self.cells[from as usize] = Cell::blank();
            if cell.content.is_grapheme() {
                self.graphemes.rekey(from, to);
            }
            if cell.hyperlink {
                self.hyperlink_map.rekey(from, to);
            }
        }
        // Destination inherits content-kind flags conservatively.
        let src_flags = self.rows[src_y.as_usize()].flags;
        let dst_flags = &mut self.rows[dst_y.as_usize()].flags;
        if src_flags.grapheme() {
            dst_flags.set_grapheme(true);
        }
        if src_flags.styled() {
            dst_flags.set_styled(true);
        }
        if src_flags.hyperlink() {
            dst_flags.set_hyperlink(true);
        }
        self.dirty.mark(src_y);
        self.dirty.mark(dst_y);
    }

    /// Move a whole row (cells, flags, semantic prompt) to another row of
    /// the same page, clearing the source. The destination's previous
    /// contents are released.
    pub fn move_row(&mut self, src_y: RowIndex, dst_y: RowIndex) {
        if src_y == dst_y {
            return;
        }
        self.clear_cells(dst_y, ColIndex(0), ColIndex(self.capacity.cols));
        self.move_cells(src_y, ColIndex(0), dst_y, ColIndex(0),
                        self.capacity.cols as usize);
        let src_row = self.rows[src_y.as_usize()];
        let dst_row = &mut self.rows[dst_y.as_usize()];
        dst_row.flags = src_row.flags;
        dst_row.semantic_prompt = src_row.semantic_prompt;
        let src_row = &mut self.rows[src_y.as_usize()];
        src_row.flags = super::RowFlags::default();
        src_row.semantic_prompt = super::SemanticPrompt::default();
        self.dirty.mark(src_y);
        self.dirty.mark(dst_y);
    }

    /// Swap two cells including grapheme and hyperlink side state. Style
    /// reference counts are invariant under a swap and are not touched.
    pub fn swap_cells(
        &mut self,
        a_y: RowIndex,
        a_x: ColIndex,
        b_y: RowIndex,
        b_x: ColIndex,
    ) {
        let a = self.cell_offset(a_y, a_x);
        let b = self.cell_offset(b_y, b_x);
        if a == b {
            return;
        }
        self.cells.swap(a as usize, b as usize);
        self.graphemes.swap(a, b);
        self.hyperlink_map.swap(a, b);
        self.dirty.mark(a_y);
        self.dirty.mark(b_y);
    }

    // ─── graphemes ───

    /// Attach extra codepoints to a cell that has none yet; the cell moves
    /// to `CodepointGrapheme`.
    pub fn set_graphemes(
        &mut self,
        y: RowIndex,
        x: ColIndex,
        extra: &[char],
    ) -> Result<(), PageError> {
        let offset = self.cell_offset(y, x);
        let cell = self.cells[offset as usize];
        debug_assert!(
            !cell.content.is_grapheme(),
            "cell already has grapheme data"
        );
        let Some(cp) = cell.content.codepoint() else {
            debug_assert!(false, "grapheme data on a bg-only cell");
            return Ok(());
        };
        self.graphemes.set(offset, extra)?;
        self.cells[offset as usize].content = CellContent::CodepointGrapheme(cp);
        self.rows[y.as_usize()].flags.set_grapheme(true);
        self.dirty.mark(y);
        Ok(())
    }

    /// Append one extra codepoint, promoting the cell to
    /// `CodepointGrapheme` on first use.
    pub fn append_grapheme(
        &mut self,
        y: RowIndex,
        x: ColIndex,
        cp: char,
    ) -> Result<(), PageError> {
        let offset = self.cell_offset(y, x);
        let cell = self.cells[offset as usize];
        let Some(base) = cell.content.codepoint() else {
            debug_assert!(false, "grapheme data on a bg-only cell");
            return Ok(());
        };
        self.graphemes.append(offset, cp)?;
        self.cells[offset as usize].content = CellContent::CodepointGrapheme(base);
        self.rows[y.as_usize()].flags.set_grapheme(true);
        self.dirty.mark(y);
        Ok(())
    }

    /// Free a cell's extra codepoints and revert it to plain `Codepoint`.
    pub fn clear_grapheme(&mut self, y: RowIndex, x: ColIndex) {
        let offset = self.cell_offset(y, x);
        let cell = self.cells[offset as usize];
        if let CellContent::CodepointGrapheme(cp) = cell.content {
            self.graphemes.clear(offset);
            self.cells[offset as usize].content = CellContent::Codepoint(cp);
            self.dirty.mark(y);
        }
    }

    /// The extra codepoints of a grapheme cell.
    #[must_use]
    pub fn lookup_grapheme(&self, y: RowIndex, x: ColIndex) -> Option<&[u32]> {
        self.graphemes.get(self.cell_offset(y, x))
    }

    // ─── hyperlinks ───

    /// Intern a hyperlink, receiving one reference.
    pub fn insert_hyperlink(
        &mut self,
        link: HyperlinkData<'_>,
    ) -> Result<HyperlinkId, PageError> {
        self.hyperlinks.intern(&mut self.strings, link)
    }

    pub fn acquire_hyperlink(&mut self, id: HyperlinkId) {
        self.hyperlinks.acquire(id);
    }

    pub fn release_hyperlink(&mut self, id: HyperlinkId) {
        self.hyperlinks.release(&mut self.strings, id);
    }

    /// Rebuild the hyperlink index after
    /// [`PageError::HyperlinkSetNeedsRehash`].
    pub fn rehash_hyperlinks(&mut self) { self.hyperlinks.rehash(&self.strings); }

    /// Associate a hyperlink handle with a cell, transferring the caller's
    /// reference. Any previous association on the cell is released first,
    /// even if it equals the new one, so caller references always balance.
    pub fn set_hyperlink(
        &mut self,
        y: RowIndex,
        x: ColIndex,
        id: HyperlinkId,
    ) -> Result<(), PageError> {
        let offset = self.cell_offset(y, x);
        // Install first: a failed insert must leave the cell untouched.
        let previous = self.hyperlink_map.insert(offset, id)?;
        if let Some(previous) = previous {
            self.hyperlinks.release(&mut self.strings, previous);
        }
        self.cells[offset as usize].hyperlink = true;
        self.rows[y.as_usize()].flags.set_hyperlink(true);
        self.dirty.mark(y);
        Ok(())
    }

    /// Drop a cell's hyperlink association.
    pub fn clear_hyperlink(&mut self, y: RowIndex, x: ColIndex) {
        let offset = self.cell_offset(y, x);
        if let Some(id) = self.hyperlink_map.remove(offset) {
            self.hyperlinks.release(&mut self.strings, id);
        }
        self.cells[offset as usize].hyperlink = false;
        self.dirty.mark(y);
    }

    #[must_use]
    pub fn lookup_hyperlink(&self, y: RowIndex, x: ColIndex) -> Option<HyperlinkId> {
        self.hyperlink_map.get(self.cell_offset(y, x))
    }

    #[must_use]
    pub fn hyperlink_data(&self, id: HyperlinkId) -> Option<HyperlinkData<'_>> {
        self.hyperlinks.get(&self.strings, id)
    }

    // ─── cross-page row copies ───

    /// Copy one row from another page, reinterning styles and hyperlinks
    /// into this page's sets. Column counts may differ:
    ///
    /// - shrinking truncates cells past the new width and blanks a wide
    ///   cell whose spacer tail no longer fits;
    /// - growing fills with blanks and clears the now-obsolete spacer-head
    ///   marker at the old last column.
    pub fn clone_row_from(
        &mut self,
        src: &Page,
        src_y: RowIndex,
        dst_y: RowIndex,
    ) -> Result<(), PageError> {
        self.clear_row(dst_y);

        let src_cols = src.capacity.cols;
        let dst_cols = self.capacity.cols;
        let copy_cols = src_cols.min(dst_cols);

        for x in 0..copy_cols {
            let x = ColIndex(x);
            let mut cell = *src.get_cell(src_y, x);

            // Growing: a spacer head at the old last column is obsolete.
            if dst_cols > src_cols
                && cell.wide == Wide::SpacerHead
                && x.as_u16() == src_cols - 1
            {
                cell = Cell::blank();
            }
            // Shrinking: a wide cell at the new last column lost its tail.
            if dst_cols < src_cols
                && cell.wide == Wide::Wide
                && x.as_u16() == dst_cols - 1
            {
                cell = Cell::blank();
            }

            // Rewrite the style handle into this page's set.
            if cell.style_id != 0 {
                let style = *src.style(cell.style_id).unwrap_or(&Style::default());
                cell.style_id = self.intern_style(&style)?;
            }

            let had_grapheme = cell.content.is_grapheme();
            let had_hyperlink = cell.hyperlink;
            if had_grapheme {
                // Re-attach below through the normal path.
                if let Some(cp) = cell.content.codepoint() {
                    cell.content = CellContent::Codepoint(cp);
                }
            }
            cell.hyperlink = false;
            self.put_cell(dst_y, x, cell);

            if had_grapheme {
                if let Some(extra) = src.lookup_grapheme(src_y, x) {
                    let chars: smallvec::SmallVec<[char; 4]> = extra
                        .iter()
                        .filter_map(|&cp| char::from_u32(cp))
                        .collect();
                    self.set_graphemes(dst_y, x, &chars)?;
                }
            }
            if had_hyperlink {
                if let Some(src_id) = src.lookup_hyperlink(src_y, x) {
                    if let Some(link) = src.hyperlink_data(src_id) {
                        let new_id = self.insert_hyperlink(link)?;
                        self.set_hyperlink(dst_y, x, new_id)?;
                    }
                }
            }
        }

        let src_row = src.get_row(src_y);
        let dst_row = &mut self.rows[dst_y.as_usize()];
        dst_row.semantic_prompt = src_row.semantic_prompt;
        dst_row.flags.set_wrap(src_row.flags.wrap());
        dst_row
            .flags
            .set_wrap_continuation(src_row.flags.wrap_continuation());
        self.dirty.mark(dst_y);
        Ok(())
    }
}
