// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The page list: history pages plus the active page, forming the logical
//! screen.
//!
//! ```text
//! absolute row 0 ─► ┌───────────────┐
//!                   │ history page  │  (live_rows each, oldest first,
//!                   ├───────────────┤   ring buffer, trimmed per page)
//!                   │ history page  │
//! active_top()  ─►  ├───────────────┤
//!                   │ active page   │  (exactly `screen_rows` rows,
//!                   └───────────────┘   all VT mutations land here)
//! ```
//!
//! The active area is a single dedicated page sized to the screen, so
//! cursor and scroll-region operations never straddle a page boundary. A
//! row leaves the active area only through [`PageList::push_row_to_history`]
//! (scroll-out), which clones it into the tail history page, reinterning
//! styles and hyperlinks into that page's private sets.
//!
//! Absolute row numbers are stable under scroll-out (the pushed row keeps
//! its index; the remaining active rows take over the vacated ones), so
//! pins only need adjustment when trimming drops the oldest history page.

use super::{Page, PageCapacity, Pin, PinPos, PinRegistry};
use crate::{Cell, ColIndex, Length, Row, RowIndex, len};
use crate::GapRingBuffer;

/// Where the viewport sits.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum Viewport {
    /// Pinned to the active area; follows new output.
    #[default]
    Bottom,
    /// Anchored at an absolute top row (scrolled back).
    Offset(usize),
}

/// Scroll requests, as the screen exposes them.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Scroll {
    /// Jump to the top of scrollback.
    Top,
    /// Jump to (and follow) the active area.
    Bottom,
    /// Relative scroll. Scrolling down past the bottom grows blank rows,
    /// reclaiming the oldest history once the bound is exceeded.
    Delta(isize),
    /// Relative scroll that clamps at the bottom and never grows.
    DeltaNoGrow(isize),
}

#[derive(Debug)]
pub struct PageList {
    history: GapRingBuffer<Page>,
    active: Page,
    /// Capacity template for history pages.
    page_capacity: PageCapacity,
    screen_rows: Length,
    screen_cols: Length,
    max_history_rows: usize,
    /// Total live rows across history pages.
    history_rows: usize,
    viewport: Viewport,
    pub(crate) pins: PinRegistry,
}

impl PageList {
    #[must_use]
    pub fn new(
        page_capacity: PageCapacity,
        cols: Length,
        rows: Length,
        max_history_rows: usize,
    ) -> Self {
        let active = Page::new(Self::active_capacity(page_capacity, cols, rows));
        let history_pages =
            max_history_rows.div_ceil((page_capacity.rows as usize).max(1)) + 1;
        Self {
            history: GapRingBuffer::new(history_pages),
            active,
            page_capacity,
            screen_rows: rows,
            screen_cols: cols,
            max_history_rows,
            history_rows: 0,
            viewport: Viewport::Bottom,
            pins: PinRegistry::default(),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn active_capacity(
        template: PageCapacity,
        cols: Length,
        rows: Length,
    ) -> PageCapacity {
        PageCapacity {
            cols: cols.as_usize().min(u16::MAX as usize) as u16,
            rows: rows.as_usize().min(u16::MAX as usize) as u16,
            ..template
        }
    }

    fn history_capacity(&self) -> PageCapacity {
        Self::active_capacity(
            self.page_capacity,
            self.screen_cols,
            len(self.page_capacity.rows),
        )
    }

    // ─── geometry ───

    #[must_use]
    pub fn cols(&self) -> Length { self.screen_cols }

    #[must_use]
    pub fn screen_rows(&self) -> Length { self.screen_rows }

    #[must_use]
    pub fn history_rows(&self) -> Length { len(self.history_rows) }

    #[must_use]
    pub fn total_rows(&self) -> Length { len(self.history_rows) + self.screen_rows }

    /// Absolute row of the first active row.
    #[must_use]
    pub fn active_top(&self) -> RowIndex { RowIndex::from(self.history_rows) }

    #[must_use]
    pub fn active_page(&self) -> &Page { &self.active }

    pub fn active_page_mut(&mut self) -> &mut Page { &mut self.active }

    /// Resolve an absolute row to its page and page-local row.
    #[must_use]
    pub fn locate(&self, abs: RowIndex) -> (&Page, RowIndex) {
        let abs = abs.as_usize();
        if abs >= self.history_rows {
            let local = abs - self.history_rows;
            debug_assert!(local < self.screen_rows.as_usize(), "row out of range");
            return (&self.active, RowIndex::from(local));
        }
        let mut remaining = abs;
        for page in &self.history {
            let live = page.live_rows().as_usize();
            if remaining < live {
                return (page, RowIndex::from(remaining));
            }
            remaining -= live;
        }
        unreachable!("history_rows is out of sync with page contents")
    }

    #[must_use]
    pub fn get_cell(&self, abs: RowIndex, x: ColIndex) -> &Cell {
        let (page, local) = self.locate(abs);
        page.get_cell(local, x)
    }

    #[must_use]
    pub fn get_row(&self, abs: RowIndex) -> &Row {
        let (page, local) = self.locate(abs);
        page.get_row(local)
    }

    // ─── pins ───

    pub fn track_pin(&mut self, pos: PinPos) -> Pin { self.pins.track(pos) }

    // ─── scroll-out and trimming ───

    /// Clone one active row into history (the scroll-out half of a
    /// full-screen scroll; the caller shifts the active rows afterwards).
    /// Trims the oldest history page when the bound is exceeded.
    pub fn push_row_to_history(&mut self, active_row: RowIndex) {
        if self.max_history_rows == 0 {
            return;
        }
        let needs_new_page = match self.history.last() {
            Some(page) => {
                page.live_rows().as_usize() >= page.row_count().as_usize()
            }
            None => true,
        };
        if needs_new_page {
            if self.history.is_full() {
                self.drop_oldest_history_page();
            }
            self.history.add(Page::new(self.history_capacity()));
        }
        let active = &self.active;
        if let Some(tail) = self.history.last_mut() {
            let dst = RowIndex::from(tail.live_rows().as_usize());
            // History pages get their capacity row count; cloning cannot
            // fail on fresh rows unless a single row exceeds the page's
            // pools, which the equal-capacity template prevents.
            if let Err(error) = tail.clone_row_from(active, active_row, dst) {
                tracing::warn!("scrollback: dropping row on clone failure: {error}");
                tail.clear_row(dst);
            }
            tail.live_rows += 1;
            self.history_rows += 1;
        }
        while self.history_rows > self.max_history_rows {
            self.drop_oldest_history_page();
        }
    }

    fn drop_oldest_history_page(&mut self) {
        let Some(oldest) = self.history.first() else {
            return;
        };
        let trimmed = oldest.live_rows().as_usize();
        self.history.delete_oldest(1);
        self.history_rows -= trimmed;
        self.pins.on_rows_trimmed(trimmed);
        if let Viewport::Offset(offset) = self.viewport {
            self.viewport = Viewport::Offset(offset.saturating_sub(trimmed));
        }
    }

    // ─── viewport ───

    #[must_use]
    pub fn viewport(&self) -> Viewport { self.viewport }

    /// Absolute row of the first visible row.
    #[must_use]
    pub fn viewport_top(&self) -> RowIndex {
        match self.viewport {
            Viewport::Bottom => self.active_top(),
            Viewport::Offset(offset) => {
                RowIndex::from(offset.min(self.active_top().as_usize()))
            }
        }
    }

    pub fn scroll(&mut self, scroll: Scroll) {
        match scroll {
            Scroll::Top => self.viewport = Viewport::Offset(0),
            Scroll::Bottom => self.viewport = Viewport::Bottom,
            Scroll::Delta(delta) => {
                let at_bottom = matches!(self.viewport, Viewport::Bottom);
                let current = self.viewport_top().as_usize();
                let target = current.saturating_add_signed(delta);
                let max = self.active_top().as_usize();
                if target >= max {
                    // Scrolling down while already at the bottom grows
                    // blank rows (bounded by the history trim); catching
                    // back up from history just lands on the bottom.
                    if at_bottom {
                        for _ in 0..(target - max) {
                            self.grow_one_blank_row();
                        }
                    }
                    self.viewport = Viewport::Bottom;
                } else {
                    self.viewport = Viewport::Offset(target);
                }
            }
            Scroll::DeltaNoGrow(delta) => {
                let current = self.viewport_top().as_usize();
                let target = current.saturating_add_signed(delta);
                let max = self.active_top().as_usize();
                if target >= max {
                    self.viewport = Viewport::Bottom;
                } else {
                    self.viewport = Viewport::Offset(target);
                }
            }
        }
    }

    /// Scroll the whole active area up one row, growing a blank bottom row.
    pub fn grow_one_blank_row(&mut self) {
        self.push_row_to_history(RowIndex(0));
        let rows = self.screen_rows.as_usize();
        for y in 1..rows {
            self.active
                .move_row(RowIndex::from(y), RowIndex::from(y - 1));
        }
        self.active.clear_row(RowIndex::from(rows - 1));
    }

    /// Drop all history (ED 3). Pins into history clamp to the new top.
    pub fn clear_history(&mut self) {
        let trimmed = self.history_rows;
        self.history.clear();
        self.history_rows = 0;
        self.pins.on_rows_trimmed(trimmed);
        self.viewport = Viewport::Bottom;
    }

    // ─── resize ───

    /// Change the screen geometry. Rows shrink by pushing the topmost
    /// active rows into history and grow by pulling them back; column
    /// changes rebuild every page at the new width (truncate / pad per the
    /// row-copy rules; soft-wrapped lines are not re-flowed).
    pub fn resize(&mut self, new_cols: Length, new_rows: Length) {
        // Row count first, at the old width.
        let old_rows = self.screen_rows.as_usize();
        let new_row_count = new_rows.as_usize();
        if new_row_count < old_rows {
            // Push the topmost rows out, shifting the rest up, then rebuild
            // the active page at the smaller height.
            for _ in 0..(old_rows - new_row_count) {
                self.push_row_to_history(RowIndex(0));
                for y in 1..old_rows {
                    self.active
                        .move_row(RowIndex::from(y), RowIndex::from(y - 1));
                }
                self.active.clear_row(RowIndex::from(old_rows - 1));
            }
            let shrunk =
                Self::active_capacity(self.page_capacity, self.screen_cols,
                                      new_rows);
            let mut smaller = Page::new(shrunk);
            for y in 0..new_row_count {
                let y = RowIndex::from(y);
                if let Err(error) = smaller.clone_row_from(&self.active, y, y) {
                    tracing::warn!("resize: dropping row content: {error}");
                }
            }
            self.active = smaller;
            self.screen_rows = new_rows;
        } else if new_row_count > old_rows {
            let grow_by = new_row_count - old_rows;
            let pull_back = grow_by.min(self.history_rows);
            let grown = Self::active_capacity(self.page_capacity, self.screen_cols,
                                              new_rows);
            let mut bigger = Page::new(grown);
            // Pulled-back history rows land at the top, previous active
            // rows after them, blanks at the bottom.
            for i in 0..pull_back {
                let abs = RowIndex::from(self.history_rows - pull_back + i);
                let (page, local) = self.locate(abs);
                if let Err(error) =
                    bigger.clone_row_from(page, local, RowIndex::from(i))
                {
                    tracing::warn!("resize: dropping row content: {error}");
                }
            }
            for y in 0..old_rows {
                let dst = RowIndex::from(pull_back + y);
                if let Err(error) =
                    bigger.clone_row_from(&self.active, RowIndex::from(y), dst)
                {
                    tracing::warn!("resize: dropping row content: {error}");
                }
            }
            self.active = bigger;
            self.remove_newest_history_rows(pull_back);
            self.screen_rows = new_rows;
        }

        // Column change: rebuild every page at the new width.
        if new_cols != self.screen_cols {
            self.screen_cols = new_cols;
            let rebuilt_active = {
                let capacity = Self::active_capacity(self.page_capacity, new_cols,
                                                     self.screen_rows);
                let mut page = Page::new(capacity);
                for y in 0..self.screen_rows.as_usize() {
                    let y = RowIndex::from(y);
                    if let Err(error) = page.clone_row_from(&self.active, y, y) {
                        tracing::warn!("resize: dropping row content: {error}");
                    }
                }
                page
            };
            self.active = rebuilt_active;

            let mut rebuilt = GapRingBuffer::new(self.history.capacity().as_usize());
            for old_page in &self.history {
                let mut page = Page::new(self.history_capacity());
                for y in 0..old_page.live_rows().as_usize() {
                    let y = RowIndex::from(y);
                    if let Err(error) = page.clone_row_from(old_page, y, y) {
                        tracing::warn!("resize: dropping row content: {error}");
                    }
                    page.live_rows += 1;
                }
                rebuilt.add(page);
            }
            self.history = rebuilt;
        }
    }

    /// Drop the newest `count` rows from the history tail (they were pulled
    /// back into the active area).
    fn remove_newest_history_rows(&mut self, count: usize) {
        let mut remaining = count;
        while remaining > 0 {
            let Some(tail) = self.history.last_mut() else { break };
            let live = tail.live_rows().as_usize();
            let take = live.min(remaining);
            for y in (live - take..live).rev() {
                tail.clear_row(RowIndex::from(y));
            }
            #[allow(clippy::cast_possible_truncation)]
            let take_u16 = take as u16;
            tail.live_rows -= take_u16;
            self.history_rows -= take;
            remaining -= take;
            if tail.live_rows == 0 {
                let _emptied = self.history.remove_newest();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{CellContent, col, row};

    fn capacity(rows: u16) -> PageCapacity {
        PageCapacity {
            cols: 10,
            rows,
            styles: 16,
            grapheme_bytes: 512,
            string_bytes: 512,
            hyperlink_bytes: 512,
        }
    }

    fn list(history_page_rows: u16, max_history: usize) -> PageList {
        PageList::new(
            capacity(history_page_rows),
            len(10_usize),
            len(4_usize),
            max_history,
        )
    }

    fn write_char(pages: &mut PageList, y: u16, text: char) {
        pages.active_page_mut().put_cell(
            row(y),
            col(0),
            crate::Cell {
                content: CellContent::Codepoint(text),
                ..crate::Cell::blank()
            },
        );
    }

    fn char_at(pages: &PageList, abs: RowIndex) -> char {
        pages
            .get_cell(abs, col(0))
            .content
            .codepoint()
            .unwrap_or('\0')
    }

    #[test]
    fn test_scroll_out_preserves_absolute_rows() {
        let mut pages = list(8, 100);
        write_char(&mut pages, 0, 'a');
        write_char(&mut pages, 1, 'b');

        pages.grow_one_blank_row();
        assert_eq!(pages.history_rows(), len(1_usize));
        assert_eq!(pages.total_rows(), len(5_usize));
        // 'a' kept absolute row 0 (now in history), 'b' kept row 1 (active).
        assert_eq!(char_at(&pages, row(0)), 'a');
        assert_eq!(char_at(&pages, row(1)), 'b');
        assert_eq!(pages.active_top(), row(1));
    }

    #[test]
    fn test_history_trims_by_page_and_adjusts_pins() {
        let mut pages = list(2, 2);
        let pin = pages.track_pin(crate::PinPos::new(row(0), col(0)));
        for ch in ['a', 'b', 'c', 'd', 'e'] {
            write_char(&mut pages, 0, ch);
            pages.grow_one_blank_row();
        }
        // History bound is 2 with 2-row pages: the oldest page was dropped.
        assert!(pages.history_rows().as_usize() <= 2);
        // The pin followed its (trimmed) content to the top.
        assert_eq!(pin.get().row, row(0));
    }

    #[test]
    fn test_viewport_scrolling() {
        let mut pages = list(8, 100);
        for ch in ['a', 'b', 'c'] {
            write_char(&mut pages, 0, ch);
            pages.grow_one_blank_row();
        }
        assert_eq!(pages.active_top(), row(3));
        assert_eq!(pages.viewport_top(), row(3));

        pages.scroll(Scroll::Top);
        assert_eq!(pages.viewport_top(), row(0));

        pages.scroll(Scroll::DeltaNoGrow(2));
        assert_eq!(pages.viewport_top(), row(2));

        pages.scroll(Scroll::Delta(-5));
        assert_eq!(pages.viewport_top(), row(0));

        pages.scroll(Scroll::Bottom);
        assert_eq!(pages.viewport_top(), row(3));
        assert_eq!(pages.viewport(), Viewport::Bottom);
    }

    #[test]
    fn test_delta_past_bottom_grows_rows() {
        let mut pages = list(8, 100);
        write_char(&mut pages, 0, 'x');
        let before = pages.total_rows();
        pages.scroll(Scroll::Delta(2));
        assert_eq!(pages.total_rows(), before + len(2_usize));
        assert_eq!(pages.viewport(), Viewport::Bottom);

        // The no-grow variant clamps instead.
        let frozen = pages.total_rows();
        pages.scroll(Scroll::DeltaNoGrow(10));
        assert_eq!(pages.total_rows(), frozen);
    }

    #[test]
    fn test_resize_shrink_rows_pushes_to_history() {
        let mut pages = list(8, 100);
        for (y, ch) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            write_char(&mut pages, y as u16, ch);
        }
        pages.resize(len(10_usize), len(2_usize));
        assert_eq!(pages.screen_rows(), len(2_usize));
        assert_eq!(pages.history_rows(), len(2_usize));
        // Content order is unchanged across the split.
        for (y, ch) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            assert_eq!(char_at(&pages, RowIndex::from(y)), ch);
        }
    }

    #[test]
    fn test_resize_grow_rows_pulls_back_history() {
        let mut pages = list(8, 100);
        for (y, ch) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            #[allow(clippy::cast_possible_truncation)]
            write_char(&mut pages, y as u16, ch);
        }
        pages.resize(len(10_usize), len(2_usize));
        pages.resize(len(10_usize), len(4_usize));
        assert_eq!(pages.screen_rows(), len(4_usize));
        assert_eq!(pages.history_rows(), len(0_usize));
        for (y, ch) in ['a', 'b', 'c', 'd'].into_iter().enumerate() {
            assert_eq!(char_at(&pages, RowIndex::from(y)), ch);
        }
    }

    #[test]
    fn test_resize_cols_truncates_and_pads() {
        let mut pages = list(8, 100);
        write_char(&mut pages, 0, 'q');
        pages.resize(len(5_usize), len(4_usize));
        assert_eq!(pages.cols(), len(5_usize));
        assert_eq!(char_at(&pages, pages.active_top()), 'q');
        pages.resize(len(20_usize), len(4_usize));
        assert_eq!(char_at(&pages, pages.active_top()), 'q');
    }
}
