// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The [`Screen`]: parser-driven mutation of the page list.
//!
//! # Concurrency contract
//!
//! A screen is single-threaded and not internally synchronized: exactly one
//! reader task owns it and feeds it PTY bytes. Renderers on other tasks
//! work from page snapshots (`Page::clone_into`), never from the live
//! screen. None of the operations here block; actions for byte N are fully
//! applied before byte N+1 is fed.

use super::{CharsetState, Page, PageList, Pin, PinPos, RowAddr, Scroll,
            ScreenEvent, TabStops, Viewport};
use crate::{Cell, ColIndex, DcsHandler, Length, PageCapacity, RowIndex, Style,
            TermConfig, VtAction, VtParser, Wide, len, row, vt_ops};

/// The cursor: position is active-area-relative.
#[derive(Clone, Debug)]
pub struct Cursor {
    pub row: RowIndex,
    pub col: ColIndex,
    /// Set after writing into the last column; the next printable wraps.
    pub pending_wrap: bool,
    /// Current graphic rendition, applied to every written cell.
    pub style: Style,
}

impl Default for Cursor {
    fn default() -> Self {
        Self {
            row: RowIndex(0),
            col: ColIndex(0),
            pending_wrap: false,
            style: Style::default(),
        }
    }
}

/// DECSC/DECRC snapshot.
#[derive(Clone, Debug)]
pub struct SavedCursor {
    pub row: RowIndex,
    pub col: ColIndex,
    pub style: Style,
    pub charsets: CharsetState,
    pub pending_wrap: bool,
}

/// DECSTBM / DECSLRM scroll margins, active-area-relative, inclusive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrollRegion {
    pub top: RowIndex,
    pub bottom: RowIndex,
    pub left: Option<ColIndex>,
    pub right: Option<ColIndex>,
}

/// Terminal modes this layer tracks.
#[derive(Clone, Debug)]
pub struct Modes {
    /// DECAWM (?7): wrap at the right edge. Default on.
    pub autowrap: bool,
    /// DECTCEM (?25): cursor visible. Default on.
    pub cursor_visible: bool,
    /// IRM (4): printed characters shift existing cells right.
    pub insert: bool,
    /// DECOM (?6): cursor addressing is relative to the scroll margins.
    pub origin: bool,
    /// DECLRMM (?69): left/right margins may be set.
    pub left_right_margins: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            autowrap: true,
            cursor_visible: true,
            insert: false,
            origin: false,
            left_right_margins: false,
        }
    }
}

/// An OSC 8 hyperlink currently being written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenHyperlink {
    pub id: Option<String>,
    pub uri: String,
}

#[derive(Debug)]
pub struct Screen {
    pub(crate) config: TermConfig,
    pub(crate) pages: PageList,
    pub(crate) cursor: Cursor,
    pub(crate) saved_cursor: Option<SavedCursor>,
    pub(crate) margins: ScrollRegion,
    pub(crate) tab_stops: TabStops,
    pub(crate) charsets: CharsetState,
    pub(crate) modes: Modes,
    parser: VtParser,
    pub(crate) dcs: DcsHandler,
    pub(crate) current_hyperlink: Option<OpenHyperlink>,
    /// DECSCA: newly written cells get the protection attribute.
    pub(crate) pending_protect: bool,
    pub(crate) title: Option<String>,
    pub(crate) icon: Option<String>,
    pub(crate) pwd: Option<String>,
    pub(crate) mouse_shape: Option<String>,
    pub(crate) last_exit_code: Option<u8>,
    pub(crate) events: Vec<ScreenEvent>,
}

impl Screen {
    #[must_use]
    pub fn new(config: TermConfig) -> Self {
        let cols = len(config.page.cols);
        let rows = len(config.page.rows);
        let pages =
            PageList::new(config.page, cols, rows, config.scrollback_rows);
        let bottom = RowIndex::from(rows.as_usize().saturating_sub(1));
        Self {
            parser: VtParser::new(&config),
            dcs: DcsHandler::new(config.max_bytes),
            pages,
            cursor: Cursor::default(),
            saved_cursor: None,
            margins: ScrollRegion {
                top: RowIndex(0),
                bottom,
                left: None,
                right: None,
            },
            tab_stops: TabStops::new(cols),
            charsets: CharsetState::default(),
            modes: Modes::default(),
            current_hyperlink: None,
            pending_protect: false,
            title: None,
            icon: None,
            pwd: None,
            mouse_shape: None,
            last_exit_code: None,
            events: Vec::new(),
            config,
        }
    }

    // ─── the write path ───

    /// Feed PTY bytes through the parser and apply every resulting action,
    /// in the mandatory exit → transition → entry order.
    pub fn feed_bytes(&mut self, bytes: &[u8]) {
        for &byte in bytes {
            let slots = self.parser.feed(byte);
            for action in slots.drain() {
                self.apply_action(action);
            }
        }
    }

    /// Deterministic test entry point: write a string through the full
    /// parser pipeline (soft wrap, wide glyphs, escape sequences included).
    pub fn test_write_string(&mut self, text: &str) {
        self.feed_bytes(text.as_bytes());
    }

    fn apply_action(&mut self, action: VtAction) {
        match action {
            VtAction::Print(ch) => vt_ops::char_ops::print(self, ch),
            VtAction::Execute(byte) => vt_ops::control_ops::execute(self, byte),
            VtAction::CsiDispatch(csi) => vt_ops::csi_ops::dispatch(self, &csi),
            VtAction::EscDispatch(esc) => vt_ops::esc_ops::dispatch(self, &esc),
            VtAction::OscDispatch(cmd) => vt_ops::osc_ops::apply(self, cmd),
            VtAction::DcsHook(dcs) => self.dcs.hook(&dcs),
            VtAction::DcsPut(byte) => self.dcs.put(byte),
            VtAction::DcsUnhook => {
                if let Some(event) = self.dcs.unhook() {
                    self.events.push(ScreenEvent::Dcs(event));
                }
            }
        }
    }

    // ─── geometry and reads ───

    #[must_use]
    pub fn cols(&self) -> Length { self.pages.cols() }

    #[must_use]
    pub fn rows(&self) -> Length { self.pages.screen_rows() }

    #[must_use]
    pub fn total_rows(&self) -> Length { self.pages.total_rows() }

    #[must_use]
    pub fn history_rows(&self) -> Length { self.pages.history_rows() }

    #[must_use]
    pub fn active_top(&self) -> RowIndex { self.pages.active_top() }

    #[must_use]
    pub fn viewport(&self) -> Viewport { self.pages.viewport() }

    #[must_use]
    pub fn viewport_top(&self) -> RowIndex { self.pages.viewport_top() }

    /// Resolve any row address to an absolute screen row. Out-of-range
    /// addresses are caller bugs (debug assertion), clamped in release.
    #[must_use]
    pub fn resolve_row(&self, addr: RowAddr) -> RowIndex {
        let total = self.total_rows();
        let abs = match addr {
            RowAddr::Screen(y) => y,
            RowAddr::Viewport(y) => self.viewport_top() + y,
            RowAddr::Active(y) => self.active_top() + y,
            RowAddr::History(y) => {
                debug_assert!(
                    y.as_usize() < self.history_rows().as_usize(),
                    "history row out of range"
                );
                y
            }
        };
        debug_assert!(abs.as_usize() < total.as_usize(), "row out of range");
        abs.clamp_to(total)
    }

    #[must_use]
    pub fn get_cell(&self, addr: RowAddr, x: ColIndex) -> &Cell {
        self.pages.get_cell(self.resolve_row(addr), x)
    }

    /// Rendered text of one row: spacer cells skipped, grapheme extras
    /// included, trailing blanks trimmed.
    #[must_use]
    pub fn row_text(&self, addr: RowAddr) -> String {
        let abs = self.resolve_row(addr);
        let (page, local) = self.pages.locate(abs);
        let mut out = String::new();
        for x in 0..self.cols().as_usize() {
            let x = ColIndex::from(x);
            let cell = page.get_cell(local, x);
            match cell.wide {
                Wide::SpacerTail | Wide::SpacerHead => continue,
                Wide::Narrow | Wide::Wide => {}
            }
            let cp = cell.content.codepoint().unwrap_or('\0');
            out.push(if cp == '\0' { ' ' } else { cp });
            if cell.content.is_grapheme() {
                if let Some(extra) = page.lookup_grapheme(local, x) {
                    out.extend(extra.iter().filter_map(|&cp| char::from_u32(cp)));
                }
            }
        }
        out.truncate(out.trim_end().len());
        out
    }

    /// Convenience: text of an active-area row.
    #[must_use]
    pub fn active_row_text(&self, y: RowIndex) -> String {
        self.row_text(RowAddr::Active(y))
    }

    #[must_use]
    pub fn cursor(&self) -> &Cursor { &self.cursor }

    #[must_use]
    pub fn title(&self) -> Option<&str> { self.title.as_deref() }

    #[must_use]
    pub fn icon(&self) -> Option<&str> { self.icon.as_deref() }

    #[must_use]
    pub fn pwd(&self) -> Option<&str> { self.pwd.as_deref() }

    #[must_use]
    pub fn mouse_shape(&self) -> Option<&str> { self.mouse_shape.as_deref() }

    #[must_use]
    pub fn last_exit_code(&self) -> Option<u8> { self.last_exit_code }

    /// Take the queued outbound events.
    pub fn drain_events(&mut self) -> Vec<ScreenEvent> {
        std::mem::take(&mut self.events)
    }

    // ─── scrolling, pins, resize ───

    pub fn scroll(&mut self, scroll: Scroll) { self.pages.scroll(scroll); }

    pub fn track_pin(&mut self, pos: PinPos) -> Pin { self.pages.track_pin(pos) }

    /// Resize the screen. Margins reset, tab stops rebuild, the cursor
    /// clamps into the new geometry.
    pub fn resize(&mut self, new_cols: Length, new_rows: Length) {
        self.pages.resize(new_cols, new_rows);
        self.tab_stops.resize(new_cols);
        self.margins = ScrollRegion {
            top: RowIndex(0),
            bottom: RowIndex::from(new_rows.as_usize().saturating_sub(1)),
            left: None,
            right: None,
        };
        self.cursor.row = self.cursor.row.clamp_to(new_rows);
        self.cursor.col = self.cursor.col.clamp_to(new_cols);
        self.cursor.pending_wrap = false;
    }

    // ─── internals shared by the vt_ops modules ───

    pub(crate) fn active_page(&self) -> &Page { self.pages.active_page() }

    pub(crate) fn active_page_mut(&mut self) -> &mut Page {
        self.pages.active_page_mut()
    }

    /// Place the cursor (active-relative), clamped, clearing pending wrap.
    pub(crate) fn set_cursor(&mut self, y: RowIndex, x: ColIndex) {
        self.cursor.row = y.clamp_to(self.rows());
        self.cursor.col = x.clamp_to(self.cols());
        self.cursor.pending_wrap = false;
    }

    /// Intern the cursor style into the active page, recovering from a
    /// clogged or exhausted style set (rehash, then migrate to a page with
    /// doubled pools).
    pub(crate) fn intern_cursor_style(&mut self) -> crate::StyleId {
        let style = self.cursor.style;
        match self.active_page_mut().intern_style(&style) {
            Ok(id) => id,
            Err(crate::PageError::StyleSetNeedsRehash) => {
                self.active_page_mut().rehash_styles();
                self.active_page_mut().intern_style(&style).unwrap_or(0)
            }
            Err(_) => {
                self.grow_active_page();
                self.active_page_mut().intern_style(&style).unwrap_or(0)
            }
        }
    }

    /// Out-of-memory recovery: allocate an active page with doubled pools
    /// and migrate every row into it.
    pub(crate) fn grow_active_page(&mut self) {
        let old_capacity = *self.active_page().capacity();
        let grown = PageCapacity {
            styles: old_capacity.styles.saturating_mul(2),
            grapheme_bytes: old_capacity.grapheme_bytes.saturating_mul(2),
            string_bytes: old_capacity.string_bytes.saturating_mul(2),
            hyperlink_bytes: old_capacity.hyperlink_bytes.saturating_mul(2),
            ..old_capacity
        };
        tracing::debug!(
            "screen: migrating active page to doubled pools (styles {})",
            grown.styles
        );
        let mut bigger = Page::new(grown);
        for y in 0..old_capacity.rows {
            let y = row(y);
            if let Err(error) =
                bigger.clone_row_from(self.active_page(), y, y)
            {
                tracing::warn!("screen: dropping row content in migration: {error}");
            }
        }
        *self.active_page_mut() = bigger;
    }

    /// The absolute screen row under the cursor.
    #[must_use]
    pub(crate) fn cursor_abs_row(&self) -> RowIndex {
        self.active_top() + self.cursor.row
    }

    /// Column index of the last cell in a row that holds content, if any.
    #[must_use]
    pub(crate) fn last_content_col(&self, abs: RowIndex) -> Option<ColIndex> {
        let (page, local) = self.pages.locate(abs);
        for x in (0..self.cols().as_usize()).rev() {
            let x = ColIndex::from(x);
            if !page.get_cell(local, x).is_blank() {
                return Some(x);
            }
        }
        None
    }

    /// The last screen row that holds any content (for selection motion).
    #[must_use]
    pub(crate) fn last_content_row(&self) -> RowIndex {
        for abs in (0..self.total_rows().as_usize()).rev() {
            let abs = RowIndex::from(abs);
            if self.last_content_col(abs).is_some() {
                return abs;
            }
        }
        RowIndex(0)
    }
}

impl Default for Screen {
    fn default() -> Self { Self::new(TermConfig::default()) }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::col;

    fn small_screen() -> Screen {
        Screen::new(TermConfig {
            page: PageCapacity {
                cols: 10,
                rows: 4,
                ..PageCapacity::default()
            },
            scrollback_rows: 100,
            ..TermConfig::default()
        })
    }

    #[test]
    fn test_plain_write() {
        let mut screen = small_screen();
        screen.test_write_string("hello");
        assert_eq!(screen.active_row_text(row(0)), "hello");
        assert_eq!(screen.cursor().col, col(5));
        assert_eq!(screen.cursor().row, row(0));
    }

    #[test]
    fn test_crlf_moves_to_next_row() {
        let mut screen = small_screen();
        screen.test_write_string("one\r\ntwo");
        assert_eq!(screen.active_row_text(row(0)), "one");
        assert_eq!(screen.active_row_text(row(1)), "two");
    }

    #[test]
    fn test_soft_wrap_marks_rows() {
        let mut screen = small_screen();
        screen.test_write_string("0123456789AB");
        assert_eq!(screen.active_row_text(row(0)), "0123456789");
        assert_eq!(screen.active_row_text(row(1)), "AB");
        assert!(screen.get_cell(RowAddr::Active(row(0)), col(0)).content.codepoint()
            .is_some());
        let first = screen.resolve_row(RowAddr::Active(row(0)));
        assert!(screen.pages.get_row(first).flags.wrap());
        let second = screen.resolve_row(RowAddr::Active(row(1)));
        assert!(screen.pages.get_row(second).flags.wrap_continuation());
    }

    #[test]
    fn test_scroll_to_history_on_bottom_overflow() {
        let mut screen = small_screen();
        screen.test_write_string("a\r\nb\r\nc\r\nd\r\ne");
        // Five lines on a four-row screen: 'a' went to history.
        assert_eq!(screen.history_rows(), len(1_usize));
        assert_eq!(screen.row_text(RowAddr::Screen(row(0))), "a");
        assert_eq!(screen.active_row_text(row(0)), "b");
        assert_eq!(screen.active_row_text(row(3)), "e");
    }

    #[test]
    fn test_wide_glyph_gets_spacer_tail() {
        let mut screen = small_screen();
        screen.test_write_string("世");
        let head = screen.get_cell(RowAddr::Active(row(0)), col(0));
        assert_eq!(head.wide, Wide::Wide);
        let tail = screen.get_cell(RowAddr::Active(row(0)), col(1));
        assert_eq!(tail.wide, Wide::SpacerTail);
        assert_eq!(screen.cursor().col, col(2));
        assert_eq!(screen.active_row_text(row(0)), "世");
    }

    #[test]
    fn test_resize_clamps_cursor() {
        let mut screen = small_screen();
        screen.test_write_string("0123456789");
        screen.resize(len(5_usize), len(4_usize));
        assert!(screen.cursor().col.as_usize() < 5);
        assert_eq!(screen.cols(), len(5_usize));
    }

    #[test]
    fn test_row_text_includes_grapheme_extras() {
        let mut screen = small_screen();
        // e + combining acute.
        screen.test_write_string("e\u{0301}x");
        assert_eq!(screen.active_row_text(row(0)), "e\u{0301}x");
    }
}
