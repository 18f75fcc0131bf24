// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ESC dispatch: simple escape sequences.

use super::{cursor_ops, scroll_ops};
use crate::{CellContent, CharacterSet, CharsetState, ColIndex, Cursor, EscSequence,
            Modes, RowIndex, Screen, ScrollRegion, TabStops};

pub fn dispatch(screen: &mut Screen, esc: &EscSequence) {
    match (esc.intermediates.as_slice(), esc.final_byte) {
        // Charset designation.
        (b"(", designator) => {
            if let Some(set) = CharacterSet::from_designator(designator) {
                screen.charsets.g0 = set;
            } else {
                tracing::debug!("esc: unknown G0 designator {designator:#04x}");
            }
        }
        (b")", designator) => {
            if let Some(set) = CharacterSet::from_designator(designator) {
                screen.charsets.g1 = set;
            } else {
                tracing::debug!("esc: unknown G1 designator {designator:#04x}");
            }
        }
        // DECALN: fill the screen with E, reset margins and cursor.
        (b"#", b'8') => screen_alignment_test(screen),
        (b"", b'7') => cursor_ops::save_cursor(screen),
        (b"", b'8') => cursor_ops::restore_cursor(screen),
        (b"", b'D') => scroll_ops::index(screen),
        (b"", b'E') => scroll_ops::next_line(screen),
        (b"", b'H') => screen.tab_stops.set(screen.cursor.col),
        (b"", b'M') => scroll_ops::reverse_index(screen),
        (b"", b'c') => full_reset(screen),
        // Keypad modes: input-side concerns.
        (b"", b'=' | b'>') => {}
        // String terminator arriving after an OSC/DCS ended it.
        (b"", b'\\') => {}
        (intermediates, final_byte) => {
            tracing::debug!(
                "esc: ignoring sequence {intermediates:?} {:?}",
                char::from(final_byte)
            );
        }
    }
}

/// DECALN (`ESC # 8`).
fn screen_alignment_test(screen: &mut Screen) {
    let rows = screen.rows().as_usize();
    let cols = screen.cols().as_usize();
    screen.margins = ScrollRegion {
        top: RowIndex(0),
        bottom: RowIndex::from(rows - 1),
        left: None,
        right: None,
    };
    screen.set_cursor(RowIndex(0), ColIndex(0));
    for y in 0..rows {
        let y = RowIndex::from(y);
        screen.active_page_mut().clear_row(y);
        for x in 0..cols {
            let x = ColIndex::from(x);
            screen.active_page_mut().put_cell(
                y,
                x,
                crate::Cell {
                    content: CellContent::Codepoint('E'),
                    ..crate::Cell::blank()
                },
            );
        }
    }
}

/// RIS (`ESC c`): reset the terminal. The active area clears; scrollback
/// survives (clearing history is ED 3's job).
fn full_reset(screen: &mut Screen) {
    let rows = screen.rows().as_usize();
    for y in 0..rows {
        screen.active_page_mut().clear_row(RowIndex::from(y));
    }
    screen.cursor = Cursor::default();
    screen.saved_cursor = None;
    screen.margins = ScrollRegion {
        top: RowIndex(0),
        bottom: RowIndex::from(rows - 1),
        left: None,
        right: None,
    };
    screen.tab_stops = TabStops::new(screen.cols());
    screen.charsets = CharsetState::default();
    screen.modes = Modes::default();
    screen.current_hyperlink = None;
    screen.pending_protect = false;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{PageCapacity, Screen, TermConfig, col, row};

    fn screen() -> Screen {
        Screen::new(TermConfig {
            page: PageCapacity {
                cols: 6,
                rows: 3,
                ..PageCapacity::default()
            },
            ..TermConfig::default()
        })
    }

    #[test]
    fn test_decaln_fills_with_e() {
        let mut s = screen();
        s.test_write_string("\x1b#8");
        for y in 0..3 {
            assert_eq!(s.active_row_text(row(y)), "EEEEEE");
        }
        assert_eq!(s.cursor().col, col(0));
    }

    #[test]
    fn test_charset_designation_line_drawing() {
        let mut s = screen();
        s.test_write_string("\x1b(0qqq\x1b(Bq");
        assert_eq!(s.active_row_text(row(0)), "───q");
    }

    #[test]
    fn test_ris_resets_state() {
        let mut s = screen();
        s.test_write_string("abc\x1b[1m\x1b[?7l\x1b[2;3r");
        s.test_write_string("\x1bc");
        assert_eq!(s.active_row_text(row(0)), "");
        assert_eq!(s.cursor().col, col(0));
        assert_eq!(s.cursor().row, row(0));
        assert!(s.cursor().style.is_default());
        assert!(s.modes.autowrap);
        assert_eq!(s.margins.top, row(0));
    }

    #[test]
    fn test_hts_sets_tab_stop() {
        let mut s = screen();
        s.test_write_string("\x1b[3G\x1bH\x1b[1G\t");
        assert_eq!(s.cursor().col, col(2));
    }
}
