// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Erase and shift: ED, EL, ECH, ICH, DCH, IL, DL.
//!
//! The selective variants (`CSI ? J` / `CSI ? K`, DECSED/DECSEL) skip cells
//! carrying the DEC protection attribute; the plain variants clear
//! unconditionally.

use super::{char_ops, cursor_ops::param};
use crate::{ColIndex, CsiSequence, RowIndex, Screen};

fn is_selective(csi: &CsiSequence) -> bool {
    csi.intermediates.first() == Some(&b'?')
}

/// Clear `[left, right)` of an active row, honoring protection when
/// `selective`.
fn erase_cells(
    screen: &mut Screen,
    y: RowIndex,
    left: ColIndex,
    right: ColIndex,
    selective: bool,
) {
    if !selective {
        screen.active_page_mut().clear_cells(y, left, right);
        return;
    }
    for x in left.as_u16()..right.as_u16() {
        let x = ColIndex(x);
        if screen.active_page().get_cell(y, x).protected {
            continue;
        }
        screen.active_page_mut().clear_cells(y, x, x.saturating_add(1));
    }
}

fn erase_full_row(screen: &mut Screen, y: RowIndex, selective: bool) {
    let cols = ColIndex::from(screen.cols().as_usize());
    if selective {
        erase_cells(screen, y, ColIndex(0), cols, true);
    } else {
        screen.active_page_mut().clear_row(y);
    }
}

/// ED / DECSED (CSI J): erase in display.
pub fn erase_in_display(screen: &mut Screen, csi: &CsiSequence) {
    let selective = is_selective(csi);
    let cols = ColIndex::from(screen.cols().as_usize());
    let rows = screen.rows().as_usize();
    let (y, x) = (screen.cursor.row, screen.cursor.col);
    match csi.params.first().copied().unwrap_or(0) {
        0 => {
            erase_cells(screen, y, x, cols, selective);
            for below in (y.as_usize() + 1)..rows {
                erase_full_row(screen, RowIndex::from(below), selective);
            }
        }
        1 => {
            for above in 0..y.as_usize() {
                erase_full_row(screen, RowIndex::from(above), selective);
            }
            erase_cells(screen, y, ColIndex(0), x.saturating_add(1), selective);
        }
        2 => {
            for row in 0..rows {
                erase_full_row(screen, RowIndex::from(row), selective);
            }
        }
        3 => screen.pages.clear_history(),
        other => tracing::debug!("ED: ignoring mode {other}"),
    }
    screen.cursor.pending_wrap = false;
}

/// EL / DECSEL (CSI K): erase in line.
pub fn erase_in_line(screen: &mut Screen, csi: &CsiSequence) {
    let selective = is_selective(csi);
    let cols = ColIndex::from(screen.cols().as_usize());
    let (y, x) = (screen.cursor.row, screen.cursor.col);
    match csi.params.first().copied().unwrap_or(0) {
        0 => erase_cells(screen, y, x, cols, selective),
        1 => erase_cells(screen, y, ColIndex(0), x.saturating_add(1), selective),
        2 => erase_cells(screen, y, ColIndex(0), cols, selective),
        other => tracing::debug!("EL: ignoring mode {other}"),
    }
    screen.cursor.pending_wrap = false;
}

/// ECH (CSI X): erase `n` cells from the cursor, no shifting.
pub fn erase_chars(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1) as usize;
    let (y, x) = (screen.cursor.row, screen.cursor.col);
    let right = ColIndex::from((x.as_usize() + n).min(screen.cols().as_usize()));
    screen.active_page_mut().clear_cells(y, x, right);
    screen.cursor.pending_wrap = false;
}

/// ICH (CSI @): insert `n` blanks at the cursor, shifting right.
pub fn insert_chars(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1) as usize;
    let (y, x) = (screen.cursor.row, screen.cursor.col);
    char_ops::shift_cells_right(screen, y, x, n);
    screen.cursor.pending_wrap = false;
}

/// DCH (CSI P): delete `n` cells at the cursor, shifting left.
pub fn delete_chars(screen: &mut Screen, csi: &CsiSequence) {
    let cols = screen.cols().as_usize();
    let n = (param(csi, 0, 1) as usize).min(cols - screen.cursor.col.as_usize());
    let (y, x) = (screen.cursor.row, screen.cursor.col);
    screen
        .active_page_mut()
        .clear_cells(y, x, ColIndex::from(x.as_usize() + n));
    for src in (x.as_usize() + n)..cols {
        let src_x = ColIndex::from(src);
        let dst_x = ColIndex::from(src - n);
        screen.active_page_mut().move_cells(y, src_x, y, dst_x, 1);
    }
    screen.cursor.pending_wrap = false;
}

/// IL (CSI L): insert `n` blank lines at the cursor (inside the region).
pub fn insert_lines(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1) as usize;
    let y = screen.cursor.row;
    if y < screen.margins.top || y > screen.margins.bottom {
        return;
    }
    let bottom = screen.margins.bottom.as_usize();
    for _ in 0..n {
        for src in (y.as_usize()..bottom).rev() {
            screen
                .active_page_mut()
                .move_row(RowIndex::from(src), RowIndex::from(src + 1));
        }
        screen.active_page_mut().clear_row(y);
    }
    screen.cursor.col = ColIndex(0);
    screen.cursor.pending_wrap = false;
}

/// DL (CSI M): delete `n` lines at the cursor (inside the region).
pub fn delete_lines(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1) as usize;
    let y = screen.cursor.row;
    if y < screen.margins.top || y > screen.margins.bottom {
        return;
    }
    let bottom = screen.margins.bottom.as_usize();
    for _ in 0..n {
        for src in (y.as_usize() + 1)..=bottom {
            screen
                .active_page_mut()
                .move_row(RowIndex::from(src), RowIndex::from(src - 1));
        }
        screen
            .active_page_mut()
            .clear_row(RowIndex::from(bottom));
    }
    screen.cursor.col = ColIndex(0);
    screen.cursor.pending_wrap = false;
}

/// DECSCA (CSI Ps " q): 1 protects subsequently written cells, 0/2
/// unprotect. The attribute is recorded on cells at write time.
pub fn set_protection(screen: &mut Screen, csi: &CsiSequence) {
    screen.pending_protect = param(csi, 0, 0) == 1;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{PageCapacity, Screen, TermConfig, col, len, row};

    fn screen() -> Screen {
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
    fn test_erase_to_end_of_line() {
        let mut s = screen();
        s.test_write_string("0123456789\x1b[1;5H\x1b[K");
        assert_eq!(s.active_row_text(row(0)), "0123");
    }

    #[test]
    fn test_erase_to_start_of_line() {
        let mut s = screen();
        s.test_write_string("0123456789\x1b[1;5H\x1b[1K");
        assert_eq!(s.active_row_text(row(0)), "     56789");
    }

    #[test]
    fn test_erase_display_below() {
        let mut s = screen();
        s.test_write_string("aa\r\nbb\r\ncc\x1b[2;1H\x1b[J");
        assert_eq!(s.active_row_text(row(0)), "aa");
        assert_eq!(s.active_row_text(row(1)), "");
        assert_eq!(s.active_row_text(row(2)), "");
    }

    #[test]
    fn test_erase_display_all_and_history() {
        let mut s = screen();
        s.test_write_string("a\r\nb\r\nc\r\nd\r\ne");
        assert_eq!(s.history_rows(), len(1_usize));
        s.test_write_string("\x1b[2J");
        assert_eq!(s.active_row_text(row(0)), "");
        assert_eq!(s.history_rows(), len(1_usize), "2J keeps history");
        s.test_write_string("\x1b[3J");
        assert_eq!(s.history_rows(), len(0_usize), "3J clears history");
    }

    #[test]
    fn test_delete_chars_shifts_left() {
        let mut s = screen();
        s.test_write_string("abcdef\x1b[1;2H\x1b[2P");
        assert_eq!(s.active_row_text(row(0)), "adef");
    }

    #[test]
    fn test_insert_chars_shifts_right() {
        let mut s = screen();
        s.test_write_string("abcdef\x1b[1;2H\x1b[2@");
        assert_eq!(s.active_row_text(row(0)), "a  bcdef");
        assert_eq!(s.cursor().col, col(1));
    }

    #[test]
    fn test_insert_and_delete_lines() {
        let mut s = screen();
        s.test_write_string("a\r\nb\r\nc\x1b[2;1H\x1b[L");
        assert_eq!(s.active_row_text(row(1)), "");
        assert_eq!(s.active_row_text(row(2)), "b");
        assert_eq!(s.active_row_text(row(3)), "c");

        s.test_write_string("\x1b[M");
        assert_eq!(s.active_row_text(row(1)), "b");
        assert_eq!(s.active_row_text(row(2)), "c");
    }

    #[test]
    fn test_erase_chars_without_shift() {
        let mut s = screen();
        s.test_write_string("abcdef\x1b[1;2H\x1b[3X");
        assert_eq!(s.active_row_text(row(0)), "a   ef");
    }
}
