// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Scroll region machinery: SU/SD, IND/RI, DECSTBM/DECSLRM.
//!
//! Only a full-screen scroll-up feeds the scrollback; scrolling inside a
//! reduced region (or with left/right margins active) recycles rows in
//! place and discards what falls off, which is what hardware terminals do.

use crate::{ColIndex, CsiSequence, RowIndex, Screen};

use super::cursor_ops::param;

fn full_screen_region(screen: &Screen) -> bool {
    screen.margins.top == RowIndex(0)
        && screen.margins.bottom.as_usize() == screen.rows().as_usize() - 1
        && screen.margins.left.is_none()
        && screen.margins.right.is_none()
}

/// Columns affected by region scrolls.
fn margin_cols(screen: &Screen) -> (ColIndex, usize) {
    let left = screen.margins.left.unwrap_or(ColIndex(0));
    let right = screen
        .margins
        .right
        .unwrap_or(ColIndex::from(screen.cols().as_usize() - 1));
    let width = right.as_usize() + 1 - left.as_usize();
    (left, width)
}

/// Scroll the region up `n` rows. The full-screen case pushes the departing
/// rows into history.
pub fn scroll_up(screen: &mut Screen, n: usize) {
    if full_screen_region(screen) {
        for _ in 0..n {
            screen.pages.grow_one_blank_row();
        }
        return;
    }
    let top = screen.margins.top.as_usize();
    let bottom = screen.margins.bottom.as_usize();
    let (left, width) = margin_cols(screen);
    for _ in 0..n {
        for y in (top + 1)..=bottom {
            shift_row_segment(screen, RowIndex::from(y), RowIndex::from(y - 1),
                              left, width);
        }
        clear_row_segment(screen, RowIndex::from(bottom), left, width);
    }
}

/// Scroll the region down `n` rows. Never touches history.
pub fn scroll_down(screen: &mut Screen, n: usize) {
    let top = screen.margins.top.as_usize();
    let bottom = screen.margins.bottom.as_usize();
    let (left, width) = margin_cols(screen);
    for _ in 0..n {
        for y in (top..bottom).rev() {
            shift_row_segment(screen, RowIndex::from(y), RowIndex::from(y + 1),
                              left, width);
        }
        clear_row_segment(screen, RowIndex::from(top), left, width);
    }
}

fn shift_row_segment(
    screen: &mut Screen,
    src: RowIndex,
    dst: RowIndex,
    left: ColIndex,
    width: usize,
) {
    let whole_row = left == ColIndex(0) && width == screen.cols().as_usize();
    if whole_row {
        screen.active_page_mut().move_row(src, dst);
    } else {
        screen
            .active_page_mut()
            .clear_cells(dst, left, ColIndex::from(left.as_usize() + width));
        screen.active_page_mut().move_cells(src, left, dst, left, width);
    }
}

fn clear_row_segment(screen: &mut Screen, y: RowIndex, left: ColIndex, width: usize) {
    let whole_row = left == ColIndex(0) && width == screen.cols().as_usize();
    if whole_row {
        screen.active_page_mut().clear_row(y);
    } else {
        screen
            .active_page_mut()
            .clear_cells(y, left, ColIndex::from(left.as_usize() + width));
    }
}

/// CSI S.
pub fn scroll_up_csi(screen: &mut Screen, csi: &CsiSequence) {
    scroll_up(screen, param(csi, 0, 1) as usize);
}

/// CSI T.
pub fn scroll_down_csi(screen: &mut Screen, csi: &CsiSequence) {
    scroll_down(screen, param(csi, 0, 1) as usize);
}

/// IND (`ESC D`): like a linefeed.
pub fn index(screen: &mut Screen) {
    super::control_ops::linefeed(screen);
}

/// RI (`ESC M`): reverse index; at the top margin the region scrolls down.
pub fn reverse_index(screen: &mut Screen) {
    if screen.cursor.row == screen.margins.top {
        scroll_down(screen, 1);
    } else if screen.cursor.row.as_usize() > 0 {
        screen.cursor.row = screen.cursor.row.saturating_sub(1);
    }
    screen.cursor.pending_wrap = false;
}

/// NEL (`ESC E`): carriage return + index.
pub fn next_line(screen: &mut Screen) {
    screen.cursor.col = screen.margins.left.unwrap_or(ColIndex(0));
    index(screen);
}

/// DECSTBM (CSI r): set top/bottom margins, home the cursor.
pub fn set_top_bottom_margins(screen: &mut Screen, csi: &CsiSequence) {
    let rows = screen.rows().as_usize();
    let top = (param(csi, 0, 1) as usize - 1).min(rows - 1);
    #[allow(clippy::cast_possible_truncation)]
    let bottom = (param(csi, 1, rows.min(u16::MAX as usize) as u16) as usize - 1)
        .min(rows - 1);
    if top >= bottom {
        tracing::debug!("DECSTBM: rejecting degenerate region {top}..{bottom}");
        return;
    }
    screen.margins.top = RowIndex::from(top);
    screen.margins.bottom = RowIndex::from(bottom);
    screen.set_cursor(RowIndex(0), ColIndex(0));
}

/// DECSLRM (CSI s with DECLRMM enabled): set left/right margins.
pub fn set_left_right_margins(screen: &mut Screen, csi: &CsiSequence) {
    let cols = screen.cols().as_usize();
    let left = (param(csi, 0, 1) as usize - 1).min(cols - 1);
    #[allow(clippy::cast_possible_truncation)]
    let right =
        (param(csi, 1, cols.min(u16::MAX as usize) as u16) as usize - 1).min(cols - 1);
    if left >= right {
        tracing::debug!("DECSLRM: rejecting degenerate margins {left}..{right}");
        return;
    }
    screen.margins.left = Some(ColIndex::from(left));
    screen.margins.right = Some(ColIndex::from(right));
    screen.set_cursor(RowIndex(0), ColIndex(0));
}
