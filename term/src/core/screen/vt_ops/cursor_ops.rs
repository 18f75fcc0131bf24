// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Cursor movement (CUP and friends) and DECSC/DECRC.

use crate::{ColIndex, CsiSequence, RowIndex, SavedCursor, Screen};

/// CSI parameter access: missing and zero both mean the default (most
/// cursor sequences treat 0 as 1).
pub(crate) fn param(csi: &CsiSequence, index: usize, default: u16) -> u16 {
    match csi.params.get(index) {
        Some(&value) if value != 0 => value,
        _ => default,
    }
}

/// CUP / HVP: 1-based row;col, honoring origin mode.
pub fn cursor_position(screen: &mut Screen, csi: &CsiSequence) {
    let req_row = param(csi, 0, 1) - 1;
    let req_col = param(csi, 1, 1) - 1;
    let (base_row, base_col) = if screen.modes.origin {
        (
            screen.margins.top,
            screen.margins.left.unwrap_or(ColIndex(0)),
        )
    } else {
        (RowIndex(0), ColIndex(0))
    };
    let mut y = base_row.saturating_add(req_row);
    let mut x = base_col.saturating_add(req_col);
    if screen.modes.origin {
        y = y.clamp_to(screen.margins.bottom.convert_to_length());
        if let Some(right) = screen.margins.right {
            x = x.clamp_to(right.convert_to_length());
        }
    }
    screen.set_cursor(y, x);
}

/// CUU: up, stopping at the top margin when starting below it.
pub fn cursor_up(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1);
    let floor = if screen.cursor.row >= screen.margins.top {
        screen.margins.top
    } else {
        RowIndex(0)
    };
    let target = screen.cursor.row.saturating_sub(n);
    screen.set_cursor(target.max(floor), screen.cursor.col);
}

/// CUD: down, stopping at the bottom margin when starting above it.
pub fn cursor_down(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1);
    let ceil = if screen.cursor.row <= screen.margins.bottom {
        screen.margins.bottom
    } else {
        RowIndex::from(screen.rows().as_usize().saturating_sub(1))
    };
    let target = screen.cursor.row.saturating_add(n);
    screen.set_cursor(target.min(ceil), screen.cursor.col);
}

/// CUF: forward.
pub fn cursor_forward(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1);
    let target = screen.cursor.col.saturating_add(n);
    screen.set_cursor(screen.cursor.row, target);
}

/// CUB: backward.
pub fn cursor_backward(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1);
    let target = screen.cursor.col.saturating_sub(n);
    screen.set_cursor(screen.cursor.row, target);
}

/// CNL / CPL: next/previous line, column to the start.
pub fn cursor_next_line(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1);
    let target = screen.cursor.row.saturating_add(n);
    screen.set_cursor(target.min(screen.margins.bottom), ColIndex(0));
}

pub fn cursor_previous_line(screen: &mut Screen, csi: &CsiSequence) {
    let n = param(csi, 0, 1);
    let target = screen.cursor.row.saturating_sub(n);
    screen.set_cursor(target.max(screen.margins.top), ColIndex(0));
}

/// CHA / HPA: absolute column.
pub fn cursor_column(screen: &mut Screen, csi: &CsiSequence) {
    let x = ColIndex::from(param(csi, 0, 1) - 1);
    screen.set_cursor(screen.cursor.row, x);
}

/// VPA: absolute row.
pub fn cursor_row(screen: &mut Screen, csi: &CsiSequence) {
    let y = RowIndex::from(param(csi, 0, 1) - 1);
    screen.set_cursor(y, screen.cursor.col);
}

/// CHT / CBT: tab stops forward / backward.
pub fn tab_forward(screen: &mut Screen, csi: &CsiSequence) {
    for _ in 0..param(csi, 0, 1) {
        screen.cursor.col = screen.tab_stops.next_stop(screen.cursor.col);
    }
    screen.cursor.pending_wrap = false;
}

pub fn tab_backward(screen: &mut Screen, csi: &CsiSequence) {
    for _ in 0..param(csi, 0, 1) {
        screen.cursor.col = screen.tab_stops.previous_stop(screen.cursor.col);
    }
    screen.cursor.pending_wrap = false;
}

/// DECSC.
pub fn save_cursor(screen: &mut Screen) {
    screen.saved_cursor = Some(SavedCursor {
        row: screen.cursor.row,
        col: screen.cursor.col,
        style: screen.cursor.style,
        charsets: screen.charsets,
        pending_wrap: screen.cursor.pending_wrap,
    });
}

/// DECRC. With nothing saved, resets to home like a hardware VT.
pub fn restore_cursor(screen: &mut Screen) {
    match screen.saved_cursor.clone() {
        Some(saved) => {
            screen.set_cursor(saved.row, saved.col);
            screen.cursor.style = saved.style;
            screen.charsets = saved.charsets;
            screen.cursor.pending_wrap = saved.pending_wrap;
        }
        None => {
            screen.set_cursor(RowIndex(0), ColIndex(0));
            screen.cursor.style = crate::Style::default();
        }
    }
}
