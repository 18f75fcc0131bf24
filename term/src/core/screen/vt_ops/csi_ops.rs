// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! CSI routing: final byte (plus intermediates) → operation module.

use super::{cursor_ops, erase_ops, mode_ops, scroll_ops, sgr_ops};
use crate::{CsiSequence, Screen, ScreenEvent};

pub fn dispatch(screen: &mut Screen, csi: &CsiSequence) {
    // Sequences with intermediates beyond the private markers.
    if csi.intermediates.first() == Some(&b'"') && csi.final_byte == b'q' {
        erase_ops::set_protection(screen, csi);
        return;
    }

    match csi.final_byte {
        b'A' => cursor_ops::cursor_up(screen, csi),
        b'B' => cursor_ops::cursor_down(screen, csi),
        b'C' => cursor_ops::cursor_forward(screen, csi),
        b'D' => cursor_ops::cursor_backward(screen, csi),
        b'E' => cursor_ops::cursor_next_line(screen, csi),
        b'F' => cursor_ops::cursor_previous_line(screen, csi),
        b'G' | b'`' => cursor_ops::cursor_column(screen, csi),
        b'H' | b'f' => cursor_ops::cursor_position(screen, csi),
        b'I' => cursor_ops::tab_forward(screen, csi),
        b'J' => erase_ops::erase_in_display(screen, csi),
        b'K' => erase_ops::erase_in_line(screen, csi),
        b'L' => erase_ops::insert_lines(screen, csi),
        b'M' => erase_ops::delete_lines(screen, csi),
        b'P' => erase_ops::delete_chars(screen, csi),
        b'S' => scroll_ops::scroll_up_csi(screen, csi),
        b'T' => scroll_ops::scroll_down_csi(screen, csi),
        b'X' => erase_ops::erase_chars(screen, csi),
        b'Z' => cursor_ops::tab_backward(screen, csi),
        b'@' => erase_ops::insert_chars(screen, csi),
        b'c' => screen.events.push(ScreenEvent::PrimaryDeviceAttributes),
        b'd' => cursor_ops::cursor_row(screen, csi),
        b'g' => tab_clear(screen, csi),
        b'h' => mode_ops::set_mode(screen, csi),
        b'l' => mode_ops::reset_mode(screen, csi),
        b'm' => sgr_ops::apply(screen, csi),
        b'n' => device_status_report(screen, csi),
        b'r' => scroll_ops::set_top_bottom_margins(screen, csi),
        b's' => {
            if screen.modes.left_right_margins {
                scroll_ops::set_left_right_margins(screen, csi);
            } else {
                cursor_ops::save_cursor(screen);
            }
        }
        b'u' => cursor_ops::restore_cursor(screen),
        other => {
            tracing::debug!("csi: ignoring final byte {:?}", char::from(other));
        }
    }
}

/// TBC (CSI g).
fn tab_clear(screen: &mut Screen, csi: &CsiSequence) {
    match csi.params.first().copied().unwrap_or(0) {
        0 => screen.tab_stops.clear(screen.cursor.col),
        3 => screen.tab_stops.clear_all(),
        other => tracing::debug!("TBC: ignoring mode {other}"),
    }
}

/// DSR (CSI n): 6 reports the cursor position as an event; the embedder
/// writes the actual reply bytes.
fn device_status_report(screen: &mut Screen, csi: &CsiSequence) {
    match csi.params.first().copied().unwrap_or(0) {
        6 => {
            let event = ScreenEvent::CursorPositionReport {
                row: screen.cursor.row.as_u16() + 1,
                col: screen.cursor.col.as_u16() + 1,
            };
            screen.events.push(event);
        }
        other => tracing::debug!("DSR: ignoring report {other}"),
    }
}
