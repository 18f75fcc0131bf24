// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! C0 control execution.

use super::scroll_ops;
use crate::{ColIndex, Screen, ScreenEvent};

pub fn execute(screen: &mut Screen, byte: u8) {
    match byte {
        0x07 => screen.events.push(ScreenEvent::Bell),
        0x08 => backspace(screen),
        0x09 => horizontal_tab(screen),
        0x0A | 0x0B | 0x0C => linefeed(screen),
        0x0D => carriage_return(screen),
        0x0E => screen.charsets.shifted = true, // SO
        0x0F => screen.charsets.shifted = false, // SI
        // CAN/SUB already aborted the sequence at the parser level.
        0x18 | 0x1A => {}
        0x00 => {}
        other => {
            tracing::debug!("execute: ignoring control {other:#04x}");
        }
    }
}

fn backspace(screen: &mut Screen) {
    let left = screen.margins.left.unwrap_or(ColIndex(0));
    if screen.cursor.col > left {
        screen.cursor.col = screen.cursor.col.saturating_sub(1);
    }
    screen.cursor.pending_wrap = false;
}

fn horizontal_tab(screen: &mut Screen) {
    screen.cursor.col = screen.tab_stops.next_stop(screen.cursor.col);
    screen.cursor.pending_wrap = false;
}

pub(crate) fn linefeed(screen: &mut Screen) {
    if screen.cursor.row == screen.margins.bottom {
        scroll_ops::scroll_up(screen, 1);
    } else if screen.cursor.row.as_usize() + 1 < screen.rows().as_usize() {
        screen.cursor.row = screen.cursor.row.saturating_add(1);
    }
    screen.cursor.pending_wrap = false;
}

fn carriage_return(screen: &mut Screen) {
    screen.cursor.col = screen.margins.left.unwrap_or(ColIndex(0));
    screen.cursor.pending_wrap = false;
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{PageCapacity, Screen, ScreenEvent, TermConfig, col, row};

    fn screen() -> Screen {
        Screen::new(TermConfig {
            page: PageCapacity {
                cols: 20,
                rows: 4,
                ..PageCapacity::default()
            },
            ..TermConfig::default()
        })
    }

    #[test]
    fn test_backspace_stops_at_left_edge() {
        let mut s = screen();
        s.test_write_string("ab\x08\x08\x08");
        assert_eq!(s.cursor().col, col(0));
    }

    #[test]
    fn test_tab_advances_to_stop() {
        let mut s = screen();
        s.test_write_string("a\t");
        assert_eq!(s.cursor().col, col(8));
        s.test_write_string("\t");
        assert_eq!(s.cursor().col, col(16));
    }

    #[test]
    fn test_bell_queues_event() {
        let mut s = screen();
        s.test_write_string("\x07");
        assert_eq!(s.drain_events(), vec![ScreenEvent::Bell]);
    }

    #[test]
    fn test_vertical_tab_and_form_feed_act_as_linefeed() {
        let mut s = screen();
        s.test_write_string("a\x0Bb\x0Cc");
        assert_eq!(s.active_row_text(row(0)), "a");
        assert_eq!(s.active_row_text(row(1)), " b");
        assert_eq!(s.active_row_text(row(2)), "  c");
    }
}
