// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SM / RM: the modes this layer tracks.
//!
//! Modes outside the data plane (mouse reporting, bracketed paste,
//! alternate screen) belong to the embedding program; they are logged and
//! skipped here so a front end can implement them from the raw stream.

use crate::{ColIndex, CsiSequence, RowIndex, Screen};

fn is_private(csi: &CsiSequence) -> bool {
    csi.intermediates.first() == Some(&b'?')
}

pub fn set_mode(screen: &mut Screen, csi: &CsiSequence) {
    change_mode(screen, csi, true);
}

pub fn reset_mode(screen: &mut Screen, csi: &CsiSequence) {
    change_mode(screen, csi, false);
}

fn change_mode(screen: &mut Screen, csi: &CsiSequence, enable: bool) {
    for &mode in &csi.params {
        if is_private(csi) {
            change_private_mode(screen, mode, enable);
        } else {
            change_ansi_mode(screen, mode, enable);
        }
    }
}

fn change_ansi_mode(screen: &mut Screen, mode: u16, enable: bool) {
    match mode {
        // IRM.
        4 => screen.modes.insert = enable,
        other => tracing::debug!("SM/RM: ignoring ANSI mode {other}"),
    }
}

fn change_private_mode(screen: &mut Screen, mode: u16, enable: bool) {
    match mode {
        // DECOM: origin mode; the cursor homes on change.
        6 => {
            screen.modes.origin = enable;
            screen.set_cursor(RowIndex(0), ColIndex(0));
        }
        // DECAWM.
        7 => {
            screen.modes.autowrap = enable;
            if !enable {
                screen.cursor.pending_wrap = false;
            }
        }
        // DECTCEM.
        25 => screen.modes.cursor_visible = enable,
        // DECLRMM: disabling clears the margins.
        69 => {
            screen.modes.left_right_margins = enable;
            if !enable {
                screen.margins.left = None;
                screen.margins.right = None;
            }
        }
        other => tracing::debug!("SM/RM: ignoring private mode {other}"),
    }
}

#[cfg(test)]
mod tests {
    use crate::{PageCapacity, Screen, TermConfig};

    fn screen() -> Screen {
        Screen::new(TermConfig {
            page: PageCapacity {
                cols: 10,
                rows: 3,
                ..PageCapacity::default()
            },
            ..TermConfig::default()
        })
    }

    #[test]
    fn test_autowrap_toggle() {
        let mut s = screen();
        assert!(s.modes.autowrap);
        s.test_write_string("\x1b[?7l");
        assert!(!s.modes.autowrap);
        s.test_write_string("\x1b[?7h");
        assert!(s.modes.autowrap);
    }

    #[test]
    fn test_cursor_visibility() {
        let mut s = screen();
        s.test_write_string("\x1b[?25l");
        assert!(!s.modes.cursor_visible);
        s.test_write_string("\x1b[?25h");
        assert!(s.modes.cursor_visible);
    }

    #[test]
    fn test_multiple_modes_one_sequence() {
        let mut s = screen();
        s.test_write_string("\x1b[?7;25l");
        assert!(!s.modes.autowrap);
        assert!(!s.modes.cursor_visible);
    }

    #[test]
    fn test_insert_mode_is_ansi_not_private() {
        let mut s = screen();
        s.test_write_string("\x1b[4h");
        assert!(s.modes.insert);
        s.test_write_string("\x1b[4l");
        assert!(!s.modes.insert);
    }
}
