// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Screen-level conformance scenarios: bytes in, grid out.

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::{Page, PageCapacity, PinPos, RowAddr, Screen, Selection,
                SelectionAdjustment, TermConfig, col, len, row};

    fn screen(cols: u16, rows: u16) -> Screen {
        Screen::new(TermConfig {
            page: PageCapacity {
                cols,
                rows,
                ..PageCapacity::default()
            },
            scrollback_rows: 100,
            ..TermConfig::default()
        })
    }

    /// A vim-like startup burst: clear, home, draw a status line with
    /// styles, park the cursor.
    #[test]
    fn test_full_screen_redraw_burst() {
        let mut s = screen(20, 5);
        s.test_write_string("\x1b[2J\x1b[H");
        s.test_write_string("\x1b[1;1Hfile.rs");
        s.test_write_string("\x1b[5;1H\x1b[7m-- INSERT --\x1b[0m");
        s.test_write_string("\x1b[1;8H");
        assert_eq!(s.active_row_text(row(0)), "file.rs");
        assert_eq!(s.active_row_text(row(4)), "-- INSERT --");
        let status_cell = s.get_cell(RowAddr::Active(row(4)), col(0));
        assert!(s.active_page().style(status_cell.style_id).unwrap().inverse);
        assert_eq!((s.cursor().row, s.cursor().col), (row(0), col(7)));
    }

    /// Scrollback accumulates, the viewport follows the bottom, and
    /// scrolling back exposes history without disturbing the active area.
    #[test]
    fn test_scrollback_and_viewport() {
        let mut s = screen(10, 3);
        for i in 0..6 {
            s.test_write_string(&format!("line{i}\r\n"));
        }
        assert_eq!(s.history_rows(), len(4_usize));
        assert_eq!(s.active_row_text(row(0)), "line4");

        s.scroll(crate::Scroll::Top);
        assert_eq!(s.row_text(RowAddr::Viewport(row(0))), "line0");
        s.scroll(crate::Scroll::Delta(2));
        assert_eq!(s.row_text(RowAddr::Viewport(row(0))), "line2");
        s.scroll(crate::Scroll::Bottom);
        assert_eq!(s.row_text(RowAddr::Viewport(row(0))), "line4");
    }

    /// Scenario: selection adjust right at a row end wraps to the next row
    /// (the `A1234 / B5678 / C1234 / D5678` fixture).
    #[test]
    fn test_selection_adjust_right_at_row_end() {
        let mut s = screen(5, 4);
        s.test_write_string("A1234\r\nB5678\r\nC1234\r\nD5678");
        let selection = Selection::new(
            &mut s,
            PinPos::new(row(1), col(4)),
            PinPos::new(row(2), col(4)),
            false,
        );
        selection.adjust(&s, SelectionAdjustment::Right);
        assert_eq!(selection.end(), PinPos::new(row(3), col(0)));
        assert_eq!(selection.start(), PinPos::new(row(1), col(4)));
    }

    /// A page snapshot taken mid-stream verifies and compares equal
    /// cell-for-cell (the render-from-snapshot contract).
    #[test]
    fn test_snapshot_clone_is_valid_and_equal() {
        let mut s = screen(10, 4);
        s.test_write_string("\x1b[1mbold\x1b[0m plain\r\n");
        s.test_write_string("\x1b]8;;https://r3bl.com\x07link\x1b]8;;\x07");
        s.test_write_string("e\u{0301}");

        let live = s.active_page();
        let mut snapshot = Page::new(*live.capacity());
        live.clone_into(&mut snapshot);

        assert!(snapshot.verify_integrity().is_ok());
        for y in 0..4 {
            for x in 0..10 {
                assert_eq!(
                    snapshot.get_cell(row(y), col(x)),
                    live.get_cell(row(y), col(x)),
                    "cell ({y},{x})"
                );
            }
        }

        // Mutating the live screen afterwards leaves the snapshot alone.
        s.test_write_string("\x1b[2J");
        assert!(snapshot.verify_integrity().is_ok());
        assert_eq!(
            snapshot
                .get_cell(row(0), col(0))
                .content
                .codepoint(),
            Some('b')
        );
    }

    /// Wrapped wide glyphs keep every invariant the integrity checker
    /// knows about.
    #[test]
    fn test_wide_wrap_integrity() {
        let mut s = screen(5, 4);
        s.test_write_string("abcd世界x");
        assert!(s.active_page().verify_integrity().is_ok());
        assert_eq!(s.active_row_text(row(0)), "abcd");
        assert_eq!(s.active_row_text(row(1)), "世界x");
    }

    /// The semantic prompt marks survive scroll-out into history.
    #[test]
    fn test_prompt_marks_survive_scrollout() {
        let mut s = screen(10, 2);
        s.test_write_string("\x1b]133;A\x07$ make\r\n");
        s.test_write_string("\x1b]133;C\x07building\r\n");
        s.test_write_string("done\r\nmore\r\n");
        // The prompt row scrolled into history with its mark.
        let mut found_prompt = false;
        for y in 0..s.history_rows().as_usize() {
            let abs = s.resolve_row(RowAddr::History(row(y)));
            if s.row_text(RowAddr::Screen(abs)) == "$ make" {
                found_prompt = true;
                assert_eq!(
                    s.pages.get_row(abs).semantic_prompt,
                    crate::SemanticPrompt::Prompt,
                );
            }
        }
        assert!(found_prompt, "prompt row should be in history");
    }

    /// Style use counts never exceed their reference counts, across a
    /// workload with heavy overwriting.
    #[test]
    fn test_style_refcount_invariant_under_churn() {
        let mut s = screen(10, 3);
        for i in 0..20 {
            s.test_write_string(&format!("\x1b[{}mX\x1b[H", 31 + (i % 6)));
        }
        assert!(s.active_page().verify_integrity().is_ok());
    }
}
