// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Printing: the hot path.
//!
//! Width classification decides everything. Narrow glyphs take one cell;
//! wide glyphs take a `Wide` head plus a `SpacerTail`; a wide glyph that no
//! longer fits the row leaves a `SpacerHead` behind and wraps whole. Zero
//! width codepoints append to the previous cell's grapheme cluster.
//!
//! Wrap is deferred: writing into the last column sets `pending_wrap`, and
//! the *next* printable performs the wrap. That is what lets a full-width
//! line end without scrolling until there is really more output.

use unicode_width::UnicodeWidthChar;

use super::scroll_ops;
use crate::{Cell, CellContent, ColIndex, HyperlinkData, OpenHyperlink, PageError,
            RowIndex, Screen, Wide};

pub fn print(screen: &mut Screen, ch: char) {
    let ch = screen.charsets.translate(ch);
    match UnicodeWidthChar::width(ch).unwrap_or(0) {
        0 => append_zero_width(screen, ch),
        2 => print_wide(screen, ch),
        _ => print_narrow(screen, ch),
    }
}

fn last_col(screen: &Screen) -> ColIndex {
    ColIndex::from(screen.cols().as_usize().saturating_sub(1))
}

/// Soft-wrap to the start of the next row: the current row is marked
/// `wrap`, the next `wrap_continuation`, scrolling if the cursor sits on
/// the bottom margin.
fn wrap_line(screen: &mut Screen) {
    let y = screen.cursor.row;
    screen.active_page_mut().get_row_mut(y).flags.set_wrap(true);
    if screen.cursor.row == screen.margins.bottom {
        scroll_ops::scroll_up(screen, 1);
    } else {
        screen.cursor.row = screen.cursor.row.saturating_add(1);
    }
    screen.cursor.col = ColIndex(0);
    screen.cursor.pending_wrap = false;
    let y = screen.cursor.row;
    screen
        .active_page_mut()
        .get_row_mut(y)
        .flags
        .set_wrap_continuation(true);
}

/// Write one cell at the cursor row, breaking any wide pair it lands on.
fn write_cell(screen: &mut Screen, y: RowIndex, x: ColIndex, ch: char, wide: Wide) {
    // Overwriting half of a wide glyph blanks the other half.
    let existing = *screen.active_page().get_cell(y, x);
    match existing.wide {
        Wide::SpacerTail if x.as_usize() > 0 => {
            let head_x = x.saturating_sub(1);
            screen.active_page_mut().put_cell(y, head_x, Cell::blank());
        }
        Wide::Wide => {
            let tail_x = x.saturating_add(1);
            if !tail_x.overflows(screen.cols()) {
                screen.active_page_mut().put_cell(y, tail_x, Cell::blank());
            }
        }
        _ => {}
    }

    let style_id = screen.intern_cursor_style();
    let protected = screen.pending_protect;
    screen.active_page_mut().put_cell(
        y,
        x,
        Cell {
            content: CellContent::Codepoint(ch),
            style_id,
            wide,
            protected,
            hyperlink: false,
        },
    );
    if let Some(link) = screen.current_hyperlink.clone() {
        attach_hyperlink(screen, y, x, &link);
    }
}

fn attach_hyperlink(screen: &mut Screen, y: RowIndex, x: ColIndex, link: &OpenHyperlink) {
    let data = HyperlinkData {
        id: link.id.as_deref(),
        uri: &link.uri,
    };
    match attach_once(screen, y, x, data) {
        Ok(()) => {}
        Err(PageError::HyperlinkSetNeedsRehash) => {
            screen.active_page_mut().rehash_hyperlinks();
            if let Err(error) = attach_once(screen, y, x, data) {
                tracing::warn!("print: dropping hyperlink after rehash: {error}");
            }
        }
        Err(_) => {
            // Pool exhausted: migrate to a bigger page and retry once.
            screen.grow_active_page();
            if let Err(error) = attach_once(screen, y, x, data) {
                tracing::warn!("print: dropping hyperlink after migration: {error}");
            }
        }
    }
}

fn attach_once(
    screen: &mut Screen,
    y: RowIndex,
    x: ColIndex,
    data: HyperlinkData<'_>,
) -> Result<(), PageError> {
    let id = screen.active_page_mut().insert_hyperlink(data)?;
    screen.active_page_mut().set_hyperlink(y, x, id)
}

/// Shift cells right by `n` starting at `from` (insert mode / ICH). Cells
/// pushed past the edge are dropped.
pub(crate) fn shift_cells_right(
    screen: &mut Screen,
    y: RowIndex,
    from: ColIndex,
    n: usize,
) {
    let cols = screen.cols().as_usize();
    if n == 0 || from.as_usize() >= cols {
        return;
    }
    let n = n.min(cols - from.as_usize());
    // Cells that would fall off the edge are released first.
    let first_dropped = ColIndex::from(cols - n);
    screen
        .active_page_mut()
        .clear_cells(y, first_dropped, ColIndex::from(cols));
    for x in (from.as_usize()..cols - n).rev() {
        let x = ColIndex::from(x);
        let dst = ColIndex::from(x.as_usize() + n);
        screen.active_page_mut().move_cells(y, x, y, dst, 1);
    }
    screen
        .active_page_mut()
        .clear_cells(y, from, ColIndex::from(from.as_usize() + n));
}

fn print_narrow(screen: &mut Screen, ch: char) {
    if screen.cursor.pending_wrap && screen.modes.autowrap {
        wrap_line(screen);
    }
    let y = screen.cursor.row;
    let x = screen.cursor.col;
    if screen.modes.insert {
        shift_cells_right(screen, y, x, 1);
    }
    write_cell(screen, y, x, ch, Wide::Narrow);
    if x == last_col(screen) {
        if screen.modes.autowrap {
            screen.cursor.pending_wrap = true;
        }
    } else {
        screen.cursor.col = x.saturating_add(1);
    }
}

fn print_wide(screen: &mut Screen, ch: char) {
    if screen.cols().as_usize() < 2 {
        return;
    }
    if screen.cursor.pending_wrap && screen.modes.autowrap {
        wrap_line(screen);
    }
    let last = last_col(screen);
    if screen.cursor.col == last {
        if !screen.modes.autowrap {
            return;
        }
        // No room for both halves: leave a spacer head and push the glyph
        // whole onto the next row.
        let y = screen.cursor.row;
        screen.active_page_mut().put_cell(
            y,
            last,
            Cell {
                wide: Wide::SpacerHead,
                ..Cell::blank()
            },
        );
        wrap_line(screen);
    }
    let y = screen.cursor.row;
    let x = screen.cursor.col;
    if screen.modes.insert {
        shift_cells_right(screen, y, x, 2);
    }
    write_cell(screen, y, x, ch, Wide::Wide);
    let tail_x = x.saturating_add(1);
    write_cell(screen, y, tail_x, '\0', Wide::SpacerTail);
    if tail_x == last {
        if screen.modes.autowrap {
            screen.cursor.col = last;
            screen.cursor.pending_wrap = true;
        }
    } else {
        screen.cursor.col = tail_x.saturating_add(1);
    }
}

/// Zero-width codepoints (combining marks, ZWJ, variation selectors) join
/// the grapheme cluster of the previously written cell.
fn append_zero_width(screen: &mut Screen, ch: char) {
    let y = screen.cursor.row;
    let mut x = if screen.cursor.pending_wrap {
        last_col(screen)
    } else if screen.cursor.col.as_usize() > 0 {
        screen.cursor.col.saturating_sub(1)
    } else {
        // Nothing on this row to attach to.
        return;
    };
    // Attach to the head of a wide pair, not its spacer.
    if screen.active_page().get_cell(y, x).wide == Wide::SpacerTail
        && x.as_usize() > 0
    {
        x = x.saturating_sub(1);
    }
    match screen.active_page_mut().append_grapheme(y, x, ch) {
        Ok(()) => {}
        Err(error) => {
            tracing::debug!("print: grapheme append failed ({error}), migrating");
            screen.grow_active_page();
            if let Err(error) = screen.active_page_mut().append_grapheme(y, x, ch) {
                tracing::warn!("print: dropping zero-width codepoint: {error}");
            }
        }
    }
}
