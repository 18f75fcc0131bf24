// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Selection geometry over pinned screen coordinates.
//!
//! A selection is two [`Pin`]s plus a rectangle flag. Nothing is ordered at
//! rest: the user may drag in any direction, so ordering is derived on
//! demand from the pin positions. Rectangle selections need four order
//! tags because the two diagonals are distinct (a drag from the top-right
//! to the bottom-left covers different cells than top-left to
//! bottom-right).
//!
//! All movement goes through [`Selection::adjust`], which always moves the
//! **end** pin; that is what makes drag-in-either-direction feel natural.

use super::{Pin, PinPos, Screen};
use crate::{ColIndex, RowIndex};

/// Derived orientation of a selection.
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum SelectionOrder {
    /// Start is at or before the end (top-left → bottom-right for
    /// rectangles).
    Forward,
    /// End precedes start.
    Reverse,
    /// Rectangles only: top-right → bottom-left.
    MirroredForward,
    /// Rectangles only: bottom-left → top-right.
    MirroredReverse,
}

/// Directional adjustments for [`Selection::adjust`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum SelectionAdjustment {
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    BeginningOfLine,
    EndOfLine,
}

#[derive(Clone, Debug)]
pub struct Selection {
    start: Pin,
    end: Pin,
    rectangle: bool,
}

impl Selection {
    /// Create a selection with both endpoints tracked by the screen, so
    /// they stay anchored while scrollback trims.
    pub fn new(
        screen: &mut Screen,
        start: PinPos,
        end: PinPos,
        rectangle: bool,
    ) -> Self {
        Self {
            start: screen.track_pin(start),
            end: screen.track_pin(end),
            rectangle,
        }
    }

    #[must_use]
    pub fn start(&self) -> PinPos { self.start.get() }

    #[must_use]
    pub fn end(&self) -> PinPos { self.end.get() }

    #[must_use]
    pub fn is_rectangle(&self) -> bool { self.rectangle }

    /// Derive the orientation from the pin positions. Non-rectangular
    /// selections are always exactly `Forward` or `Reverse` (total order).
    #[must_use]
    pub fn order(&self) -> SelectionOrder {
        let start = self.start();
        let end = self.end();
        if self.rectangle {
            if start.row <= end.row && start.col <= end.col {
                SelectionOrder::Forward
            } else if start.row <= end.row {
                SelectionOrder::MirroredForward
            } else if start.col <= end.col {
                SelectionOrder::MirroredReverse
            } else {
                SelectionOrder::Reverse
            }
        } else if (start.row, start.col) <= (end.row, end.col) {
            SelectionOrder::Forward
        } else {
            SelectionOrder::Reverse
        }
    }

    /// The endpoint pair re-expressed in the desired orientation, without
    /// changing the covered region.
    #[must_use]
    pub fn ordered(&self, desired: SelectionOrder) -> (PinPos, PinPos) {
        let top_left = self.top_left();
        let bottom_right = self.bottom_right();
        let top_right = PinPos::new(top_left.row, bottom_right.col);
        let bottom_left = PinPos::new(bottom_right.row, top_left.col);
        match desired {
            SelectionOrder::Forward => (top_left, bottom_right),
            SelectionOrder::Reverse => (bottom_right, top_left),
            SelectionOrder::MirroredForward => (top_right, bottom_left),
            SelectionOrder::MirroredReverse => (bottom_left, top_right),
        }
    }

    /// Normalized axis-aligned bounding box corner.
    #[must_use]
    pub fn top_left(&self) -> PinPos {
        let start = self.start();
        let end = self.end();
        if self.rectangle {
            PinPos::new(start.row.min(end.row), start.col.min(end.col))
        } else {
            match self.order() {
                SelectionOrder::Forward => start,
                _ => end,
            }
        }
    }

    #[must_use]
    pub fn bottom_right(&self) -> PinPos {
        let start = self.start();
        let end = self.end();
        if self.rectangle {
            PinPos::new(start.row.max(end.row), start.col.max(end.col))
        } else {
            match self.order() {
                SelectionOrder::Forward => end,
                _ => start,
            }
        }
    }

    /// Whether the given position is inside the selected region.
    #[must_use]
    pub fn contains(&self, pos: PinPos) -> bool {
        let top_left = self.top_left();
        let bottom_right = self.bottom_right();
        if pos.row < top_left.row || pos.row > bottom_right.row {
            return false;
        }
        if self.rectangle {
            return pos.col >= top_left.col && pos.col <= bottom_right.col;
        }
        let on_first = pos.row == top_left.row;
        let on_last = pos.row == bottom_right.row;
        match (on_first, on_last) {
            (true, true) => pos.col >= top_left.col && pos.col <= bottom_right.col,
            (true, false) => pos.col >= top_left.col,
            (false, true) => pos.col <= bottom_right.col,
            (false, false) => true,
        }
    }

    /// Whether the position's row intersects the selection at all.
    #[must_use]
    pub fn contains_row(&self, pos: PinPos) -> bool {
        pos.row >= self.top_left().row && pos.row <= self.bottom_right().row
    }

    /// The clipped single-row span of this selection on the given row, as
    /// a (start, end) position pair. `None` when the row is outside.
    #[must_use]
    pub fn contained_row(&self, screen: &Screen, pos: PinPos) -> Option<(PinPos, PinPos)> {
        let top_left = self.top_left();
        let bottom_right = self.bottom_right();
        if pos.row < top_left.row || pos.row > bottom_right.row {
            return None;
        }
        let last_col = ColIndex::from(screen.cols().as_usize().saturating_sub(1));
        let (left, right) = if self.rectangle {
            (top_left.col, bottom_right.col)
        } else if pos.row == top_left.row && pos.row == bottom_right.row {
            (top_left.col, bottom_right.col)
        } else if pos.row == top_left.row {
            (top_left.col, last_col)
        } else if pos.row == bottom_right.row {
            (ColIndex(0), bottom_right.col)
        } else {
            (ColIndex(0), last_col)
        };
        Some((
            PinPos::new(pos.row, left),
            PinPos::new(pos.row, right),
        ))
    }

    /// Row-range intersection.
    #[must_use]
    pub fn within(&self, start: RowIndex, end: RowIndex) -> bool {
        let top = self.top_left().row;
        let bottom = self.bottom_right().row;
        top <= end && start <= bottom
    }

    /// The selection corners translated to viewport coordinates, clamped to
    /// the visible rows. `None` when fully off screen.
    #[must_use]
    pub fn to_viewport(&self, screen: &Screen) -> Option<(PinPos, PinPos)> {
        let viewport_top = screen.viewport_top().as_usize();
        let viewport_bottom = viewport_top + screen.rows().as_usize() - 1;
        let top_left = self.top_left();
        let bottom_right = self.bottom_right();
        if bottom_right.row.as_usize() < viewport_top
            || top_left.row.as_usize() > viewport_bottom
        {
            return None;
        }
        let clamp = |pos: PinPos, clamp_col: ColIndex| -> PinPos {
            if pos.row.as_usize() < viewport_top {
                PinPos::new(RowIndex(0), clamp_col)
            } else {
                PinPos::new(
                    RowIndex::from(pos.row.as_usize() - viewport_top),
                    pos.col,
                )
            }
        };
        let last_col = ColIndex::from(screen.cols().as_usize().saturating_sub(1));
        let top = clamp(top_left, ColIndex(0));
        let bottom = if bottom_right.row.as_usize() > viewport_bottom {
            PinPos::new(
                RowIndex::from(viewport_bottom - viewport_top),
                last_col,
            )
        } else {
            clamp(bottom_right, ColIndex(0))
        };
        Some((top, bottom))
    }

    /// Directionally adjust the selection. Always moves the **end** pin.
    pub fn adjust(&self, screen: &Screen, adjustment: SelectionAdjustment) {
        let pos = self.end.get();
        let last_col = ColIndex::from(screen.cols().as_usize().saturating_sub(1));
        let last_row = screen.last_content_row();
        let page = screen.rows().as_usize();

        let new_pos = match adjustment {
            SelectionAdjustment::Left => {
                if pos.col == ColIndex(0) {
                    if pos.row == RowIndex(0) {
                        pos
                    } else {
                        let prev = pos.row.saturating_sub(1);
                        let col = screen
                            .last_content_col(prev)
                            .unwrap_or(ColIndex(0));
                        PinPos::new(prev, col)
                    }
                } else {
                    PinPos::new(pos.row, pos.col.saturating_sub(1))
                }
            }
            SelectionAdjustment::Right => {
                let row_end = screen.last_content_col(pos.row).unwrap_or(ColIndex(0));
                if (pos.col >= row_end || pos.col == last_col)
                    && pos.row < last_row
                {
                    // Past the content (or the edge): wrap to the next row.
                    PinPos::new(pos.row.saturating_add(1), ColIndex(0))
                } else if pos.row >= last_row {
                    // On the final row, clamp to its end.
                    let end = screen
                        .last_content_col(last_row)
                        .unwrap_or(last_col);
                    PinPos::new(last_row, pos.col.saturating_add(1).min(end))
                } else {
                    PinPos::new(pos.row, pos.col.saturating_add(1))
                }
            }
            SelectionAdjustment::Up => {
                if pos.row == RowIndex(0) {
                    PinPos::new(RowIndex(0), ColIndex(0))
                } else {
                    PinPos::new(pos.row.saturating_sub(1), pos.col)
                }
            }
            SelectionAdjustment::Down => {
                if pos.row >= last_row {
                    // Stop at the last contentful row, clamped to its end.
                    let end = screen
                        .last_content_col(last_row)
                        .unwrap_or(last_col);
                    PinPos::new(last_row, end)
                } else {
                    PinPos::new(pos.row.saturating_add(1), pos.col)
                }
            }
            SelectionAdjustment::Home => PinPos::new(RowIndex(0), ColIndex(0)),
            SelectionAdjustment::End => {
                let end = screen.last_content_col(last_row).unwrap_or(last_col);
                PinPos::new(last_row, end)
            }
            SelectionAdjustment::PageUp => {
                #[allow(clippy::cast_possible_truncation)]
                let delta = page.min(u16::MAX as usize) as u16;
                PinPos::new(pos.row.saturating_sub(delta), pos.col)
            }
            SelectionAdjustment::PageDown => {
                #[allow(clippy::cast_possible_truncation)]
                let delta = page.min(u16::MAX as usize) as u16;
                let target = pos.row.saturating_add(delta);
                if target >= last_row {
                    let end = screen
                        .last_content_col(last_row)
                        .unwrap_or(last_col);
                    PinPos::new(last_row, end)
                } else {
                    PinPos::new(target, pos.col)
                }
            }
            SelectionAdjustment::BeginningOfLine => {
                PinPos::new(pos.row, ColIndex(0))
            }
            SelectionAdjustment::EndOfLine => {
                let end = screen.last_content_col(pos.row).unwrap_or(last_col);
                PinPos::new(pos.row, end)
            }
        };
        self.end.set(new_pos);
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{PageCapacity, Scroll, TermConfig, col, row};

    /// The canonical fixture: a 5×4 screen filled with
    /// `A1234 / B5678 / C1234 / D5678`.
    fn filled_screen() -> Screen {
        let mut screen = Screen::new(TermConfig {
            page: PageCapacity {
                cols: 5,
                rows: 4,
                ..PageCapacity::default()
            },
            scrollback_rows: 100,
            ..TermConfig::default()
        });
        screen.test_write_string("A1234\r\nB5678\r\nC1234\r\nD5678");
        screen
    }

    fn pos(x: u16, y: u16) -> PinPos { PinPos::new(row(y), col(x)) }

    #[test]
    fn test_order_is_total_for_linear_selections() {
        let mut screen = filled_screen();
        let forward = Selection::new(&mut screen, pos(1, 0), pos(3, 2), false);
        assert_eq!(forward.order(), SelectionOrder::Forward);
        let reverse = Selection::new(&mut screen, pos(3, 2), pos(1, 0), false);
        assert_eq!(reverse.order(), SelectionOrder::Reverse);
        // Same row, leftward drag.
        let same_row = Selection::new(&mut screen, pos(4, 1), pos(0, 1), false);
        assert_eq!(same_row.order(), SelectionOrder::Reverse);
    }

    #[test]
    fn test_rectangle_orders_cover_both_diagonals() {
        let mut screen = filled_screen();
        let cases = [
            (pos(0, 0), pos(3, 2), SelectionOrder::Forward),
            (pos(3, 2), pos(0, 0), SelectionOrder::Reverse),
            (pos(3, 0), pos(0, 2), SelectionOrder::MirroredForward),
            (pos(0, 2), pos(3, 0), SelectionOrder::MirroredReverse),
        ];
        for (start, end, expected) in cases {
            let selection = Selection::new(&mut screen, start, end, true);
            assert_eq!(selection.order(), expected, "{start:?} -> {end:?}");
        }
    }

    #[test]
    fn test_top_left_bottom_right_normalize() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(3, 2), pos(1, 0), false);
        assert_eq!(selection.top_left(), pos(1, 0));
        assert_eq!(selection.bottom_right(), pos(3, 2));

        let rect = Selection::new(&mut screen, pos(3, 0), pos(0, 2), true);
        assert_eq!(rect.top_left(), pos(0, 0));
        assert_eq!(rect.bottom_right(), pos(3, 2));
    }

    #[test]
    fn test_ordered_preserves_region() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(3, 0), pos(0, 2), true);
        let (start, end) = selection.ordered(SelectionOrder::Forward);
        assert_eq!((start, end), (pos(0, 0), pos(3, 2)));
        let (start, end) = selection.ordered(SelectionOrder::MirroredReverse);
        assert_eq!((start, end), (pos(0, 2), pos(3, 0)));
    }

    #[test]
    fn test_linear_containment() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(3, 0), pos(1, 2), false);
        assert!(selection.contains(pos(3, 0)));
        assert!(selection.contains(pos(4, 0)), "first row extends to the edge");
        assert!(!selection.contains(pos(2, 0)), "before the start column");
        assert!(selection.contains(pos(0, 1)), "middle rows are fully covered");
        assert!(selection.contains(pos(1, 2)));
        assert!(!selection.contains(pos(2, 2)), "past the end column");
        assert!(!selection.contains(pos(0, 3)));
    }

    #[test]
    fn test_rectangle_containment() {
        let mut screen = filled_screen();
        let rect = Selection::new(&mut screen, pos(1, 0), pos(3, 2), true);
        assert!(rect.contains(pos(2, 1)));
        assert!(!rect.contains(pos(0, 1)), "outside the column band");
        assert!(!rect.contains(pos(4, 1)));
    }

    #[test]
    fn test_contained_row_clips() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(3, 0), pos(1, 2), false);
        let (start, end) = selection.contained_row(&screen, pos(0, 0)).unwrap();
        assert_eq!((start, end), (pos(3, 0), pos(4, 0)));
        let (start, end) = selection.contained_row(&screen, pos(0, 1)).unwrap();
        assert_eq!((start, end), (pos(0, 1), pos(4, 1)));
        let (start, end) = selection.contained_row(&screen, pos(0, 2)).unwrap();
        assert_eq!((start, end), (pos(0, 2), pos(1, 2)));
        assert!(selection.contained_row(&screen, pos(0, 3)).is_none());
    }

    #[test]
    fn test_within_row_ranges() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(0, 1), pos(4, 2), false);
        assert!(selection.within(row(0), row(1)));
        assert!(selection.within(row(2), row(3)));
        assert!(!selection.within(row(3), row(3)));
    }

    #[test]
    fn test_adjust_right_wraps_at_row_end() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(4, 1), pos(4, 2), false);
        selection.adjust(&screen, SelectionAdjustment::Right);
        assert_eq!(selection.end(), pos(0, 3));
        assert_eq!(selection.start(), pos(4, 1), "start pin never moves");
    }

    #[test]
    fn test_adjust_left_wraps_to_previous_row_end() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(2, 1), pos(0, 2), false);
        selection.adjust(&screen, SelectionAdjustment::Left);
        assert_eq!(selection.end(), pos(4, 1));
        selection.adjust(&screen, SelectionAdjustment::Left);
        assert_eq!(selection.end(), pos(3, 1));
    }

    #[test]
    fn test_adjust_up_clamps_to_origin() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(2, 2), pos(2, 0), false);
        selection.adjust(&screen, SelectionAdjustment::Up);
        assert_eq!(selection.end(), pos(0, 0), "row 0 clamps to column 0 too");
    }

    #[test]
    fn test_adjust_down_stops_at_last_content_row() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(0, 0), pos(2, 3), false);
        selection.adjust(&screen, SelectionAdjustment::Down);
        assert_eq!(selection.end(), pos(4, 3), "clamped to end of last row");
    }

    #[test]
    fn test_adjust_line_motions() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(0, 0), pos(2, 1), false);
        selection.adjust(&screen, SelectionAdjustment::EndOfLine);
        assert_eq!(selection.end(), pos(4, 1));
        selection.adjust(&screen, SelectionAdjustment::BeginningOfLine);
        assert_eq!(selection.end(), pos(0, 1));
    }

    #[test]
    fn test_adjust_home_end_page_motions() {
        let mut screen = filled_screen();
        let selection = Selection::new(&mut screen, pos(1, 1), pos(2, 1), false);
        selection.adjust(&screen, SelectionAdjustment::End);
        assert_eq!(selection.end(), pos(4, 3));
        selection.adjust(&screen, SelectionAdjustment::Home);
        assert_eq!(selection.end(), pos(0, 0));
        selection.adjust(&screen, SelectionAdjustment::PageDown);
        assert_eq!(selection.end(), pos(4, 3), "page down clamps to content");
        selection.adjust(&screen, SelectionAdjustment::PageUp);
        assert_eq!(selection.end(), pos(4, 0) /* column kept */);
    }

    #[test]
    fn test_selection_survives_scrollback_trim() {
        let mut screen = Screen::new(TermConfig {
            page: PageCapacity {
                cols: 5,
                rows: 2,
                ..PageCapacity::default()
            },
            scrollback_rows: 50,
            ..TermConfig::default()
        });
        screen.test_write_string("aa\r\nbb");
        let selection = Selection::new(&mut screen, pos(0, 1), pos(1, 1), false);
        // 'bb' sits on absolute row 1; scroll output past it.
        screen.test_write_string("\r\ncc\r\ndd");
        assert_eq!(selection.start().row, row(1), "pin keeps its absolute row");
        assert_eq!(screen.row_text(crate::RowAddr::Screen(selection.start().row)), "bb");
        screen.scroll(Scroll::Top);
        assert_eq!(screen.row_text(crate::RowAddr::Viewport(row(1))), "bb");
    }
}
