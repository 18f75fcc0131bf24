// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! SGR (CSI m): graphic rendition.
//!
//! Two parameter shapes reach this module:
//!
//! - Semicolon parameters walk left-to-right, with the legacy extended
//!   color forms `38;5;n` / `38;2;r;g;b` consuming their arguments inline.
//! - Colon subparameters arrive as one chain (`38:2:r:g:b`, `4:3`); the
//!   parser guarantees a colon-separated CSI only dispatches for `m`.
//!
//! Unknown attributes are logged and skipped; they never poison the rest
//! of the sequence.

use crate::{Color, CsiSequence, Rgb, Screen, SeparatorMode, Style, UnderlineStyle};

pub fn apply(screen: &mut Screen, csi: &CsiSequence) {
    if csi.params.is_empty() {
        screen.cursor.style = Style::default();
        return;
    }
    if csi.separator == SeparatorMode::Colon {
        apply_colon_chain(screen, &csi.params);
        return;
    }
    let params = &csi.params;
    let mut i = 0;
    while i < params.len() {
        i += apply_attribute(screen, &params[i..]);
    }
}

/// Apply the attribute at the head of `params`; returns how many
/// parameters were consumed.
#[allow(clippy::too_many_lines)]
fn apply_attribute(screen: &mut Screen, params: &[u16]) -> usize {
    let style = &mut screen.cursor.style;
    match params[0] {
        0 => *style = Style::default(),
        1 => style.bold = true,
        2 => style.faint = true,
        3 => style.italic = true,
        4 => style.underline = UnderlineStyle::Single,
        5 | 6 => style.blink = true,
        7 => style.inverse = true,
        8 => style.invisible = true,
        9 => style.strikethrough = true,
        21 => style.underline = UnderlineStyle::Double,
        22 => {
            style.bold = false;
            style.faint = false;
        }
        23 => style.italic = false,
        24 => style.underline = UnderlineStyle::None,
        25 => style.blink = false,
        27 => style.inverse = false,
        28 => style.invisible = false,
        29 => style.strikethrough = false,
        #[allow(clippy::cast_possible_truncation)]
        30..=37 => style.fg = Color::Palette((params[0] - 30) as u8),
        38 => {
            let (color, consumed) = parse_extended_color(&params[1..]);
            if let Some(color) = color {
                style.fg = color;
            }
            return consumed + 1;
        }
        39 => style.fg = Color::Default,
        #[allow(clippy::cast_possible_truncation)]
        40..=47 => style.bg = Color::Palette((params[0] - 40) as u8),
        48 => {
            let (color, consumed) = parse_extended_color(&params[1..]);
            if let Some(color) = color {
                style.bg = color;
            }
            return consumed + 1;
        }
        49 => style.bg = Color::Default,
        58 => {
            let (color, consumed) = parse_extended_color(&params[1..]);
            if let Some(color) = color {
                style.underline_color = color;
            }
            return consumed + 1;
        }
        59 => style.underline_color = Color::Default,
        #[allow(clippy::cast_possible_truncation)]
        90..=97 => style.fg = Color::Palette((params[0] - 90 + 8) as u8),
        #[allow(clippy::cast_possible_truncation)]
        100..=107 => style.bg = Color::Palette((params[0] - 100 + 8) as u8),
        other => tracing::debug!("SGR: ignoring attribute {other}"),
    }
    1
}

/// `5;n` or `2;r;g;b` following 38/48/58. Returns the color (if complete)
/// and the parameter count consumed.
fn parse_extended_color(params: &[u16]) -> (Option<Color>, usize) {
    match params.first() {
        Some(5) => match params.get(1) {
            #[allow(clippy::cast_possible_truncation)]
            Some(&index) => (Some(Color::Palette(index.min(255) as u8)), 2),
            None => (None, 1),
        },
        Some(2) => {
            if params.len() >= 4 {
                #[allow(clippy::cast_possible_truncation)]
                let rgb = Rgb::new(
                    params[1].min(255) as u8,
                    params[2].min(255) as u8,
                    params[3].min(255) as u8,
                );
                (Some(Color::Rgb(rgb)), 4)
            } else {
                tracing::debug!("SGR: truncated direct-color sequence");
                (None, params.len())
            }
        }
        Some(other) => {
            tracing::debug!("SGR: unknown extended color mode {other}");
            (None, 1)
        }
        None => (None, 0),
    }
}

/// A colon chain is a single attribute with subparameters.
fn apply_colon_chain(screen: &mut Screen, params: &[u16]) {
    let style = &mut screen.cursor.style;
    match params.first() {
        // 4:0 .. 4:5 select an underline shape.
        Some(4) => {
            style.underline = match params.get(1) {
                None | Some(0) => UnderlineStyle::None,
                Some(1) => UnderlineStyle::Single,
                Some(2) => UnderlineStyle::Double,
                Some(3) => UnderlineStyle::Curly,
                Some(4) => UnderlineStyle::Dotted,
                Some(5) => UnderlineStyle::Dashed,
                Some(other) => {
                    tracing::debug!("SGR: ignoring underline shape {other}");
                    return;
                }
            };
        }
        Some(38) => {
            let (color, _) = parse_extended_color(&params[1..]);
            if let Some(color) = color {
                style.fg = color;
            }
        }
        Some(48) => {
            let (color, _) = parse_extended_color(&params[1..]);
            if let Some(color) = color {
                style.bg = color;
            }
        }
        Some(58) => {
            let (color, _) = parse_extended_color(&params[1..]);
            if let Some(color) = color {
                style.underline_color = color;
            }
        }
        Some(other) => tracing::debug!("SGR: ignoring colon chain head {other}"),
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{PageCapacity, RowAddr, TermConfig, col, row};

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
    fn test_basic_attributes() {
        let mut s = screen();
        s.test_write_string("\x1b[1;4;31m");
        assert!(s.cursor().style.bold);
        assert_eq!(s.cursor().style.underline, UnderlineStyle::Single);
        assert_eq!(s.cursor().style.fg, Color::Palette(1));

        s.test_write_string("\x1b[22;24m");
        assert!(!s.cursor().style.bold);
        assert_eq!(s.cursor().style.underline, UnderlineStyle::None);

        s.test_write_string("\x1b[0m");
        assert!(s.cursor().style.is_default());
    }

    #[test]
    fn test_256_and_rgb_colors_semicolon_form() {
        let mut s = screen();
        s.test_write_string("\x1b[38;5;196m");
        assert_eq!(s.cursor().style.fg, Color::Palette(196));
        s.test_write_string("\x1b[48;2;10;20;30m");
        assert_eq!(s.cursor().style.bg, Color::Rgb(Rgb::new(10, 20, 30)));
    }

    #[test]
    fn test_rgb_colors_colon_form() {
        let mut s = screen();
        s.test_write_string("\x1b[38:2:255:0:128m");
        assert_eq!(s.cursor().style.fg, Color::Rgb(Rgb::new(255, 0, 128)));
    }

    #[test]
    fn test_curly_underline_colon_form() {
        let mut s = screen();
        s.test_write_string("\x1b[4:3m");
        assert_eq!(s.cursor().style.underline, UnderlineStyle::Curly);
        s.test_write_string("\x1b[4:0m");
        assert_eq!(s.cursor().style.underline, UnderlineStyle::None);
    }

    #[test]
    fn test_bright_colors() {
        let mut s = screen();
        s.test_write_string("\x1b[91;104m");
        assert_eq!(s.cursor().style.fg, Color::Palette(9));
        assert_eq!(s.cursor().style.bg, Color::Palette(12));
    }

    #[test]
    fn test_unknown_attribute_does_not_poison_rest() {
        let mut s = screen();
        s.test_write_string("\x1b[99;1m");
        assert!(s.cursor().style.bold);
    }

    #[test]
    fn test_styled_cells_intern_into_page() {
        let mut s = screen();
        s.test_write_string("\x1b[1mB\x1b[0mp");
        let bold_cell = s.get_cell(RowAddr::Active(row(0)), col(0));
        assert_ne!(bold_cell.style_id, 0);
        let plain_cell = s.get_cell(RowAddr::Active(row(0)), col(1));
        assert_eq!(plain_cell.style_id, 0);
        let page = s.active_page();
        assert!(page.style(bold_cell.style_id).unwrap().bold);
    }

    #[test]
    fn test_truncated_rgb_ignored() {
        let mut s = screen();
        s.test_write_string("\x1b[38;2;10m");
        assert_eq!(s.cursor().style.fg, Color::Default);
    }
}
