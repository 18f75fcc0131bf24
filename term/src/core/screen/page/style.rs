// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Graphic rendition state, interned per page.

use super::Rgb;

/// Interned style handle; `0` is the default style and never hits the set.
pub type StyleId = u16;

/// A color as SGR can express it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub enum Color {
    /// Terminal default (foreground or background per position).
    #[default]
    Default,
    /// 256-color palette index.
    Palette(u8),
    /// Direct 24-bit color.
    Rgb(Rgb),
}

/// SGR underline variants (SGR 4, plus colon subparameter forms 4:0..4:5).
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default, strum_macros::Display)]
pub enum UnderlineStyle {
    #[default]
    None,
    Single,
    Double,
    Curly,
    Dotted,
    Dashed,
}

/// The full graphic rendition of a cell. Interning keys on the whole value;
/// two cells share a [`StyleId`] exactly when their styles compare equal.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Style {
    pub fg: Color,
    pub bg: Color,
    pub underline_color: Color,
    pub underline: UnderlineStyle,
    pub bold: bool,
    pub faint: bool,
    pub italic: bool,
    pub blink: bool,
    pub inverse: bool,
    pub invisible: bool,
    pub strikethrough: bool,
}

impl Style {
    #[must_use]
    pub fn is_default(&self) -> bool { *self == Self::default() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_style_is_default() {
        assert!(Style::default().is_default());
        let styled = Style {
            bold: true,
            ..Style::default()
        };
        assert!(!styled.is_default());
    }

    #[test]
    fn test_equal_styles_hash_equal() {
        use std::hash::{Hash, Hasher};
        let a = Style {
            fg: Color::Palette(1),
            underline: UnderlineStyle::Curly,
            ..Style::default()
        };
        let b = a;
        let mut ha = rustc_hash::FxHasher::default();
        let mut hb = rustc_hash::FxHasher::default();
        a.hash(&mut ha);
        b.hash(&mut hb);
        assert_eq!(ha.finish(), hb.finish());
    }
}
