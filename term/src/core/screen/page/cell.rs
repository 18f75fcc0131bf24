// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The packed per-position cell record.
//!
//! A [`Cell`] carries 64 bits of semantic payload with exact field widths
//! that are part of the public contract (they appear in cell equality and in
//! serialized pages):
//!
//! ```text
//! bits  0..24   content: 21-bit codepoint, palette index, or 8-8-8 RGB
//! bits 24..26   content tag (2 bits)
//! bits 26..42   style id (16 bits, 0 = default style)
//! bits 42..44   wide (2 bits)
//! bit  44       protected (DEC/ISO protection)
//! bit  45       hyperlink (a hyperlink-map entry exists for this cell)
//! ```
//!
//! [`Cell::to_bits`] / [`Cell::from_bits`] expose the packed encoding.

use super::StyleId;

/// 8-8-8 RGB triple.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self { Self { r, g, b } }

    #[must_use]
    pub const fn to_u24(self) -> u32 {
        ((self.r as u32) << 16) | ((self.g as u32) << 8) | (self.b as u32)
    }

    #[must_use]
    pub const fn from_u24(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xFF) as u8,
            g: ((value >> 8) & 0xFF) as u8,
            b: (value & 0xFF) as u8,
        }
    }
}

/// What the cell's 24 content bits hold, discriminated by the 2-bit tag.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum CellContent {
    /// A single Unicode scalar (21 bits).
    Codepoint(char),
    /// A Unicode scalar plus extra codepoints in the page's grapheme map.
    CodepointGrapheme(char),
    /// No glyph; background from a palette index (erased-with-bg cells).
    BgPalette(u8),
    /// No glyph; background from a direct RGB value.
    BgRgb(Rgb),
}

impl Default for CellContent {
    fn default() -> Self { Self::Codepoint('\0') }
}

impl CellContent {
    const TAG_CODEPOINT: u64 = 0;
    const TAG_CODEPOINT_GRAPHEME: u64 = 1;
    const TAG_BG_PALETTE: u64 = 2;
    const TAG_BG_RGB: u64 = 3;

    #[must_use]
    pub const fn is_grapheme(self) -> bool {
        matches!(self, Self::CodepointGrapheme(_))
    }

    /// The base codepoint, if the cell holds one.
    #[must_use]
    pub const fn codepoint(self) -> Option<char> {
        match self {
            Self::Codepoint(cp) | Self::CodepointGrapheme(cp) => Some(cp),
            Self::BgPalette(_) | Self::BgRgb(_) => None,
        }
    }
}

/// Wide-glyph bookkeeping. See the invariants on [`Cell`].
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, strum_macros::Display)]
#[repr(u8)]
pub enum Wide {
    /// A normal 1-column cell.
    #[default]
    Narrow = 0,
    /// The left half of a 2-column glyph; the cell to the right must be
    /// [`Wide::SpacerTail`].
    Wide = 1,
    /// The right half of a 2-column glyph. Never at column 0.
    SpacerTail = 2,
    /// A blank at the last column of a soft-wrapped row, marking that a wide
    /// glyph was pushed to the next row.
    SpacerHead = 3,
}

/// One grid position.
///
/// # Invariants
///
/// - `SpacerTail` never appears at column 0, and the cell to its left is
///   `Wide`.
/// - `SpacerHead` appears only at the last column of a wrapped row.
/// - `CodepointGrapheme` implies a grapheme-map entry for this cell, and
///   vice versa.
/// - `hyperlink` implies a hyperlink-map entry for this cell.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub struct Cell {
    pub content: CellContent,
    /// Interned style handle; 0 means the default style (no lookup).
    pub style_id: StyleId,
    pub wide: Wide,
    pub protected: bool,
    pub hyperlink: bool,
}

impl Cell {
    /// A blank cell: NUL codepoint, default style, narrow.
    #[must_use]
    pub const fn blank() -> Self {
        Self {
            content: CellContent::Codepoint('\0'),
            style_id: 0,
            wide: Wide::Narrow,
            protected: false,
            hyperlink: false,
        }
    }

    #[must_use]
    pub const fn has_text(&self) -> bool {
        match self.content.codepoint() {
            Some(cp) => cp != '\0' && cp != ' ',
            None => false,
        }
    }

    /// `true` when the cell carries nothing a renderer or selection would
    /// care about.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        !self.has_text()
            && self.style_id == 0
            && !self.hyperlink
            && matches!(self.wide, Wide::Narrow)
    }

    /// Pack into the 64-bit encoding documented in the module docs.
    #[must_use]
    pub fn to_bits(&self) -> u64 {
        let (tag, content) = match self.content {
            CellContent::Codepoint(cp) => (CellContent::TAG_CODEPOINT, cp as u64),
            CellContent::CodepointGrapheme(cp) => {
                (CellContent::TAG_CODEPOINT_GRAPHEME, cp as u64)
            }
            CellContent::BgPalette(index) => {
                (CellContent::TAG_BG_PALETTE, u64::from(index))
            }
            CellContent::BgRgb(rgb) => {
                (CellContent::TAG_BG_RGB, u64::from(rgb.to_u24()))
            }
        };
        debug_assert!(content < (1 << 24));
        content
            | (tag << 24)
            | (u64::from(self.style_id) << 26)
            | ((self.wide as u64) << 42)
            | (u64::from(self.protected) << 44)
            | (u64::from(self.hyperlink) << 45)
    }

    /// Unpack the 64-bit encoding. Unknown bit patterns fall back to blank
    /// content rather than panicking (serialized pages may come from
    /// untrusted storage).
    #[must_use]
    pub fn from_bits(bits: u64) -> Self {
        let content_bits = (bits & 0x00FF_FFFF) as u32;
        let tag = (bits >> 24) & 0b11;
        #[allow(clippy::cast_possible_truncation)]
        let style_id = ((bits >> 26) & 0xFFFF) as u16;
        let wide = match (bits >> 42) & 0b11 {
            0 => Wide::Narrow,
            1 => Wide::Wide,
            2 => Wide::SpacerTail,
            _ => Wide::SpacerHead,
        };
        let content = match tag {
            CellContent::TAG_CODEPOINT => CellContent::Codepoint(
                char::from_u32(content_bits & 0x001F_FFFF).unwrap_or('\0'),
            ),
            CellContent::TAG_CODEPOINT_GRAPHEME => CellContent::CodepointGrapheme(
                char::from_u32(content_bits & 0x001F_FFFF).unwrap_or('\0'),
            ),
            CellContent::TAG_BG_PALETTE => {
                #[allow(clippy::cast_possible_truncation)]
                let index = (content_bits & 0xFF) as u8;
                CellContent::BgPalette(index)
            }
            _ => CellContent::BgRgb(Rgb::from_u24(content_bits)),
        };
        Self {
            content,
            style_id,
            wide,
            protected: (bits >> 44) & 1 == 1,
            hyperlink: (bits >> 45) & 1 == 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_blank_cell_packs_to_zero() {
        assert_eq!(Cell::blank().to_bits(), 0);
        assert_eq!(Cell::from_bits(0), Cell::blank());
    }

    #[test]
    fn test_bits_round_trip() {
        let cells = [
            Cell {
                content: CellContent::Codepoint('A'),
                style_id: 7,
                wide: Wide::Narrow,
                protected: false,
                hyperlink: true,
            },
            Cell {
                content: CellContent::CodepointGrapheme('e'),
                style_id: 0,
                wide: Wide::Narrow,
                protected: true,
                hyperlink: false,
            },
            Cell {
                content: CellContent::Codepoint('世'),
                style_id: u16::MAX,
                wide: Wide::Wide,
                protected: false,
                hyperlink: false,
            },
            Cell {
                content: CellContent::BgPalette(196),
                style_id: 3,
                wide: Wide::SpacerTail,
                protected: false,
                hyperlink: false,
            },
            Cell {
                content: CellContent::BgRgb(Rgb::new(0x12, 0x34, 0x56)),
                style_id: 0,
                wide: Wide::SpacerHead,
                protected: false,
                hyperlink: false,
            },
        ];
        for cell in cells {
            assert_eq!(Cell::from_bits(cell.to_bits()), cell, "round trip {cell:?}");
        }
    }

    #[test]
    fn test_codepoint_uses_full_21_bits() {
        let cell = Cell {
            content: CellContent::Codepoint('\u{10FFFF}'),
            ..Cell::blank()
        };
        assert_eq!(Cell::from_bits(cell.to_bits()), cell);
    }

    #[test]
    fn test_rgb_u24_round_trip() {
        let rgb = Rgb::new(255, 128, 1);
        assert_eq!(Rgb::from_u24(rgb.to_u24()), rgb);
    }

    #[test]
    fn test_blankness() {
        assert!(Cell::blank().is_blank());
        let mut cell = Cell::blank();
        cell.content = CellContent::Codepoint(' ');
        assert!(cell.is_blank());
        cell.style_id = 1;
        assert!(!cell.is_blank());

        let mut wide = Cell::blank();
        wide.content = CellContent::Codepoint('世');
        wide.wide = Wide::Wide;
        assert!(!wide.is_blank());
    }
}
