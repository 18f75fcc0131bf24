// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! VT mutator operations, grouped by protocol area.
//!
//! The screen's action dispatch is a thin shim: each parser action routes
//! to the matching `*_ops` module here, which holds the actual buffer
//! logic. One module per protocol area keeps navigation predictable:
//!
//! - [`char_ops`] - printables: narrow, wide (spacer cells), zero-width
//!   (grapheme append), soft wrap, insert mode.
//! - [`control_ops`] - C0 controls.
//! - [`csi_ops`] - CSI routing to the modules below.
//! - [`cursor_ops`] - cursor movement and save/restore.
//! - [`erase_ops`] - ED/EL/ECH/ICH/DCH/IL/DL.
//! - [`scroll_ops`] - scroll region and SU/SD/IND/RI.
//! - [`sgr_ops`] - graphic rendition, including colon subparameters.
//! - [`mode_ops`] - SM/RM for the modes this layer tracks.
//! - [`esc_ops`] - ESC dispatch (DECSC/DECRC, charsets, RIS, DECALN).
//! - [`osc_ops`] - applying parsed OSC commands to screen state.

// Attach sources.
pub mod char_ops;
pub mod control_ops;
pub mod csi_ops;
pub mod cursor_ops;
pub mod erase_ops;
pub mod esc_ops;
pub mod mode_ops;
pub mod osc_ops;
pub mod scroll_ops;
pub mod sgr_ops;
