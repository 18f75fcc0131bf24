// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! ANSI/VT byte-stream parsing: the state machine, the OSC sub-parser, and
//! DCS request classification.
//!
//! # Architecture
//!
//! - **[`vt_parser`]**: table-driven ECMA-48/VT100 state machine. One byte
//!   in, up to three actions out (exit / transition / entry, in that order).
//! - **[`osc`]**: nested parser for OSC string payloads, producing
//!   [`OscCommand`] values (titles, hyperlinks, semantic prompts, clipboard,
//!   colors, progress, notifications).
//! - **[`dcs`]**: classification of hooked DCS requests (DECRQSS, XTGETTCAP,
//!   tmux control mode) and bounded payload capture.
//!
//! The parser performs no I/O and surfaces no errors: malformed sequences are
//! absorbed by the `*_ignore` states, exactly like a hardware terminal.
//!
//! [`OscCommand`]: osc::OscCommand

// Attach sources.
pub mod dcs;
pub mod osc;
pub mod vt_parser;

// VT conformance tests (end-to-end scenarios through the public API).
#[cfg(any(test, doc))]
pub mod vt_conformance_tests;

// Re-export.
pub use dcs::*;
pub use osc::*;
pub use vt_parser::*;
