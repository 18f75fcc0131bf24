// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! # `r3bl_term`
//!
//! The data plane of a terminal emulator: everything between "raw bytes arrive
//! from the PTY" and "a structured, addressable screen model exists", with
//! nothing else attached. No I/O, no rendering, no keyboard handling - those
//! are thin collaborators that live in the embedding program.
//!
//! # Pipeline
//!
//! ```text
//! PTY bytes ──► VT Parser ──► Action Stream ──► Screen Mutators ──► Screen Model
//!                 │                                                      ▲
//!                 └─► OSC Sub-parser ──► OscCommand ──────────► (Screen / caller)
//!                                                                        │
//!                                            Selection / Viewport ◄──────┘
//! ```
//!
//! # Subsystems
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`core::ansi::vt_parser`] | Table-driven VT100/ECMA-48 state machine. One byte in, up to three actions out. |
//! | [`core::ansi::osc`] | OSC payload sub-parser: titles, hyperlinks, OSC 133 semantic prompts, OSC 52 clipboard, kitty colors, progress. |
//! | [`core::ansi::dcs`] | DCS request classification (DECRQSS, XTGETTCAP, tmux control mode). |
//! | [`core::screen::page`] | Fixed-capacity grid pages: packed cells, interned styles, grapheme & hyperlink arenas, dirty tracking. |
//! | [`core::screen`] | Page list + circular scrollback, viewport, pins, cursor, margins, and the VT mutator operations. |
//! | [`core::screen::selection`] | Linear and rectangular selection geometry over pinned coordinates. |
//!
//! # Design constraints
//!
//! - The parser never surfaces errors: malformed sequences are absorbed by the
//!   `*_ignore` states and dropped, exactly like hardware terminals do.
//! - Page-internal references are typed `u32` offsets, never host pointers, so
//!   a page deep-copies without pointer patching and can be serialized by the
//!   embedding program.
//! - Everything here is single-threaded by contract: one reader task owns the
//!   screen, renderers work from cloned pages. See the concurrency notes on
//!   [`core::screen::Screen`].
//!
//! # Quick start
//!
//! ```
//! use r3bl_term::{Screen, TermConfig};
//!
//! let mut screen = Screen::new(TermConfig::default());
//! screen.test_write_string("hello \x1b[1mworld\x1b[0m");
//! assert_eq!(screen.active_row_text(r3bl_term::row(0)), "hello world");
//! ```

// Enable strict error handling in production code only (tests are exempt).
#![cfg_attr(not(test), deny(clippy::unwrap_in_result))]

pub mod core;

// Re-export.
pub use crate::core::*;
