// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Table-driven VT100/ECMA-48 escape sequence state machine.
//!
//! # Where you are in the pipeline
//!
//! ```text
//! PTY bytes
//!    ↓
//! ┌──▼───────────────────────────────────────┐
//! │  VtParser::feed(byte)                    │  ← **YOU ARE HERE**
//! │  • anywhere-first table lookup           │
//! │  • param / intermediate accumulation     │
//! │  • UTF-8 side state                      │
//! └──────────────────────────────────────────┘
//!    │ (up to three actions per byte)
//!    ├─→ Print / Execute           (ground)
//!    ├─→ CsiDispatch / EscDispatch (sequence final bytes)
//!    ├─→ OscDispatch               (OSC sub-parser, on string exit)
//!    └─→ DcsHook / DcsPut / DcsUnhook
//!    ↓
//! Screen mutators (apply the actions to the grid)
//! ```
//!
//! # Module layout
//!
//! - [`state`] - the 15 machine states plus the `anywhere` lookup row.
//! - [`transition_table`] - the const 256 × state table, built at compile
//!   time from the DEC ANSI parser reference with two extensions (a `utf8`
//!   state off `ground`, and `:` accepted as a CSI parameter separator).
//! - [`param`] - saturating 16-slot parameter buffer with separator
//!   tracking.
//! - [`action`] - the emitted action types and the three-slot return value.
//! - [`parser`] - the driver that owns the buffers and walks the table.

// Attach sources.
pub mod action;
pub mod param;
pub mod parser;
pub mod state;
pub mod transition_table;

// Re-export.
pub use action::*;
pub use param::*;
pub use parser::*;
pub use state::*;
pub use transition_table::*;
