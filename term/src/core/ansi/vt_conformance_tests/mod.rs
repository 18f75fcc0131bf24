// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! End-to-end conformance scenarios, driven through the public API only
//! ([`VtParser::feed`] and [`Screen::test_write_string`]).
//!
//! Unit tests co-located with each component cover the mechanics; the
//! scenarios here validate the full pipeline byte → action → grid the way
//! an application would see it.
//!
//! [`VtParser::feed`]: crate::VtParser::feed
//! [`Screen::test_write_string`]: crate::Screen::test_write_string

#[cfg(any(test, doc))]
pub mod test_parser_scenarios;

#[cfg(any(test, doc))]
pub mod test_screen_scenarios;
