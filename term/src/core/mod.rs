// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

// Attach sources.
pub mod ansi;
pub mod common;
pub mod config;
pub mod screen;
pub mod units;

// Re-export.
pub use ansi::*;
pub use common::*;
pub use config::*;
pub use screen::*;
pub use units::*;
