// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Outbound events: things the embedding program must act on.
//!
//! The core does no I/O. Commands it cannot fully absorb into the grid
//! (notifications, clipboard, color queries, DCS requests, reply-demanding
//! reports) are queued as [`ScreenEvent`]s for the embedder to drain with
//! `Screen::drain_events`. Query events carry the terminator of the request
//! so the reply can mirror it.

use crate::{DcsEvent, OscCommand};

#[derive(Clone, PartialEq, Debug)]
pub enum ScreenEvent {
    /// BEL executed in the output stream.
    Bell,
    /// An OSC command for the embedder: notifications, clipboard, palette
    /// and dynamic-color operations, kitty color protocol.
    Osc(OscCommand),
    /// A completed DCS request (DECRQSS, XTGETTCAP, tmux control mode).
    Dcs(DcsEvent),
    /// DSR 6: the program asked where the cursor is (1-based coordinates).
    CursorPositionReport { row: u16, col: u16 },
    /// DA1: the program asked what this terminal is.
    PrimaryDeviceAttributes,
}
