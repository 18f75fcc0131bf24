// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Parsed OSC command types.

use smallvec::SmallVec;

/// Which byte ended the OSC string. Synchronous replies to queries MUST use
/// the same delimiter so the requesting program sees the form it sent.
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum OscTerminator {
    /// `BEL` (0x07), the xterm-style terminator.
    Bel,
    /// `ST` (`ESC \` or raw 0x9C).
    St,
}

impl OscTerminator {
    /// The reply suffix matching this terminator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bel => "\x07",
            Self::St => "\x1b\\",
        }
    }
}

/// Which dynamic color an OSC 10/11/12 (or 110/111/112) addresses.
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum DynamicColorTarget {
    Foreground,
    Background,
    Cursor,
}

/// ConEmu OSC 9;4 progress states.
#[derive(Copy, Clone, PartialEq, Eq, Debug, strum_macros::Display)]
pub enum ProgressState {
    /// `0` - remove the progress indicator.
    Remove,
    /// `1` - set a specific value.
    Set,
    /// `2` - error state.
    Error,
    /// `3` - indeterminate (busy, no value).
    Indeterminate,
    /// `4` - paused.
    Paused,
}

/// FinalTerm OSC 133;A prompt kinds.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default, strum_macros::Display)]
pub enum PromptKind {
    #[default]
    Primary,
    /// `k=c` - continuation line of a multi-line prompt.
    Continuation,
    /// `k=s` - secondary prompt.
    Secondary,
    /// `k=r` - right-aligned prompt.
    RightAligned,
}

/// One `key[=value]` item of a kitty color protocol (OSC 21) payload.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct KittyColorItem {
    pub key: String,
    pub op: KittyColorOp,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum KittyColorOp {
    /// `key=?` - report the current value.
    Query,
    /// `key=spec` - set.
    Set(String),
    /// Bare `key` or `key=` - reset to default.
    Reset,
}

/// A structured OSC command, produced by [`OscParser::finish`].
///
/// All fields are owned: the sub-parser's working buffer is reused across
/// sequences, so borrowed views would dangle by the next `feed`.
///
/// [`OscParser::finish`]: super::OscParser::finish
#[derive(Clone, PartialEq, Debug)]
pub enum OscCommand {
    /// OSC 0 / OSC 2.
    ChangeWindowTitle { title: String },
    /// OSC 1.
    ChangeWindowIcon { icon: String },
    /// OSC 4 with a color spec.
    SetColor { palette: u16, spec: String },
    /// OSC 4 with `?`: reply required, mirroring `terminator`.
    ReportColor { palette: u16, terminator: OscTerminator },
    /// OSC 104. Empty `indices` resets the whole palette.
    ResetColor { indices: SmallVec<[u16; 4]> },
    /// OSC 7: working directory as a `file://` URL.
    ReportPwd { url: String },
    /// OSC 8 with a non-empty URI.
    HyperlinkStart { id: Option<String>, uri: String },
    /// OSC 8 with an empty URI.
    HyperlinkEnd,
    /// OSC 9 (iTerm2) or OSC 777;notify (urxvt).
    ShowDesktopNotification { title: String, body: String },
    /// OSC 9;4 (ConEmu). `progress` is clamped to `0..=100`.
    Progress {
        state: ProgressState,
        progress: Option<u8>,
    },
    /// OSC 10 / 11 / 12 with a color spec.
    SetDynamicColor {
        target: DynamicColorTarget,
        spec: String,
    },
    /// OSC 10 / 11 / 12 with `?`: reply required.
    ReportDynamicColor {
        target: DynamicColorTarget,
        terminator: OscTerminator,
    },
    /// OSC 110 / 111 / 112.
    ResetDynamicColor { target: DynamicColorTarget },
    /// OSC 21. `incomplete` is set when the payload was capped by the fixed
    /// working buffer (no large-payload allocator configured).
    KittyColorProtocol {
        items: Vec<KittyColorItem>,
        incomplete: bool,
        terminator: OscTerminator,
    },
    /// OSC 22.
    MouseShape { shape: String },
    /// OSC 52. `kind` defaults to `c` when the field is empty; `data` of
    /// `?` is a read request, anything else is base64 contents to write.
    ClipboardContents {
        kind: u8,
        data: String,
        incomplete: bool,
        terminator: OscTerminator,
    },
    /// OSC 133;A.
    PromptStart {
        aid: Option<String>,
        kind: PromptKind,
        redraw: bool,
    },
    /// OSC 133;B.
    PromptEnd,
    /// OSC 133;C.
    EndOfInput,
    /// OSC 133;D.
    EndOfCommand { exit_code: Option<u8> },
}
