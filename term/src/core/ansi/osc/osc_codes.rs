// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! OSC numeric prefixes and related byte constants.

/// OSC 0: set both window title and icon name.
pub const OSC_CODE_TITLE_AND_ICON: &str = "0";
/// OSC 1: set icon name only.
pub const OSC_CODE_ICON: &str = "1";
/// OSC 2: set window title only.
pub const OSC_CODE_TITLE: &str = "2";
/// OSC 4: set / query a palette color.
pub const OSC_CODE_PALETTE: &str = "4";
/// OSC 7: report working directory (file:// URL).
pub const OSC_CODE_PWD: &str = "7";
/// OSC 8: hyperlink.
pub const OSC_CODE_HYPERLINK: &str = "8";
/// OSC 9: iTerm2 desktop notification, or ConEmu progress when the payload
/// continues with `4;`.
pub const OSC_CODE_NOTIFY_OR_PROGRESS: &str = "9";
/// OSC 10: set / query default foreground.
pub const OSC_CODE_FOREGROUND: &str = "10";
/// OSC 11: set / query default background.
pub const OSC_CODE_BACKGROUND: &str = "11";
/// OSC 12: set / query cursor color.
pub const OSC_CODE_CURSOR_COLOR: &str = "12";
/// OSC 21: kitty color protocol.
pub const OSC_CODE_KITTY_COLOR: &str = "21";
/// OSC 22: mouse pointer shape.
pub const OSC_CODE_MOUSE_SHAPE: &str = "22";
/// OSC 52: clipboard contents.
pub const OSC_CODE_CLIPBOARD: &str = "52";
/// OSC 104: reset palette color(s).
pub const OSC_CODE_RESET_PALETTE: &str = "104";
/// OSC 110: reset default foreground.
pub const OSC_CODE_RESET_FOREGROUND: &str = "110";
/// OSC 111: reset default background.
pub const OSC_CODE_RESET_BACKGROUND: &str = "111";
/// OSC 112: reset cursor color.
pub const OSC_CODE_RESET_CURSOR_COLOR: &str = "112";
/// OSC 133: semantic prompt marks (FinalTerm protocol).
pub const OSC_CODE_SEMANTIC_PROMPT: &str = "133";
/// OSC 777: urxvt extension namespace; only `notify` is recognized.
pub const OSC_CODE_URXVT: &str = "777";

/// Sub-code of OSC 9 that switches it from notification to progress.
pub const OSC_9_PROGRESS_SUBCODE: &str = "4";
/// Sub-command of OSC 777 for desktop notifications.
pub const OSC_777_NOTIFY: &str = "notify";

/// Fixed working buffer size backing most OSC fields. Fields that may
/// legitimately exceed it (clipboard, kitty color lists) need the
/// large-payload allocator; see [`OscParser`].
///
/// [`OscParser`]: super::OscParser
pub const OSC_WORKING_BUFFER_SIZE: usize = 2048;
