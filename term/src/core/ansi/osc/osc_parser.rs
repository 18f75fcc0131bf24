// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The OSC payload accumulator and command parser.
//!
//! Payload bytes arrive one at a time via [`OscParser::put`] while the main
//! state machine sits in `osc_string`; the terminating byte triggers
//! [`OscParser::finish`], which parses the accumulated payload
//! left-to-right into at most one [`OscCommand`].
//!
//! # Buffer policy
//!
//! A fixed working buffer of [`OSC_WORKING_BUFFER_SIZE`] bytes backs most
//! fields. Two commands can legitimately exceed it - OSC 52 clipboard
//! contents and OSC 21 kitty color lists - and only grow when the parser
//! was built with `large_payloads` (the allocator opt-in); otherwise the
//! payload is silently capped and the command carries `incomplete: true`.
//! Growth is bounded by `max_bytes`; exceeding that invalidates the whole
//! sequence, which then yields no command.
//!
//! # Validation
//!
//! Unknown options and keys are logged and skipped without poisoning later
//! fields of the same command. Numeric parameters saturate at `u16::MAX`;
//! progress values clamp to `0..=100`.

use smallvec::SmallVec;

use super::{DynamicColorTarget, KittyColorItem, KittyColorOp, OSC_WORKING_BUFFER_SIZE,
            OscCommand, OscTerminator, ProgressState, PromptKind, osc_codes};

#[derive(Debug)]
pub struct OscParser {
    data: Vec<u8>,
    /// Payload hit the fixed working buffer without the allocator opt-in.
    capped: bool,
    /// Payload exceeded `max_bytes`; the sequence is poisoned.
    invalid: bool,
    max_bytes: usize,
    large_payloads: bool,
}

impl OscParser {
    #[must_use]
    pub fn new(max_bytes: usize, large_payloads: bool) -> Self {
        Self {
            data: Vec::with_capacity(OSC_WORKING_BUFFER_SIZE),
            capped: false,
            invalid: false,
            max_bytes,
            large_payloads,
        }
    }

    /// Discard any partial payload. Called when the main parser enters
    /// `osc_string`, so a command that never saw its terminator is dropped
    /// here.
    pub fn reset(&mut self) {
        self.data.clear();
        self.capped = false;
        self.invalid = false;
    }

    /// Accumulate one payload byte.
    pub fn put(&mut self, byte: u8) {
        if self.invalid {
            return;
        }
        if self.data.len() >= self.max_bytes {
            tracing::warn!("osc: payload exceeds max_bytes, discarding sequence");
            self.invalid = true;
            return;
        }
        if self.data.len() >= OSC_WORKING_BUFFER_SIZE && !self.large_payloads {
            if !self.capped {
                tracing::warn!(
                    "osc: payload exceeds working buffer without an allocator, \
                     capping"
                );
            }
            self.capped = true;
            return;
        }
        self.data.push(byte);
    }

    /// Finalize the accumulated payload. `terminator` is `None` when the
    /// string was aborted (`CAN`/`SUB`), which discards it.
    pub fn finish(&mut self, terminator: Option<OscTerminator>) -> Option<OscCommand> {
        let data = std::mem::take(&mut self.data);
        let capped = self.capped;
        let invalid = self.invalid;
        self.reset();

        let terminator = terminator?;
        if invalid {
            return None;
        }
        parse_payload(&data, terminator, capped)
    }
}

// ─── payload parsing ───

/// Split at the first occurrence of `sep`; the second half excludes the
/// separator and is `None` when `sep` is absent.
fn split_first(bytes: &[u8], sep: u8) -> (&[u8], Option<&[u8]>) {
    match bytes.iter().position(|&b| b == sep) {
        Some(at) => (&bytes[..at], Some(&bytes[at + 1..])),
        None => (bytes, None),
    }
}

/// Decode a text field: UTF-8 when valid, Latin-1 otherwise.
fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => bytes.iter().map(|&b| char::from(b)).collect(),
    }
}

/// Parse an ASCII decimal, saturating at `u16::MAX`. `None` for empty or
/// non-numeric input.
fn parse_u16_saturating(bytes: &[u8]) -> Option<u16> {
    if bytes.is_empty() || !bytes.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let mut acc: u16 = 0;
    for &b in bytes {
        acc = acc.saturating_mul(10).saturating_add(u16::from(b - b'0'));
    }
    Some(acc)
}

fn parse_payload(
    payload: &[u8],
    terminator: OscTerminator,
    capped: bool,
) -> Option<OscCommand> {
    let (code, rest) = split_first(payload, b';');
    let code = std::str::from_utf8(code).ok()?;

    match code {
        osc_codes::OSC_CODE_TITLE_AND_ICON | osc_codes::OSC_CODE_TITLE => {
            Some(OscCommand::ChangeWindowTitle {
                title: decode_text(rest?),
            })
        }
        osc_codes::OSC_CODE_ICON => Some(OscCommand::ChangeWindowIcon {
            icon: decode_text(rest?),
        }),
        osc_codes::OSC_CODE_PALETTE => parse_palette(rest?, terminator),
        osc_codes::OSC_CODE_PWD => Some(OscCommand::ReportPwd {
            url: decode_text(rest?),
        }),
        osc_codes::OSC_CODE_HYPERLINK => parse_hyperlink(rest?),
        osc_codes::OSC_CODE_NOTIFY_OR_PROGRESS => parse_notify_or_progress(rest?),
        osc_codes::OSC_CODE_FOREGROUND => {
            parse_dynamic_color(DynamicColorTarget::Foreground, rest?, terminator)
        }
        osc_codes::OSC_CODE_BACKGROUND => {
            parse_dynamic_color(DynamicColorTarget::Background, rest?, terminator)
        }
        osc_codes::OSC_CODE_CURSOR_COLOR => {
            parse_dynamic_color(DynamicColorTarget::Cursor, rest?, terminator)
        }
        osc_codes::OSC_CODE_KITTY_COLOR => {
            Some(parse_kitty_colors(rest.unwrap_or(b""), terminator, capped))
        }
        osc_codes::OSC_CODE_MOUSE_SHAPE => Some(OscCommand::MouseShape {
            shape: decode_text(rest?),
        }),
        osc_codes::OSC_CODE_CLIPBOARD => parse_clipboard(rest?, terminator, capped),
        osc_codes::OSC_CODE_RESET_PALETTE => {
            Some(parse_reset_palette(rest.unwrap_or(b"")))
        }
        osc_codes::OSC_CODE_RESET_FOREGROUND => Some(OscCommand::ResetDynamicColor {
            target: DynamicColorTarget::Foreground,
        }),
        osc_codes::OSC_CODE_RESET_BACKGROUND => Some(OscCommand::ResetDynamicColor {
            target: DynamicColorTarget::Background,
        }),
        osc_codes::OSC_CODE_RESET_CURSOR_COLOR => Some(OscCommand::ResetDynamicColor {
            target: DynamicColorTarget::Cursor,
        }),
        osc_codes::OSC_CODE_SEMANTIC_PROMPT => parse_semantic_prompt(rest?),
        osc_codes::OSC_CODE_URXVT => parse_urxvt(rest?),
        _ => {
            tracing::debug!("osc: ignoring unknown command {code:?}");
            None
        }
    }
}

/// OSC 4: `N;?` queries, `N;spec` sets. Multiple pairs are accepted by some
/// emulators; only the first is honored here, the rest are logged.
fn parse_palette(rest: &[u8], terminator: OscTerminator) -> Option<OscCommand> {
    let (index, rest) = split_first(rest, b';');
    let palette = parse_u16_saturating(index)?;
    let (spec, extra) = split_first(rest?, b';');
    if extra.is_some() {
        tracing::debug!("osc 4: ignoring extra palette pairs");
    }
    if spec == b"?" {
        Some(OscCommand::ReportColor {
            palette,
            terminator,
        })
    } else if spec.is_empty() {
        None
    } else {
        Some(OscCommand::SetColor {
            palette,
            spec: decode_text(spec),
        })
    }
}

/// OSC 104: bare resets the whole palette, otherwise a `;`-separated index
/// list. Bad indices are skipped, they do not poison the rest.
fn parse_reset_palette(rest: &[u8]) -> OscCommand {
    let mut indices: SmallVec<[u16; 4]> = SmallVec::new();
    if !rest.is_empty() {
        for field in rest.split(|&b| b == b';') {
            match parse_u16_saturating(field) {
                Some(index) => indices.push(index),
                None => tracing::debug!("osc 104: skipping bad index"),
            }
        }
    }
    OscCommand::ResetColor { indices }
}

/// OSC 8: `params;uri`. Params are `:`-separated `key=value` pairs; only
/// `id` is recognized. An empty URI ends the active hyperlink.
fn parse_hyperlink(rest: &[u8]) -> Option<OscCommand> {
    let (params, uri) = split_first(rest, b';');
    // The URI itself may contain `;`, so everything past the first split is
    // taken verbatim.
    let uri = uri?;
    if uri.is_empty() {
        return Some(OscCommand::HyperlinkEnd);
    }
    let mut id = None;
    for param in params.split(|&b| b == b':') {
        let (key, value) = split_first(param, b'=');
        match (key, value) {
            (b"id", Some(value)) if !value.is_empty() => {
                id = Some(decode_text(value));
            }
            (b"", None) => {}
            _ => tracing::debug!("osc 8: ignoring unknown param"),
        }
    }
    Some(OscCommand::HyperlinkStart {
        id,
        uri: decode_text(uri),
    })
}

/// OSC 9 is two protocols: ConEmu progress when the payload starts with
/// `4;`, iTerm2 desktop notification otherwise.
fn parse_notify_or_progress(rest: &[u8]) -> Option<OscCommand> {
    let (first, after) = split_first(rest, b';');
    if first == osc_codes::OSC_9_PROGRESS_SUBCODE.as_bytes() {
        if let Some(after) = after {
            return parse_progress(after);
        }
    }
    Some(OscCommand::ShowDesktopNotification {
        title: String::new(),
        body: decode_text(rest),
    })
}

/// OSC 9;4: `state[;value]`, value clamped to 0..=100.
fn parse_progress(rest: &[u8]) -> Option<OscCommand> {
    let (state, value) = split_first(rest, b';');
    let state = match parse_u16_saturating(state)? {
        0 => ProgressState::Remove,
        1 => ProgressState::Set,
        2 => ProgressState::Error,
        3 => ProgressState::Indeterminate,
        4 => ProgressState::Paused,
        other => {
            tracing::debug!("osc 9;4: ignoring unknown progress state {other}");
            return None;
        }
    };
    let progress = value.and_then(parse_u16_saturating).map(|v| {
        #[allow(clippy::cast_possible_truncation)]
        let clamped = v.min(100) as u8;
        clamped
    });
    Some(OscCommand::Progress { state, progress })
}

/// OSC 10/11/12: `?` queries, anything else is a color spec.
fn parse_dynamic_color(
    target: DynamicColorTarget,
    rest: &[u8],
    terminator: OscTerminator,
) -> Option<OscCommand> {
    if rest == b"?" {
        Some(OscCommand::ReportDynamicColor { target, terminator })
    } else if rest.is_empty() {
        None
    } else {
        let (spec, extra) = split_first(rest, b';');
        if extra.is_some() {
            tracing::debug!("osc {target}: ignoring chained color fields");
        }
        Some(OscCommand::SetDynamicColor {
            target,
            spec: decode_text(spec),
        })
    }
}

/// OSC 21: `key[=val]` items. Unknown keys are kept - the consumer decides
/// what it supports - but malformed items are skipped.
fn parse_kitty_colors(
    rest: &[u8],
    terminator: OscTerminator,
    capped: bool,
) -> OscCommand {
    let mut items = Vec::new();
    for field in rest.split(|&b| b == b';') {
        if field.is_empty() {
            continue;
        }
        let (key, value) = split_first(field, b'=');
        if key.is_empty() {
            tracing::debug!("osc 21: skipping item with empty key");
            continue;
        }
        let op = match value {
            Some(b"?") => KittyColorOp::Query,
            Some(b"") | None => KittyColorOp::Reset,
            Some(value) => KittyColorOp::Set(decode_text(value)),
        };
        items.push(KittyColorItem {
            key: decode_text(key),
            op,
        });
    }
    OscCommand::KittyColorProtocol {
        items,
        incomplete: capped,
        terminator,
    }
}

/// OSC 52: `kind;data`. An empty kind defaults to `c` (the clipboard
/// selection).
fn parse_clipboard(
    rest: &[u8],
    terminator: OscTerminator,
    capped: bool,
) -> Option<OscCommand> {
    let (kind, data) = split_first(rest, b';');
    let kind = kind.first().copied().unwrap_or(b'c');
    Some(OscCommand::ClipboardContents {
        kind,
        data: decode_text(data?),
        incomplete: capped,
        terminator,
    })
}

/// OSC 133: FinalTerm semantic prompt marks.
fn parse_semantic_prompt(rest: &[u8]) -> Option<OscCommand> {
    let (mark, opts) = split_first(rest, b';');
    match mark {
        b"A" => {
            let mut aid = None;
            let mut kind = PromptKind::default();
            let mut redraw = true;
            if let Some(opts) = opts {
                // Options parse left-to-right; unknown keys never poison
                // later keys on the same command.
                for opt in opts.split(|&b| b == b';') {
                    let (key, value) = split_first(opt, b'=');
                    match (key, value) {
                        (b"aid", Some(value)) => aid = Some(decode_text(value)),
                        (b"k", Some(b"c")) => kind = PromptKind::Continuation,
                        (b"k", Some(b"s")) => kind = PromptKind::Secondary,
                        (b"k", Some(b"r")) => kind = PromptKind::RightAligned,
                        (b"k", Some(b"i")) => kind = PromptKind::Primary,
                        (b"redraw", Some(value)) => redraw = value != b"0",
                        (b"", None) => {}
                        _ => tracing::debug!("osc 133;A: ignoring unknown option"),
                    }
                }
            }
            Some(OscCommand::PromptStart { aid, kind, redraw })
        }
        b"B" => Some(OscCommand::PromptEnd),
        b"C" => Some(OscCommand::EndOfInput),
        b"D" => {
            let exit_code = opts
                .map(|o| split_first(o, b';').0)
                .and_then(parse_u16_saturating)
                .map(|code| {
                    #[allow(clippy::cast_possible_truncation)]
                    let code = code.min(255) as u8;
                    code
                });
            Some(OscCommand::EndOfCommand { exit_code })
        }
        _ => {
            tracing::debug!("osc 133: ignoring unknown mark");
            None
        }
    }
}

/// OSC 777: only the `notify` sub-command is recognized.
fn parse_urxvt(rest: &[u8]) -> Option<OscCommand> {
    let (sub, args) = split_first(rest, b';');
    if sub != osc_codes::OSC_777_NOTIFY.as_bytes() {
        tracing::debug!("osc 777: ignoring unknown sub-command");
        return None;
    }
    let (title, body) = split_first(args?, b';');
    Some(OscCommand::ShowDesktopNotification {
        title: decode_text(title),
        body: decode_text(body.unwrap_or(b"")),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    /// Feed a full payload and finish with the given terminator.
    fn parse(payload: &[u8], terminator: OscTerminator) -> Option<OscCommand> {
        let mut parser = OscParser::new(1024 * 1024, false);
        parser.reset();
        for &byte in payload {
            parser.put(byte);
        }
        parser.finish(Some(terminator))
    }

    fn parse_bel(payload: &[u8]) -> Option<OscCommand> {
        parse(payload, OscTerminator::Bel)
    }

    #[test]
    fn test_window_title() {
        assert_eq!(
            parse_bel(b"0;ab"),
            Some(OscCommand::ChangeWindowTitle {
                title: "ab".into()
            })
        );
        assert_eq!(
            parse_bel(b"2;hello world"),
            Some(OscCommand::ChangeWindowTitle {
                title: "hello world".into()
            })
        );
        assert_eq!(
            parse_bel(b"1;icon"),
            Some(OscCommand::ChangeWindowIcon {
                icon: "icon".into()
            })
        );
    }

    #[test]
    fn test_title_latin1_fallback() {
        // 0xE9 is é in Latin-1 and invalid UTF-8.
        assert_eq!(
            parse_bel(b"2;caf\xE9"),
            Some(OscCommand::ChangeWindowTitle {
                title: "café".into()
            })
        );
    }

    #[test]
    fn test_palette_set_and_query() {
        assert_eq!(
            parse_bel(b"4;17;rgb:ff/00/00"),
            Some(OscCommand::SetColor {
                palette: 17,
                spec: "rgb:ff/00/00".into()
            })
        );
        assert_eq!(
            parse(b"4;17;?", OscTerminator::St),
            Some(OscCommand::ReportColor {
                palette: 17,
                terminator: OscTerminator::St
            })
        );
    }

    #[test]
    fn test_palette_index_saturates() {
        assert_eq!(
            parse_bel(b"4;99999;red"),
            Some(OscCommand::SetColor {
                palette: u16::MAX,
                spec: "red".into()
            })
        );
    }

    #[test]
    fn test_reset_palette() {
        assert_eq!(
            parse_bel(b"104"),
            Some(OscCommand::ResetColor {
                indices: SmallVec::new()
            })
        );
        match parse_bel(b"104;1;2;bogus;3") {
            Some(OscCommand::ResetColor { indices }) => {
                // Bad index skipped, later ones kept.
                assert_eq!(indices.as_slice(), &[1, 2, 3]);
            }
            other => panic!("expected ResetColor, got {other:?}"),
        }
    }

    #[test]
    fn test_pwd() {
        assert_eq!(
            parse_bel(b"7;file:///home/nazmul"),
            Some(OscCommand::ReportPwd {
                url: "file:///home/nazmul".into()
            })
        );
    }

    #[test]
    fn test_hyperlink_start_end() {
        assert_eq!(
            parse_bel(b"8;id=xyz;https://r3bl.com"),
            Some(OscCommand::HyperlinkStart {
                id: Some("xyz".into()),
                uri: "https://r3bl.com".into()
            })
        );
        assert_eq!(
            parse_bel(b"8;;https://r3bl.com/a;b"),
            Some(OscCommand::HyperlinkStart {
                id: None,
                // URIs keep their own semicolons.
                uri: "https://r3bl.com/a;b".into()
            })
        );
        assert_eq!(parse_bel(b"8;;"), Some(OscCommand::HyperlinkEnd));
    }

    #[test]
    fn test_desktop_notification() {
        assert_eq!(
            parse_bel(b"9;build done"),
            Some(OscCommand::ShowDesktopNotification {
                title: String::new(),
                body: "build done".into()
            })
        );
        assert_eq!(
            parse_bel(b"777;notify;Build;done in 3s"),
            Some(OscCommand::ShowDesktopNotification {
                title: "Build".into(),
                body: "done in 3s".into()
            })
        );
    }

    #[test]
    fn test_progress() {
        assert_eq!(
            parse_bel(b"9;4;1;94"),
            Some(OscCommand::Progress {
                state: ProgressState::Set,
                progress: Some(94)
            })
        );
        assert_eq!(
            parse_bel(b"9;4;0"),
            Some(OscCommand::Progress {
                state: ProgressState::Remove,
                progress: None
            })
        );
        assert_eq!(
            parse_bel(b"9;4;3;0"),
            Some(OscCommand::Progress {
                state: ProgressState::Indeterminate,
                progress: Some(0)
            })
        );
        // Clamped to 100.
        assert_eq!(
            parse_bel(b"9;4;1;150"),
            Some(OscCommand::Progress {
                state: ProgressState::Set,
                progress: Some(100)
            })
        );
        // Unknown state is dropped.
        assert_eq!(parse_bel(b"9;4;9;50"), None);
    }

    #[test]
    fn test_dynamic_colors() {
        assert_eq!(
            parse_bel(b"10;rgb:aa/bb/cc"),
            Some(OscCommand::SetDynamicColor {
                target: DynamicColorTarget::Foreground,
                spec: "rgb:aa/bb/cc".into()
            })
        );
        assert_eq!(
            parse_bel(b"11;?"),
            Some(OscCommand::ReportDynamicColor {
                target: DynamicColorTarget::Background,
                terminator: OscTerminator::Bel
            })
        );
        assert_eq!(
            parse_bel(b"112"),
            Some(OscCommand::ResetDynamicColor {
                target: DynamicColorTarget::Cursor
            })
        );
    }

    #[test]
    fn test_kitty_color_protocol() {
        match parse(b"21;foreground=?;background=red;cursor=", OscTerminator::St) {
            Some(OscCommand::KittyColorProtocol {
                items,
                incomplete,
                terminator,
            }) => {
                assert!(!incomplete);
                assert_eq!(terminator, OscTerminator::St);
                assert_eq!(items.len(), 3);
                assert_eq!(items[0].key, "foreground");
                assert_eq!(items[0].op, KittyColorOp::Query);
                assert_eq!(items[1].op, KittyColorOp::Set("red".into()));
                assert_eq!(items[2].op, KittyColorOp::Reset);
            }
            other => panic!("expected KittyColorProtocol, got {other:?}"),
        }
    }

    #[test]
    fn test_mouse_shape() {
        assert_eq!(
            parse_bel(b"22;pointer"),
            Some(OscCommand::MouseShape {
                shape: "pointer".into()
            })
        );
    }

    #[test]
    fn test_clipboard_kind_defaults_to_c() {
        assert_eq!(
            parse_bel(b"52;;aGVsbG8="),
            Some(OscCommand::ClipboardContents {
                kind: b'c',
                data: "aGVsbG8=".into(),
                incomplete: false,
                terminator: OscTerminator::Bel
            })
        );
        assert_eq!(
            parse_bel(b"52;p;?"),
            Some(OscCommand::ClipboardContents {
                kind: b'p',
                data: "?".into(),
                incomplete: false,
                terminator: OscTerminator::Bel
            })
        );
    }

    #[test]
    fn test_semantic_prompt_marks() {
        assert_eq!(
            parse_bel(b"133;A"),
            Some(OscCommand::PromptStart {
                aid: None,
                kind: PromptKind::Primary,
                redraw: true
            })
        );
        assert_eq!(
            parse_bel(b"133;A;aid=14;k=c"),
            Some(OscCommand::PromptStart {
                aid: Some("14".into()),
                kind: PromptKind::Continuation,
                redraw: true
            })
        );
        assert_eq!(
            parse_bel(b"133;A;redraw=0;k=r"),
            Some(OscCommand::PromptStart {
                aid: None,
                kind: PromptKind::RightAligned,
                redraw: false
            })
        );
        assert_eq!(parse_bel(b"133;B"), Some(OscCommand::PromptEnd));
        assert_eq!(parse_bel(b"133;C"), Some(OscCommand::EndOfInput));
        assert_eq!(
            parse_bel(b"133;D"),
            Some(OscCommand::EndOfCommand { exit_code: None })
        );
        assert_eq!(
            parse_bel(b"133;D;1"),
            Some(OscCommand::EndOfCommand { exit_code: Some(1) })
        );
    }

    #[test]
    fn test_unknown_option_does_not_poison_later_keys() {
        assert_eq!(
            parse_bel(b"133;A;bogus=1;k=s"),
            Some(OscCommand::PromptStart {
                aid: None,
                kind: PromptKind::Secondary,
                redraw: true
            })
        );
    }

    #[test]
    fn test_unknown_command_ignored() {
        assert_eq!(parse_bel(b"9999;whatever"), None);
        assert_eq!(parse_bel(b"not-a-number"), None);
    }

    #[test]
    fn test_aborted_sequence_discarded() {
        let mut parser = OscParser::new(1024, false);
        parser.reset();
        for &byte in b"0;title" {
            parser.put(byte);
        }
        assert_eq!(parser.finish(None), None);
        // The buffer is clean for the next sequence.
        for &byte in b"133;B" {
            parser.put(byte);
        }
        assert_eq!(
            parser.finish(Some(OscTerminator::Bel)),
            Some(OscCommand::PromptEnd)
        );
    }

    #[test]
    fn test_capped_payload_marks_incomplete() {
        let mut parser = OscParser::new(1024 * 1024, false);
        parser.reset();
        for &byte in b"52;c;" {
            parser.put(byte);
        }
        for _ in 0..OSC_WORKING_BUFFER_SIZE {
            parser.put(b'A');
        }
        match parser.finish(Some(OscTerminator::Bel)) {
            Some(OscCommand::ClipboardContents { incomplete, .. }) => {
                assert!(incomplete);
            }
            other => panic!("expected ClipboardContents, got {other:?}"),
        }
    }

    #[test]
    fn test_large_payloads_grow_past_working_buffer() {
        let mut parser = OscParser::new(1024 * 1024, true);
        parser.reset();
        for &byte in b"52;c;" {
            parser.put(byte);
        }
        for _ in 0..(OSC_WORKING_BUFFER_SIZE * 2) {
            parser.put(b'A');
        }
        match parser.finish(Some(OscTerminator::Bel)) {
            Some(OscCommand::ClipboardContents {
                data, incomplete, ..
            }) => {
                assert!(!incomplete);
                assert_eq!(data.len(), OSC_WORKING_BUFFER_SIZE * 2);
            }
            other => panic!("expected ClipboardContents, got {other:?}"),
        }
    }

    #[test]
    fn test_payload_past_max_bytes_yields_nothing() {
        let mut parser = OscParser::new(64, true);
        parser.reset();
        for &byte in b"52;c;" {
            parser.put(byte);
        }
        for _ in 0..128 {
            parser.put(b'A');
        }
        assert_eq!(parser.finish(Some(OscTerminator::Bel)), None);
    }
}
