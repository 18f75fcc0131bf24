// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The driver that walks the transition table.
//!
//! [`VtParser::feed`] consumes exactly one byte and returns synchronously
//! with up to three actions in fixed order `{exit, transition, entry}`:
//! exit actions see the old state, transition actions see the movement,
//! entry actions see the new state. The caller must fully consume the slots
//! for byte N before feeding byte N+1.
//!
//! There are no parse errors: malformed and unknown sequences fall into the
//! `*_ignore` states and are dropped. Parser state after any byte sequence
//! is a deterministic function of that sequence alone.

use super::{ActionSlots, CsiSequence, DcsSequence, EscSequence, Intermediates,
            MAX_INTERMEDIATES, ParamBuffer, SeparatorMode, TableAction, Transition,
            VtAction, VtState, lookup};
use crate::{OscParser, OscTerminator, TermConfig};

/// Substitute for stray or malformed byte sequences in `ground`.
const REPLACEMENT: char = '\u{FFFD}';

/// The VT byte-stream parser. See the [module docs](self).
#[derive(Debug)]
pub struct VtParser {
    state: VtState,
    /// Collected intermediates of the current sequence. Doubles as the
    /// UTF-8 scratch buffer: both are at most 4 bytes and never live at the
    /// same time.
    intermediates: Intermediates,
    params: ParamBuffer,
    /// Total byte count the current UTF-8 sequence advertised in its lead.
    utf8_expected_len: usize,
    osc: OscParser,
    /// Cap on captured DCS payload bytes (`TermConfig::max_bytes`).
    max_bytes: usize,
    dcs_bytes_seen: usize,
}

impl Default for VtParser {
    fn default() -> Self { Self::new(&TermConfig::default()) }
}

impl VtParser {
    #[must_use]
    pub fn new(config: &TermConfig) -> Self {
        Self {
            state: VtState::Ground,
            intermediates: Intermediates::new(),
            params: ParamBuffer::default(),
            utf8_expected_len: 0,
            osc: OscParser::new(config.max_bytes, config.large_osc_payloads),
            max_bytes: config.max_bytes,
            dcs_bytes_seen: 0,
        }
    }

    #[must_use]
    pub fn state(&self) -> VtState { self.state }

    /// Feed one byte; returns the three action slots for it.
    pub fn feed(&mut self, byte: u8) -> ActionSlots {
        let mut slots = ActionSlots::default();

        // UTF-8 collection is a side state the driver owns entirely.
        if self.state == VtState::Utf8 {
            slots.transition = self.feed_utf8_continuation(byte);
            return slots;
        }

        let Transition { next, action } = lookup(self.state, byte);

        match next {
            Some(next_state) => {
                // The UTF-8 scratch buffer must start clean; ground does not
                // clear intermediates on its own.
                if next_state == VtState::Utf8 {
                    self.intermediates.clear();
                }
                slots.exit = self.run_exit_action(byte);
                slots.transition = self.run_table_action(action, byte);
                self.state = next_state;
                slots.entry = self.run_entry_action(byte);
            }
            None => {
                slots.transition = self.run_table_action(action, byte);
            }
        }

        slots
    }

    /// Exit actions for the state being left. Sees the old state.
    fn run_exit_action(&mut self, byte: u8) -> Option<VtAction> {
        match self.state {
            VtState::DcsPassthrough => Some(VtAction::DcsUnhook),
            VtState::OscString => {
                // The terminator byte is remembered so synchronous replies
                // can mirror the request form. CAN/SUB abort and discard.
                let terminator = match byte {
                    0x07 => Some(OscTerminator::Bel),
                    0x9C | 0x1B => Some(OscTerminator::St),
                    _ => None,
                };
                self.osc.finish(terminator).map(VtAction::OscDispatch)
            }
            _ => None,
        }
    }

    /// Entry actions for the state being entered. Sees the new state.
    fn run_entry_action(&mut self, byte: u8) -> Option<VtAction> {
        if self.state.clears_on_entry() {
            self.intermediates.clear();
            self.params.clear();
            return None;
        }
        match self.state {
            VtState::OscString => {
                self.osc.reset();
                None
            }
            VtState::DcsPassthrough => {
                self.dcs_bytes_seen = 0;
                let (params, _) = self.params.finish();
                Some(VtAction::DcsHook(DcsSequence {
                    intermediates: self.intermediates.clone(),
                    params,
                    final_byte: byte,
                }))
            }
            VtState::Utf8 => {
                self.utf8_expected_len = match byte {
                    0xC2..=0xDF => 2,
                    0xE0..=0xEF => 3,
                    _ => 4, // 0xF0..=0xF4, the only other way in
                };
                None
            }
            _ => None,
        }
    }

    /// Transition actions from the table.
    fn run_table_action(&mut self, action: TableAction, byte: u8) -> Option<VtAction> {
        match action {
            TableAction::None | TableAction::Ignore => None,
            TableAction::Print => Some(VtAction::Print(if byte < 0x80 {
                char::from(byte)
            } else {
                // Bytes that cannot start a UTF-8 sequence.
                REPLACEMENT
            })),
            TableAction::Execute => Some(VtAction::Execute(byte)),
            TableAction::Collect => {
                if self.intermediates.len() < MAX_INTERMEDIATES {
                    self.intermediates.push(byte);
                } else {
                    // Extra intermediates are ignored, not an error.
                    tracing::debug!(
                        "vt parser: dropping intermediate {byte:#04x} past cap"
                    );
                }
                None
            }
            TableAction::Param => {
                self.params.feed(byte);
                None
            }
            TableAction::EscDispatch => Some(VtAction::EscDispatch(EscSequence {
                intermediates: self.intermediates.clone(),
                final_byte: byte,
            })),
            TableAction::CsiDispatch => self.dispatch_csi(byte),
            TableAction::Put => {
                self.dcs_bytes_seen += 1;
                if self.dcs_bytes_seen > self.max_bytes {
                    if self.dcs_bytes_seen == self.max_bytes + 1 {
                        tracing::warn!(
                            "vt parser: DCS payload exceeds max_bytes, dropping rest"
                        );
                    }
                    None
                } else {
                    Some(VtAction::DcsPut(byte))
                }
            }
            TableAction::OscPut => {
                self.osc.put(byte);
                None
            }
        }
    }

    fn dispatch_csi(&mut self, final_byte: u8) -> Option<VtAction> {
        let (params, separator) = self.params.finish();
        match separator {
            // Colon subparameters only exist in SGR; anything else keeps
            // the ground transition but drops the dispatch.
            SeparatorMode::Colon if final_byte != b'm' => {
                tracing::debug!(
                    "vt parser: suppressing colon-param CSI with final {:?}",
                    char::from(final_byte)
                );
                None
            }
            SeparatorMode::Mixed => {
                tracing::debug!("vt parser: suppressing mixed-separator CSI");
                None
            }
            _ => Some(VtAction::CsiDispatch(CsiSequence {
                intermediates: self.intermediates.clone(),
                params,
                separator,
                final_byte,
            })),
        }
    }

    /// Collect one byte while in the `utf8` state; decode when the count
    /// matches the advertised length. Malformed sequences consume the byte,
    /// print U+FFFD, and return to `ground`.
    fn feed_utf8_continuation(&mut self, byte: u8) -> Option<VtAction> {
        if !(0x80..=0xBF).contains(&byte) {
            self.state = VtState::Ground;
            self.intermediates.clear();
            return Some(VtAction::Print(REPLACEMENT));
        }
        self.intermediates.push(byte);
        if self.intermediates.len() < self.utf8_expected_len {
            return None;
        }
        // Full validation (overlongs, surrogates, > U+10FFFF) comes free
        // from std.
        let decoded = std::str::from_utf8(&self.intermediates)
            .ok()
            .and_then(|s| s.chars().next())
            .unwrap_or(REPLACEMENT);
        self.state = VtState::Ground;
        self.intermediates.clear();
        Some(VtAction::Print(decoded))
    }
}
