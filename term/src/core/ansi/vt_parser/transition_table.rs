// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! The const transition table: `(state, byte) → (next state, action)`.
//!
//! Built at compile time from the DEC ANSI parser reference
//! (<https://vt100.net/emu/dec_ansi_parser>) with two extensions:
//!
//! 1. A [`VtState::Utf8`] state reachable from `ground` on lead bytes
//!    `0xC2..=0xF4`, used for multi-byte UTF-8 sequences. (The `utf8` row
//!    itself is driver-owned; see below.)
//! 2. `csi_param` accepts `:` (0x3A) as a parameter separator, because SGR
//!    subparameters use colon.
//!
//! # Anywhere-first lookup
//!
//! [`lookup`] consults the [`VtState::Anywhere`] row before the current
//! state's row; only bytes with a global meaning live there. This parser is
//! UTF-8 native, so raw 8-bit C1 controls are **not** globally recognized
//! (they would collide with UTF-8 continuation bytes inside OSC titles); the
//! anywhere row carries exactly `CAN`, `SUB`, `ESC`, and raw `ST` (0x9C,
//! which ECMA-48 defines as the OSC/DCS string terminator).
//!
//! # Build-time duplicate detection
//!
//! Every slot is assigned at most once: [`set`] panics on reassignment, and
//! a `const` panic is a compile error, so a duplicated range in the builder
//! fails the build. Totality (anywhere row ∪ state row covers all 256
//! bytes) is asserted by a unit test.
//!
//! [`VtState::Utf8`]: super::VtState::Utf8
//! [`VtState::Anywhere`]: super::VtState::Anywhere

use super::state::{VT_STATE_COUNT, VtState};

/// Table-internal action kinds. The driver translates these into emitted
/// [`VtAction`]s or internal buffer mutations.
///
/// [`VtAction`]: super::VtAction
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum TableAction {
    /// No action; transition only.
    None,
    /// Explicitly discard the byte.
    Ignore,
    /// Print the byte (ground printables; the driver maps non-ASCII stray
    /// bytes to U+FFFD).
    Print,
    /// Execute a C0 control.
    Execute,
    /// Append to the intermediates buffer.
    Collect,
    /// Feed the parameter buffer (digits and separators).
    Param,
    /// Dispatch an ESC sequence with the current intermediates.
    EscDispatch,
    /// Dispatch a CSI sequence with the current params + intermediates.
    CsiDispatch,
    /// Forward one DCS payload byte.
    Put,
    /// Forward one OSC payload byte to the OSC sub-parser.
    OscPut,
}

/// One table slot.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub struct Transition {
    /// `None` means stay in the current state.
    pub next: Option<VtState>,
    pub action: TableAction,
}

type Table = [[Option<Transition>; 256]; VT_STATE_COUNT];

const fn set(
    table: &mut Table,
    state: VtState,
    byte: u8,
    next: Option<VtState>,
    action: TableAction,
) {
    let row = state as usize;
    let idx = byte as usize;
    // Duplicate assignment is a generator bug; a const panic fails the build.
    if table[row][idx].is_some() {
        panic!("duplicate transition table assignment");
    }
    table[row][idx] = Some(Transition { next, action });
}

const fn set_range(
    table: &mut Table,
    state: VtState,
    lo: u8,
    hi: u8,
    next: Option<VtState>,
    action: TableAction,
) {
    let mut byte = lo as usize;
    while byte <= hi as usize {
        // Bytes with global meaning live in the anywhere row only; skip them
        // so broad ranges here never shadow (or duplicate) them.
        if !is_anywhere_byte(byte as u8) {
            set(table, state, byte as u8, next, action);
        }
        byte += 1;
    }
}

/// Bytes owned by the [`VtState::Anywhere`] row.
const fn is_anywhere_byte(byte: u8) -> bool {
    matches!(byte, 0x18 | 0x1A | 0x1B | 0x9C)
}

/// Fill the C0 range of a state row (minus the anywhere-owned `CAN`/`SUB`/
/// `ESC`) with the given action, staying in the state.
const fn set_c0(table: &mut Table, state: VtState, action: TableAction) {
    set_range(table, state, 0x00, 0x17, None, action);
    set(table, state, 0x19, None, action);
    set_range(table, state, 0x1C, 0x1F, None, action);
}

const fn build() -> Table {
    use TableAction::{
        Collect, CsiDispatch, EscDispatch, Execute, Ignore, Param, Print, Put,
        OscPut,
    };
    use VtState::{
        Anywhere, CsiEntry, CsiIgnore, CsiIntermediate, CsiParam, DcsEntry,
        DcsIgnore, DcsIntermediate, DcsParam, DcsPassthrough, Escape,
        EscapeIntermediate, Ground, OscString, SosPmApcString, Utf8,
    };

    let mut t: Table = [[None; 256]; VT_STATE_COUNT];

    // ── anywhere: global transitions, consulted before the state row. ──
    set(&mut t, Anywhere, 0x18, Some(Ground), Execute); // CAN
    set(&mut t, Anywhere, 0x1A, Some(Ground), Execute); // SUB
    set(&mut t, Anywhere, 0x1B, Some(Escape), TableAction::None); // ESC
    set(&mut t, Anywhere, 0x9C, Some(Ground), TableAction::None); // raw ST

    // ── ground ──
    set_c0(&mut t, Ground, Execute);
    set_range(&mut t, Ground, 0x20, 0x7F, None, Print);
    // Stray bytes that cannot start a UTF-8 sequence print as U+FFFD (the
    // driver substitutes the replacement character for non-ASCII prints).
    set_range(&mut t, Ground, 0x80, 0xC1, None, Print);
    set_range(&mut t, Ground, 0xC2, 0xF4, Some(Utf8), Collect);
    set_range(&mut t, Ground, 0xF5, 0xFF, None, Print);

    // ── escape ──
    set_c0(&mut t, Escape, Execute);
    set_range(&mut t, Escape, 0x20, 0x2F, Some(EscapeIntermediate), Collect);
    set_range(&mut t, Escape, 0x30, 0x4F, Some(Ground), EscDispatch);
    set(&mut t, Escape, 0x50, Some(DcsEntry), TableAction::None);
    set_range(&mut t, Escape, 0x51, 0x57, Some(Ground), EscDispatch);
    set(&mut t, Escape, 0x58, Some(SosPmApcString), TableAction::None);
    set(&mut t, Escape, 0x59, Some(Ground), EscDispatch);
    set(&mut t, Escape, 0x5A, Some(Ground), EscDispatch);
    set(&mut t, Escape, 0x5B, Some(CsiEntry), TableAction::None);
    set(&mut t, Escape, 0x5C, Some(Ground), EscDispatch); // ST
    set(&mut t, Escape, 0x5D, Some(OscString), TableAction::None);
    set(&mut t, Escape, 0x5E, Some(SosPmApcString), TableAction::None);
    set(&mut t, Escape, 0x5F, Some(SosPmApcString), TableAction::None);
    set_range(&mut t, Escape, 0x60, 0x7E, Some(Ground), EscDispatch);
    set(&mut t, Escape, 0x7F, None, Ignore);
    set_range(&mut t, Escape, 0x80, 0xFF, None, Ignore);

    // ── escape_intermediate ──
    set_c0(&mut t, EscapeIntermediate, Execute);
    set_range(&mut t, EscapeIntermediate, 0x20, 0x2F, None, Collect);
    set_range(&mut t, EscapeIntermediate, 0x30, 0x7E, Some(Ground), EscDispatch);
    set(&mut t, EscapeIntermediate, 0x7F, None, Ignore);
    set_range(&mut t, EscapeIntermediate, 0x80, 0xFF, None, Ignore);

    // ── csi_entry ──
    set_c0(&mut t, CsiEntry, Execute);
    set_range(&mut t, CsiEntry, 0x20, 0x2F, Some(CsiIntermediate), Collect);
    set_range(&mut t, CsiEntry, 0x30, 0x39, Some(CsiParam), Param);
    set(&mut t, CsiEntry, 0x3A, Some(CsiIgnore), TableAction::None);
    set(&mut t, CsiEntry, 0x3B, Some(CsiParam), Param);
    set_range(&mut t, CsiEntry, 0x3C, 0x3F, Some(CsiParam), Collect);
    set_range(&mut t, CsiEntry, 0x40, 0x7E, Some(Ground), CsiDispatch);
    set(&mut t, CsiEntry, 0x7F, None, Ignore);
    set_range(&mut t, CsiEntry, 0x80, 0xFF, None, Ignore);

    // ── csi_param ──
    set_c0(&mut t, CsiParam, Execute);
    set_range(&mut t, CsiParam, 0x20, 0x2F, Some(CsiIntermediate), Collect);
    // 0x3A is the colon-subparameter extension: classic tables send it to
    // csi_ignore, SGR subparameters require it to accumulate.
    set_range(&mut t, CsiParam, 0x30, 0x3B, None, Param);
    set_range(&mut t, CsiParam, 0x3C, 0x3F, Some(CsiIgnore), TableAction::None);
    set_range(&mut t, CsiParam, 0x40, 0x7E, Some(Ground), CsiDispatch);
    set(&mut t, CsiParam, 0x7F, None, Ignore);
    set_range(&mut t, CsiParam, 0x80, 0xFF, None, Ignore);

    // ── csi_intermediate ──
    set_c0(&mut t, CsiIntermediate, Execute);
    set_range(&mut t, CsiIntermediate, 0x20, 0x2F, None, Collect);
    set_range(&mut t, CsiIntermediate, 0x30, 0x3F, Some(CsiIgnore), TableAction::None);
    set_range(&mut t, CsiIntermediate, 0x40, 0x7E, Some(Ground), CsiDispatch);
    set(&mut t, CsiIntermediate, 0x7F, None, Ignore);
    set_range(&mut t, CsiIntermediate, 0x80, 0xFF, None, Ignore);

    // ── csi_ignore ──
    set_c0(&mut t, CsiIgnore, Execute);
    set_range(&mut t, CsiIgnore, 0x20, 0x3F, None, Ignore);
    set_range(&mut t, CsiIgnore, 0x40, 0x7E, Some(Ground), TableAction::None);
    set(&mut t, CsiIgnore, 0x7F, None, Ignore);
    set_range(&mut t, CsiIgnore, 0x80, 0xFF, None, Ignore);

    // ── dcs_entry ──
    set_c0(&mut t, DcsEntry, Ignore);
    set_range(&mut t, DcsEntry, 0x20, 0x2F, Some(DcsIntermediate), Collect);
    set_range(&mut t, DcsEntry, 0x30, 0x39, Some(DcsParam), Param);
    set(&mut t, DcsEntry, 0x3A, Some(DcsIgnore), TableAction::None);
    set(&mut t, DcsEntry, 0x3B, Some(DcsParam), Param);
    set_range(&mut t, DcsEntry, 0x3C, 0x3F, Some(DcsParam), Collect);
    set_range(&mut t, DcsEntry, 0x40, 0x7E, Some(DcsPassthrough), TableAction::None);
    set(&mut t, DcsEntry, 0x7F, None, Ignore);
    set_range(&mut t, DcsEntry, 0x80, 0xFF, None, Ignore);

    // ── dcs_param ──
    set_c0(&mut t, DcsParam, Ignore);
    set_range(&mut t, DcsParam, 0x20, 0x2F, Some(DcsIntermediate), Collect);
    set_range(&mut t, DcsParam, 0x30, 0x39, None, Param);
    set(&mut t, DcsParam, 0x3A, Some(DcsIgnore), TableAction::None);
    set(&mut t, DcsParam, 0x3B, None, Param);
    set_range(&mut t, DcsParam, 0x3C, 0x3F, Some(DcsIgnore), TableAction::None);
    set_range(&mut t, DcsParam, 0x40, 0x7E, Some(DcsPassthrough), TableAction::None);
    set(&mut t, DcsParam, 0x7F, None, Ignore);
    set_range(&mut t, DcsParam, 0x80, 0xFF, None, Ignore);

    // ── dcs_intermediate ──
    set_c0(&mut t, DcsIntermediate, Ignore);
    set_range(&mut t, DcsIntermediate, 0x20, 0x2F, None, Collect);
    set_range(&mut t, DcsIntermediate, 0x30, 0x3F, Some(DcsIgnore), TableAction::None);
    set_range(&mut t, DcsIntermediate, 0x40, 0x7E, Some(DcsPassthrough), TableAction::None);
    set(&mut t, DcsIntermediate, 0x7F, None, Ignore);
    set_range(&mut t, DcsIntermediate, 0x80, 0xFF, None, Ignore);

    // ── dcs_passthrough ──
    set_c0(&mut t, DcsPassthrough, Put);
    set_range(&mut t, DcsPassthrough, 0x20, 0x7E, None, Put);
    set(&mut t, DcsPassthrough, 0x7F, None, Ignore);
    set_range(&mut t, DcsPassthrough, 0x80, 0xFF, None, Put);

    // ── dcs_ignore ──
    set_c0(&mut t, DcsIgnore, Ignore);
    set_range(&mut t, DcsIgnore, 0x20, 0xFF, None, Ignore);

    // ── osc_string ──
    set_range(&mut t, OscString, 0x00, 0x06, None, Ignore);
    // BEL terminates (xterm extension); the exit action finalizes the
    // command with the BEL terminator recorded.
    set(&mut t, OscString, 0x07, Some(Ground), TableAction::None);
    set_range(&mut t, OscString, 0x08, 0x17, None, Ignore);
    set(&mut t, OscString, 0x19, None, Ignore);
    set_range(&mut t, OscString, 0x1C, 0x1F, None, Ignore);
    set_range(&mut t, OscString, 0x20, 0xFF, None, OscPut);

    // ── sos_pm_apc_string ──
    set_c0(&mut t, SosPmApcString, Ignore);
    set_range(&mut t, SosPmApcString, 0x20, 0xFF, None, Ignore);

    // ── utf8 ──
    // The driver owns this state entirely (continuation collection, length
    // check, decode, and the malformed → U+FFFD path); these slots exist
    // only to keep the table total and are never consulted.
    set_range(&mut t, Utf8, 0x00, 0xFF, Some(Ground), Ignore);

    t
}

/// The table. Built once at compile time.
pub static TRANSITION_TABLE: Table = build();

/// Look up the transition for `(state, byte)`, consulting the anywhere row
/// first.
///
/// Falls back to "ignore, stay" if neither row defines the byte; the builder
/// keeps the table total so this is unreachable in practice, and debug
/// builds log it.
#[must_use]
pub fn lookup(state: VtState, byte: u8) -> Transition {
    debug_assert!(state != VtState::Anywhere, "anywhere is not a real state");
    if let Some(transition) = TRANSITION_TABLE[VtState::Anywhere as usize][byte as usize]
    {
        return transition;
    }
    match TRANSITION_TABLE[state as usize][byte as usize] {
        Some(transition) => transition,
        None => {
            tracing::debug!(
                "vt parser: no transition for byte {byte:#04x} in state {state}"
            );
            Transition {
                next: None,
                action: TableAction::Ignore,
            }
        }
    }
}
