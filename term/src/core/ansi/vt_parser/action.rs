// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Actions emitted by [`VtParser::feed`] and the table-internal action kinds.
//!
//! [`VtParser::feed`]: super::VtParser::feed

use smallvec::SmallVec;

use super::param::{MAX_PARAMS, SeparatorMode};
use crate::OscCommand;

/// Maximum number of intermediate bytes retained per sequence. The buffer is
/// shared with the UTF-8 decoder scratch space, which also never needs more
/// than 4 bytes.
pub const MAX_INTERMEDIATES: usize = 4;

pub type Intermediates = SmallVec<[u8; MAX_INTERMEDIATES]>;
pub type Params = SmallVec<[u16; MAX_PARAMS]>;

/// A parsed CSI sequence: `ESC [ <params> <intermediates> <final>`.
///
/// Private markers (`?`, `>`, `<`, `=`) are collected into `intermediates`
/// ahead of any trailing intermediate bytes.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct CsiSequence {
    pub intermediates: Intermediates,
    pub params: Params,
    pub separator: SeparatorMode,
    pub final_byte: u8,
}

/// A parsed ESC sequence: `ESC <intermediates> <final>`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EscSequence {
    pub intermediates: Intermediates,
    pub final_byte: u8,
}

/// A hooked DCS sequence header: `ESC P <params> <intermediates> <final>`.
/// Payload bytes follow as [`VtAction::DcsPut`] until [`VtAction::DcsUnhook`].
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct DcsSequence {
    pub intermediates: Intermediates,
    pub params: Params,
    pub final_byte: u8,
}

/// One action for the embedding program to apply.
#[derive(Clone, PartialEq, Debug)]
pub enum VtAction {
    /// Draw this codepoint at the cursor.
    Print(char),
    /// Execute this C0 control.
    Execute(u8),
    /// A complete CSI command.
    CsiDispatch(CsiSequence),
    /// A complete ESC command.
    EscDispatch(EscSequence),
    /// A complete OSC command (produced by the OSC sub-parser).
    OscDispatch(OscCommand),
    /// Begin DCS passthrough.
    DcsHook(DcsSequence),
    /// One DCS payload byte.
    DcsPut(u8),
    /// End DCS passthrough.
    DcsUnhook,
}

/// The up-to-three actions produced by feeding one byte, in mandatory
/// processing order: `exit` sees the old state, `transition` the movement,
/// `entry` the new state.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct ActionSlots {
    pub exit: Option<VtAction>,
    pub transition: Option<VtAction>,
    pub entry: Option<VtAction>,
}

impl ActionSlots {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.exit.is_none() && self.transition.is_none() && self.entry.is_none()
    }

    /// The emitted actions in processing order.
    pub fn drain(self) -> impl Iterator<Item = VtAction> {
        [self.exit, self.transition, self.entry].into_iter().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_drain_in_order() {
        let slots = ActionSlots {
            exit: Some(VtAction::DcsUnhook),
            transition: None,
            entry: Some(VtAction::Print('x')),
        };
        let drained: Vec<VtAction> = slots.drain().collect();
        assert_eq!(drained, vec![VtAction::DcsUnhook, VtAction::Print('x')]);
    }

    #[test]
    fn test_empty_slots() {
        assert!(ActionSlots::default().is_empty());
    }
}
