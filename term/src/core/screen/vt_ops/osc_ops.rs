// Copyright (c) 2025 R3BL LLC. Licensed under Apache License, Version 2.0.

//! Applying parsed OSC commands to screen state.
//!
//! Commands that describe the screen (titles, pwd, hyperlink scope, OSC
//! 133 semantic prompt marks) are absorbed here; everything the embedder
//! must act on (notifications, clipboard, colors, kitty protocol) is
//! re-queued as a [`ScreenEvent`].
//!
//! [`ScreenEvent`]: crate::ScreenEvent

use crate::{OpenHyperlink, OscCommand, PromptKind, Screen, ScreenEvent,
            SemanticPrompt};

pub fn apply(screen: &mut Screen, command: OscCommand) {
    match command {
        OscCommand::ChangeWindowTitle { title } => screen.title = Some(title),
        OscCommand::ChangeWindowIcon { icon } => screen.icon = Some(icon),
        OscCommand::ReportPwd { url } => screen.pwd = Some(url),
        OscCommand::MouseShape { shape } => screen.mouse_shape = Some(shape),
        OscCommand::HyperlinkStart { id, uri } => {
            screen.current_hyperlink = Some(OpenHyperlink { id, uri });
        }
        OscCommand::HyperlinkEnd => screen.current_hyperlink = None,
        OscCommand::PromptStart { kind, .. } => {
            mark_cursor_row(screen, match kind {
                PromptKind::Continuation => SemanticPrompt::PromptContinuation,
                PromptKind::Primary
                | PromptKind::Secondary
                | PromptKind::RightAligned => SemanticPrompt::Prompt,
            });
        }
        OscCommand::PromptEnd => mark_cursor_row(screen, SemanticPrompt::Input),
        OscCommand::EndOfInput => mark_cursor_row(screen, SemanticPrompt::Command),
        OscCommand::EndOfCommand { exit_code } => {
            screen.last_exit_code = exit_code;
        }
        // Everything else is the embedder's to handle.
        other => screen.events.push(ScreenEvent::Osc(other)),
    }
}

fn mark_cursor_row(screen: &mut Screen, mark: SemanticPrompt) {
    let y = screen.cursor.row;
    screen.active_page_mut().get_row_mut(y).semantic_prompt = mark;
}
