//! Chat panel keys: compose, send, cancel, scroll.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app::Focus;
use super::super::constants::{SCROLL_LINES_PAGE, SCROLL_LINES_SMALL};
use super::spawn::spawn_chat;
use super::{HandleKeyContext, HandleResult};

/// Cancel the in-flight chat request, if any. Returns true when one was cancelled.
pub(super) fn cancel_pending_chat(ctx: &mut HandleKeyContext<'_>) -> bool {
    match ctx.pending.chat.take() {
        Some(pc) => {
            pc.cancel_token.cancel();
            ctx.app.chat.cancel();
            true
        }
        None => false,
    }
}

pub(super) fn handle_chat_key(key: KeyEvent, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let input_empty = ctx.app.chat.input.is_empty();
    match key.code {
        KeyCode::Esc => {
            if !cancel_pending_chat(ctx) {
                ctx.app.focus = Focus::Main;
            }
        }
        KeyCode::Tab => ctx.app.focus = Focus::Main,
        KeyCode::Enter => {
            let ids = ctx.app.visible_property_ids();
            if let Some(request) = ctx.app.chat.submit(&ids) {
                log::info!(
                    "Sending chat message ({} history, {} properties)",
                    request.conversation_history.len(),
                    ids.len()
                );
                ctx.pending.chat = Some(spawn_chat(ctx.rt, ctx.client, request));
            }
        }
        KeyCode::Left if input_empty => ctx.app.chat.cycle_suggestion(-1),
        KeyCode::Right if input_empty => ctx.app.chat.cycle_suggestion(1),
        KeyCode::Up => ctx.app.chat.scroll_up(SCROLL_LINES_SMALL),
        KeyCode::Down => ctx.app.chat.scroll_down(SCROLL_LINES_SMALL),
        KeyCode::PageUp => ctx.app.chat.scroll_up(SCROLL_LINES_PAGE),
        KeyCode::PageDown => ctx.app.chat.scroll_down(SCROLL_LINES_PAGE),
        KeyCode::Backspace => ctx.app.chat.backspace(),
        KeyCode::Char('u') if ctrl => ctx.app.chat.input.clear(),
        KeyCode::Char(c) if !ctrl => ctx.app.chat.push_char(c),
        _ => {}
    }
    HandleResult::Continue
}
