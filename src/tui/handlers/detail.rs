//! Detail view keys.

use crossterm::event::{KeyCode, KeyEvent};

use super::super::app::Focus;
use super::super::constants::{SCROLL_LINES_PAGE, SCROLL_LINES_SMALL};
use super::{HandleKeyContext, HandleResult};

pub(super) fn handle_detail_key(key: KeyEvent, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    let app = &mut *ctx.app;
    match key.code {
        KeyCode::Char('q') => return HandleResult::Break,
        KeyCode::Esc | KeyCode::Backspace => {
            app.close_detail();
            ctx.pending.detail = None;
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.detail_scroll = app.detail_scroll.saturating_add(1);
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.detail_scroll = app.detail_scroll.saturating_sub(1);
        }
        KeyCode::PageDown => {
            app.detail_scroll = app.detail_scroll.saturating_add(SCROLL_LINES_PAGE as u16);
        }
        KeyCode::PageUp => {
            app.detail_scroll = app.detail_scroll.saturating_sub(SCROLL_LINES_PAGE as u16);
        }
        KeyCode::Char(' ') => {
            app.detail_scroll = app.detail_scroll.saturating_add(SCROLL_LINES_SMALL as u16);
        }
        KeyCode::Home => app.detail_scroll = 0,
        KeyCode::Char('o') => super::open_photo(app),
        KeyCode::Char('y') => super::copy_photo_url(app),
        KeyCode::Char('m') => app.toggle_map(),
        KeyCode::Char('c') => app.toggle_chat(),
        KeyCode::Tab if app.chat_open => app.focus = Focus::Chat,
        _ => {}
    }
    HandleResult::Continue
}
