//! Map view keys: pan, zoom, select.

use crossterm::event::{KeyCode, KeyEvent};

use super::super::app::{Focus, View};
use super::super::constants::{MAP_PAN_STEP, MAP_ZOOM_STEP};
use super::{HandleKeyContext, HandleResult};

pub(super) fn handle_map_key(key: KeyEvent, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    let viewport = ctx.app.viewport();
    let moved = match key.code {
        KeyCode::Char('q') => return HandleResult::Break,
        KeyCode::Left | KeyCode::Char('h') => Some(viewport.pan(0.0, -MAP_PAN_STEP)),
        KeyCode::Right | KeyCode::Char('l') => Some(viewport.pan(0.0, MAP_PAN_STEP)),
        KeyCode::Up => Some(viewport.pan(MAP_PAN_STEP, 0.0)),
        KeyCode::Down => Some(viewport.pan(-MAP_PAN_STEP, 0.0)),
        KeyCode::Char('+') | KeyCode::Char('=') => Some(viewport.zoom(MAP_ZOOM_STEP)),
        KeyCode::Char('-') => Some(viewport.zoom(1.0 / MAP_ZOOM_STEP)),
        KeyCode::Char('0') => {
            ctx.app.map_viewport = None;
            None
        }
        KeyCode::Char('j') => {
            ctx.app.select_next();
            None
        }
        KeyCode::Char('k') => {
            ctx.app.select_prev();
            None
        }
        KeyCode::Enter => {
            super::open_detail(ctx);
            None
        }
        KeyCode::Esc | KeyCode::Char('m') => {
            ctx.app.view = View::Listing;
            None
        }
        KeyCode::Char('n') | KeyCode::PageDown => {
            super::change_page(ctx, true);
            None
        }
        KeyCode::Char('p') | KeyCode::PageUp => {
            super::change_page(ctx, false);
            None
        }
        KeyCode::Char('c') => {
            ctx.app.toggle_chat();
            None
        }
        KeyCode::Tab if ctx.app.chat_open => {
            ctx.app.focus = Focus::Chat;
            None
        }
        _ => None,
    };
    if let Some(v) = moved {
        ctx.app.map_viewport = Some(v);
    }
    HandleResult::Continue
}
