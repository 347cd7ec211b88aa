//! Popup handlers: filter form, search prompt.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::super::app::ListingSource;
use super::{HandleKeyContext, HandleResult};

/// Handle keys while the filter form is open. Enter applies and reloads, Esc discards.
pub(super) fn handle_filter_form(key: KeyEvent, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    let Some(form) = ctx.app.filter_form.as_mut() else {
        return HandleResult::Continue;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => ctx.app.filter_form = None,
        KeyCode::Enter => match form.apply(&ctx.app.filters) {
            Ok(filters) => {
                log::info!("Applying filters: {:?}", filters.to_query_pairs());
                ctx.app.filters = filters;
                ctx.app.source = ListingSource::Filters;
                ctx.app.filter_form = None;
                super::reload(ctx);
            }
            Err(e) => form.error = Some(e.to_string()),
        },
        KeyCode::Tab | KeyCode::Down => form.next_field(),
        KeyCode::BackTab | KeyCode::Up => form.prev_field(),
        KeyCode::Left => form.cycle_sort(-1),
        KeyCode::Right => form.cycle_sort(1),
        KeyCode::Backspace => form.backspace(),
        KeyCode::Char('u') if ctrl => form.clear_field(),
        KeyCode::Char('x') if ctrl => form.clear_all(),
        KeyCode::Char(c) if !ctrl => form.push_char(c),
        _ => {}
    }
    HandleResult::Continue
}

/// Handle keys in the natural-language search prompt.
pub(super) fn handle_search_prompt(key: KeyEvent, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    let Some(prompt) = ctx.app.search_prompt.as_mut() else {
        return HandleResult::Continue;
    };
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    match key.code {
        KeyCode::Esc => ctx.app.search_prompt = None,
        KeyCode::Enter => {
            let query = prompt.input.trim().to_string();
            ctx.app.search_prompt = None;
            if !query.is_empty() {
                ctx.app.source = ListingSource::Search { query, page: 0 };
                super::reload(ctx);
            }
        }
        KeyCode::Backspace => {
            prompt.input.pop();
        }
        KeyCode::Char('u') if ctrl => prompt.input.clear(),
        KeyCode::Char(c) if !ctrl => prompt.input.push(c),
        _ => {}
    }
    HandleResult::Continue
}
