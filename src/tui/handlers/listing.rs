//! Listing view keys: selection, paging, filters, search.

use crossterm::event::{KeyCode, KeyEvent};

use super::super::app::{Focus, ListingSource, SearchPrompt};
use super::{HandleKeyContext, HandleResult};

pub(super) fn handle_listing_key(key: KeyEvent, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    match key.code {
        KeyCode::Char('q') => return HandleResult::Break,
        KeyCode::Down | KeyCode::Char('j') => ctx.app.select_next(),
        KeyCode::Up | KeyCode::Char('k') => ctx.app.select_prev(),
        KeyCode::Home | KeyCode::Char('g') => ctx.app.selected = 0,
        KeyCode::End | KeyCode::Char('G') => {
            ctx.app.selected = ctx.app.entries().len().saturating_sub(1);
        }
        KeyCode::Enter => super::open_detail(ctx),
        KeyCode::Right | KeyCode::PageDown | KeyCode::Char('n') => super::change_page(ctx, true),
        KeyCode::Left | KeyCode::PageUp | KeyCode::Char('p') => super::change_page(ctx, false),
        KeyCode::Char('f') => {
            ctx.app.filter_form = Some(super::FilterForm::new(&ctx.app.filters));
        }
        KeyCode::Char('/') => {
            let input = match &ctx.app.source {
                ListingSource::Search { query, .. } => query.clone(),
                ListingSource::Filters => String::new(),
            };
            ctx.app.search_prompt = Some(SearchPrompt { input });
        }
        KeyCode::Char('x') => super::clear_filters(ctx),
        KeyCode::Char('r') => super::reload(ctx),
        KeyCode::Char('m') => ctx.app.toggle_map(),
        KeyCode::Char('c') => ctx.app.toggle_chat(),
        KeyCode::Tab if ctx.app.chat_open => ctx.app.focus = Focus::Chat,
        KeyCode::Char('o') => super::open_photo(ctx.app),
        KeyCode::Char('y') => super::copy_photo_url(ctx.app),
        // Esc leaves a search and returns to the filtered listing.
        KeyCode::Esc => {
            if matches!(ctx.app.source, ListingSource::Search { .. }) {
                ctx.app.source = ListingSource::Filters;
                super::reload(ctx);
            }
        }
        _ => {}
    }
    HandleResult::Continue
}
