//! Event handlers for the TUI: keyboard and mouse.

mod chat;
mod detail;
mod listing;
mod map;
mod popups;
mod spawn;

use crossterm::event::{KeyEvent, KeyEventKind, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::sync::mpsc;
use tokio::runtime::Runtime;
use tokio_util::sync::CancellationToken;

use crate::core::api::{ApiClient, ApiError};
use crate::core::chat::ChatResponse;

use super::app::{App, FilterForm, Focus, ListingSource, View};
use super::constants;
use super::shortcuts::Shortcut;

pub(crate) use spawn::{DetailReceiver, PageReceiver};

/// Holds the receiver for a chat request in progress.
pub struct PendingChat {
    pub result_rx: mpsc::Receiver<Result<ChatResponse, ApiError>>,
    /// Token to cancel the in-flight request.
    pub cancel_token: CancellationToken,
}

/// Requests in flight. Replacing a receiver drops the older request's result.
#[derive(Default)]
pub struct Pending {
    pub page: Option<PageReceiver>,
    pub detail: Option<DetailReceiver>,
    pub chat: Option<PendingChat>,
}

/// Result of handling an event: continue the loop or exit.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum HandleResult {
    Continue,
    Break,
}

/// Context for key event handling. Bundles mutable state to reduce parameter count.
pub struct HandleKeyContext<'a> {
    pub app: &'a mut App,
    pub client: &'a ApiClient,
    pub pending: &'a mut Pending,
    pub rt: &'a Arc<Runtime>,
}

/// Load the current page for the active source (filters or search).
pub(crate) fn reload(ctx: &mut HandleKeyContext<'_>) {
    ctx.app.loading = true;
    ctx.app.load_error = None;
    let rx = match &ctx.app.source {
        ListingSource::Filters => {
            log::debug!("Fetching page {} with filters", ctx.app.filters.page);
            spawn::spawn_fetch(ctx.rt, ctx.client, ctx.app.filters.clone())
        }
        ListingSource::Search { query, page } => {
            log::debug!("Searching \"{}\" page {}", query, page);
            spawn::spawn_search(
                ctx.rt,
                ctx.client,
                query.clone(),
                *page,
                ctx.app.filters.size,
            )
        }
    };
    ctx.pending.page = Some(rx);
}

/// Step one page forward or back, if there is one.
pub(crate) fn change_page(ctx: &mut HandleKeyContext<'_>, forward: bool) {
    let total = ctx.app.page_info().total_pages;
    let moved = match &mut ctx.app.source {
        ListingSource::Filters => {
            if forward {
                ctx.app.filters.next_page(total)
            } else {
                ctx.app.filters.prev_page(total)
            }
        }
        ListingSource::Search { page, .. } => {
            if forward && *page + 1 < total {
                *page += 1;
                true
            } else if !forward && *page > 0 {
                *page -= 1;
                true
            } else {
                false
            }
        }
    };
    if moved {
        reload(ctx);
    }
}

/// Show the detail view for the selected card and refresh it from the API.
pub(crate) fn open_detail(ctx: &mut HandleKeyContext<'_>) {
    ctx.app.open_detail();
    if let Some(id) = ctx.app.detail.as_ref().map(|p| p.id) {
        ctx.app.detail_loading = true;
        ctx.pending.detail = Some(spawn::spawn_detail(ctx.rt, ctx.client, id));
    }
}

/// Drop all filters and any search, back to the first page.
pub(crate) fn clear_filters(ctx: &mut HandleKeyContext<'_>) {
    ctx.app.filters.clear();
    ctx.app.source = ListingSource::Filters;
    reload(ctx);
}

pub(crate) fn open_photo(app: &mut App) {
    let Some(url) = app.focused_property().and_then(|p| p.primary_photo()) else {
        app.show_toast("No photo");
        return;
    };
    match opener::open(&url) {
        Ok(()) => app.show_toast("Opened"),
        Err(e) => {
            log::warn!("Failed to open {}: {}", url, e);
            app.show_toast("Could not open");
        }
    }
}

pub(crate) fn copy_photo_url(app: &mut App) {
    let Some(url) = app.focused_property().and_then(|p| p.primary_photo()) else {
        app.show_toast("No photo");
        return;
    };
    match arboard::Clipboard::new().and_then(|mut c| c.set_text(url)) {
        Ok(()) => app.show_toast("Copied"),
        Err(e) => {
            log::warn!("Clipboard unavailable: {}", e);
            app.show_toast("Copy failed");
        }
    }
}

fn handle_shortcut(shortcut: Shortcut, ctx: &mut HandleKeyContext<'_>) -> HandleResult {
    match shortcut {
        Shortcut::Quit => return HandleResult::Break,
        Shortcut::ToggleChat => ctx.app.toggle_chat(),
        Shortcut::Filters => {
            ctx.app.search_prompt = None;
            ctx.app.filter_form = Some(FilterForm::new(&ctx.app.filters));
        }
        Shortcut::Map => {
            if !ctx.app.has_popup() {
                ctx.app.toggle_map();
                ctx.app.focus = Focus::Main;
            }
        }
        Shortcut::Refresh => reload(ctx),
    }
    HandleResult::Continue
}

/// Handle a key event. Returns HandleResult::Break to exit the main loop.
pub fn handle_key(key: KeyEvent, mut ctx: HandleKeyContext<'_>) -> HandleResult {
    if key.kind != KeyEventKind::Press {
        return HandleResult::Continue;
    }

    if let Some(shortcut) = Shortcut::match_key(&key) {
        return handle_shortcut(shortcut, &mut ctx);
    }

    // Popups own the keyboard until closed.
    if ctx.app.filter_form.is_some() {
        return popups::handle_filter_form(key, &mut ctx);
    }
    if ctx.app.search_prompt.is_some() {
        return popups::handle_search_prompt(key, &mut ctx);
    }

    if ctx.app.focus == Focus::Chat && ctx.app.chat_open {
        return chat::handle_chat_key(key, &mut ctx);
    }

    match ctx.app.view {
        View::Listing => listing::handle_listing_key(key, &mut ctx),
        View::Detail => detail::handle_detail_key(key, &mut ctx),
        View::Map => map::handle_map_key(key, &mut ctx),
    }
}

/// Handle a mouse event: the wheel scrolls whatever has focus.
pub fn handle_mouse(mouse: MouseEvent, app: &mut App) -> HandleResult {
    if app.has_popup() {
        return HandleResult::Continue;
    }
    let up = match mouse.kind {
        MouseEventKind::ScrollUp => true,
        MouseEventKind::ScrollDown => false,
        _ => return HandleResult::Continue,
    };
    if app.focus == Focus::Chat && app.chat_open {
        if up {
            app.chat.scroll_up(constants::SCROLL_LINES_SMALL);
        } else {
            app.chat.scroll_down(constants::SCROLL_LINES_SMALL);
        }
        return HandleResult::Continue;
    }
    match app.view {
        View::Listing | View::Map => {
            if up {
                app.select_prev();
            } else {
                app.select_next();
            }
        }
        View::Detail => {
            let step = constants::SCROLL_LINES_SMALL as u16;
            app.detail_scroll = if up {
                app.detail_scroll.saturating_sub(step)
            } else {
                app.detail_scroll.saturating_add(step)
            };
        }
    }
    HandleResult::Continue
}

#[cfg(test)]
mod tests;
