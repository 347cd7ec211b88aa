//! TUI application state: listing page, selection, views, popups, chat panel.

mod chat;
mod filter_form;

pub(crate) use chat::ChatPanel;
pub(crate) use filter_form::FilterForm;

use ratatui::widgets::ListState;
use std::time::{Duration, Instant};

use crate::core::api::ApiError;
use crate::core::filters::PropertyFilters;
use crate::core::geo::{self, Marker, Viewport};
use crate::core::page::{ListingEntry, PageInfo, PropertyPage};
use crate::core::property::Property;

use super::constants::TOAST_SECS;

/// Main area content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum View {
    Listing,
    Detail,
    Map,
}

/// Which pane receives keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Focus {
    Main,
    Chat,
}

/// Where the current page came from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ListingSource {
    Filters,
    /// Natural-language search; `page` is zero-based.
    Search { query: String, page: u32 },
}

/// Scroll position: either a specific line index, or "at bottom" (follow new content).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ScrollPosition {
    Line(usize),
    Bottom,
}

impl Default for ScrollPosition {
    fn default() -> Self {
        Self::Line(0)
    }
}

/// One-line search prompt popup.
#[derive(Debug, Default)]
pub(crate) struct SearchPrompt {
    pub input: String,
}

pub struct App {
    /// API root shown in the header and in error hints.
    pub(crate) base_url: String,
    pub(crate) filters: PropertyFilters,
    pub(crate) source: ListingSource,
    pub(crate) page: Option<PropertyPage>,
    /// Index into `page.content`.
    pub(crate) selected: usize,
    pub(crate) list_state: ListState,
    pub(crate) loading: bool,
    pub(crate) load_error: Option<String>,
    pub(crate) view: View,
    pub(crate) focus: Focus,
    /// Full record for the detail view; starts as the card's copy and is refreshed from the API.
    pub(crate) detail: Option<Property>,
    pub(crate) detail_loading: bool,
    pub(crate) detail_scroll: u16,
    /// Map viewport; `None` means fit to the markers on the current page.
    pub(crate) map_viewport: Option<Viewport>,
    pub(crate) filter_form: Option<FilterForm>,
    pub(crate) search_prompt: Option<SearchPrompt>,
    pub(crate) chat: ChatPanel,
    pub(crate) chat_open: bool,
    /// Short status message shown top right until the instant passes.
    pub(crate) toast: Option<(String, Instant)>,
}

impl App {
    pub fn new(base_url: String, filters: PropertyFilters, show_timestamps: bool) -> Self {
        Self {
            base_url,
            filters,
            source: ListingSource::Filters,
            page: None,
            selected: 0,
            list_state: ListState::default(),
            loading: false,
            load_error: None,
            view: View::Listing,
            focus: Focus::Main,
            detail: None,
            detail_loading: false,
            detail_scroll: 0,
            map_viewport: None,
            filter_form: None,
            search_prompt: None,
            chat: ChatPanel::new(show_timestamps),
            chat_open: false,
            toast: None,
        }
    }

    pub(crate) fn entries(&self) -> &[ListingEntry] {
        self.page
            .as_ref()
            .map(|p| p.content.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn page_info(&self) -> PageInfo {
        self.page.as_ref().map(PropertyPage::info).unwrap_or_default()
    }

    pub(crate) fn selected_entry(&self) -> Option<&ListingEntry> {
        self.entries().get(self.selected)
    }

    pub(crate) fn selected_property(&self) -> Option<&Property> {
        self.selected_entry().and_then(ListingEntry::property)
    }

    /// Property shown in the detail view, else the selected card.
    pub(crate) fn focused_property(&self) -> Option<&Property> {
        match self.view {
            View::Detail => self.detail.as_ref(),
            View::Listing | View::Map => self.selected_property(),
        }
    }

    /// Ids of the properties on screen, sent as chat context.
    pub(crate) fn visible_property_ids(&self) -> Vec<i64> {
        self.page
            .as_ref()
            .map(PropertyPage::property_ids)
            .unwrap_or_default()
    }

    pub(crate) fn markers(&self) -> Vec<Marker> {
        match &self.page {
            Some(p) => geo::markers(p.properties()),
            None => vec![],
        }
    }

    /// Current map viewport, fitted to the page when the user has not moved it.
    pub(crate) fn viewport(&self) -> Viewport {
        self.map_viewport
            .unwrap_or_else(|| Viewport::fit(&self.markers()))
    }

    pub(crate) fn select_next(&mut self) {
        let len = self.entries().len();
        if len > 0 {
            self.selected = (self.selected + 1).min(len - 1);
        }
    }

    pub(crate) fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    /// Install a freshly loaded page. Selection returns to the top and the map refits.
    pub(crate) fn set_page(&mut self, page: PropertyPage) {
        let bad = page.malformed_count();
        if bad > 0 {
            log::warn!("{} listing record(s) on this page could not be decoded", bad);
        }
        if let ListingSource::Filters = self.source {
            self.filters.page = page.number;
        }
        self.page = Some(page);
        self.selected = 0;
        self.list_state = ListState::default();
        self.map_viewport = None;
        self.loading = false;
        self.load_error = None;
    }

    pub(crate) fn set_load_error(&mut self, e: &ApiError) {
        log::error!("Listing request failed: {}", e);
        self.loading = false;
        self.load_error = Some(e.user_message(&self.base_url));
    }

    pub(crate) fn open_detail(&mut self) {
        if let Some(p) = self.selected_property().cloned() {
            self.detail = Some(p);
            self.detail_scroll = 0;
            self.view = View::Detail;
        }
    }

    pub(crate) fn close_detail(&mut self) {
        self.view = View::Listing;
        self.detail = None;
        self.detail_loading = false;
    }

    pub(crate) fn toggle_map(&mut self) {
        self.view = match self.view {
            View::Map => View::Listing,
            View::Listing | View::Detail => View::Map,
        };
    }

    pub(crate) fn toggle_chat(&mut self) {
        if self.chat_open && self.focus == Focus::Main {
            self.focus = Focus::Chat;
            return;
        }
        self.chat_open = !self.chat_open;
        self.focus = if self.chat_open {
            Focus::Chat
        } else {
            Focus::Main
        };
    }

    pub(crate) fn show_toast(&mut self, msg: impl Into<String>) {
        self.toast = Some((msg.into(), Instant::now() + Duration::from_secs(TOAST_SECS)));
    }

    /// True while any popup owns the keyboard.
    pub(crate) fn has_popup(&self) -> bool {
        self.filter_form.is_some() || self.search_prompt.is_some()
    }
}
