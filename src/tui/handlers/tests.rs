use super::*;
use crossterm::event::{KeyCode, KeyEventState, KeyModifiers};
use std::time::Duration;

use crate::core::filters::PropertyFilters;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent {
        code,
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

fn ctrl(c: char) -> KeyEvent {
    KeyEvent {
        modifiers: KeyModifiers::CONTROL,
        ..key(KeyCode::Char(c))
    }
}

struct Harness {
    app: App,
    client: ApiClient,
    pending: Pending,
    rt: Arc<Runtime>,
}

impl Harness {
    fn new() -> Self {
        // Nothing listens on the discard port; spawned requests just fail.
        let client = ApiClient::new("http://127.0.0.1:9", Duration::from_millis(200)).unwrap();
        Self {
            app: App::new(
                client.base_url().to_string(),
                PropertyFilters::default(),
                false,
            ),
            client,
            pending: Pending::default(),
            rt: Arc::new(Runtime::new().unwrap()),
        }
    }

    fn press(&mut self, k: KeyEvent) -> HandleResult {
        handle_key(
            k,
            HandleKeyContext {
                app: &mut self.app,
                client: &self.client,
                pending: &mut self.pending,
                rt: &self.rt,
            },
        )
    }

    fn type_str(&mut self, s: &str) {
        for c in s.chars() {
            self.press(key(KeyCode::Char(c)));
        }
    }
}

#[test]
fn quit_keys() {
    let mut h = Harness::new();
    assert_eq!(h.press(ctrl('c')), HandleResult::Break);
    assert_eq!(h.press(key(KeyCode::Char('q'))), HandleResult::Break);
}

#[test]
fn filter_form_applies_and_reloads() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('f')));
    assert!(h.app.filter_form.is_some());
    h.type_str("Irvine");
    h.press(key(KeyCode::Enter));
    assert!(h.app.filter_form.is_none());
    assert_eq!(h.app.filters.city.as_deref(), Some("Irvine"));
    assert!(h.app.loading);
    assert!(h.pending.page.is_some());
}

#[test]
fn filter_form_keeps_open_on_bad_number() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('f')));
    for _ in 0..3 {
        h.press(key(KeyCode::Tab));
    }
    h.type_str("cheap");
    h.press(key(KeyCode::Enter));
    let form = h.app.filter_form.as_ref().unwrap();
    assert!(form.error.is_some());
    assert_eq!(h.app.filters.min_price, None);
    assert!(h.pending.page.is_none());
}

#[test]
fn filter_form_escape_discards_edits() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('f')));
    h.type_str("Tustin");
    h.press(key(KeyCode::Esc));
    assert!(h.app.filter_form.is_none());
    assert_eq!(h.app.filters.city, None);
}

#[test]
fn search_prompt_switches_source() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('/')));
    h.type_str("  pool home ");
    h.press(key(KeyCode::Enter));
    assert_eq!(
        h.app.source,
        ListingSource::Search {
            query: "pool home".to_string(),
            page: 0
        }
    );
    assert!(h.pending.page.is_some());

    h.pending.page = None;
    h.press(key(KeyCode::Esc));
    assert_eq!(h.app.source, ListingSource::Filters);
    assert!(h.pending.page.is_some());
}

#[test]
fn blank_search_does_nothing() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('/')));
    h.type_str("   ");
    h.press(key(KeyCode::Enter));
    assert!(h.app.search_prompt.is_none());
    assert_eq!(h.app.source, ListingSource::Filters);
    assert!(h.pending.page.is_none());
}

#[test]
fn paging_without_a_next_page_does_not_reload() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Right));
    h.press(key(KeyCode::Left));
    assert!(h.pending.page.is_none());
    assert_eq!(h.app.filters.page, 0);
}

#[test]
fn chat_send_and_cancel() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('c')));
    assert_eq!(h.app.focus, Focus::Chat);
    h.type_str("Any condos?");
    h.press(key(KeyCode::Enter));
    assert!(h.pending.chat.is_some());
    assert!(h.app.chat.is_waiting());
    assert!(h.app.chat.input.is_empty());

    h.press(key(KeyCode::Esc));
    assert!(h.pending.chat.is_none());
    assert!(!h.app.chat.is_waiting());
    assert_eq!(h.app.focus, Focus::Chat);
    let last = h.app.chat.transcript.messages().last().unwrap();
    assert_eq!(last.content, "(Request cancelled)");

    h.press(key(KeyCode::Esc));
    assert_eq!(h.app.focus, Focus::Main);
}

#[test]
fn chat_letters_do_not_trigger_listing_keys() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('c')));
    h.type_str("fmq");
    assert_eq!(h.app.chat.input, "fmq");
    assert!(h.app.filter_form.is_none());
    assert_eq!(h.app.view, View::Listing);
}

#[test]
fn map_toggles_and_pans() {
    let mut h = Harness::new();
    h.press(key(KeyCode::Char('m')));
    assert_eq!(h.app.view, View::Map);
    let before = h.app.viewport();
    h.press(key(KeyCode::Right));
    let after = h.app.viewport();
    assert!(after.min_lng > before.min_lng);
    h.press(key(KeyCode::Char('0')));
    assert_eq!(h.app.map_viewport, None);
    h.press(key(KeyCode::Esc));
    assert_eq!(h.app.view, View::Listing);
}

#[test]
fn mouse_wheel_scrolls_detail() {
    let mut h = Harness::new();
    h.app.view = View::Detail;
    let wheel = MouseEvent {
        kind: MouseEventKind::ScrollDown,
        column: 0,
        row: 0,
        modifiers: KeyModifiers::empty(),
    };
    handle_mouse(wheel, &mut h.app);
    assert_eq!(h.app.detail_scroll, constants::SCROLL_LINES_SMALL as u16);
}
