//! TUI rendering: layout and widgets for the listing browser.

mod chat;
mod detail;
mod header;
mod listing;
mod map;
mod popups;

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use std::time::Instant;

use super::app::{App, View};
use super::constants::{ACCENT, CHAT_PANEL_PERCENT};
use super::shortcuts::labels;

const HEADER_HEIGHT: u16 = 2;
const BOTTOM_BAR_HEIGHT: u16 = 2;

pub(super) fn draw(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(HEADER_HEIGHT),
            Constraint::Min(3),
            Constraint::Length(BOTTOM_BAR_HEIGHT),
        ])
        .split(area);
    header::draw_header(f, app, chunks[0], ACCENT);

    let (main_area, chat_area) = if app.chat_open {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(100 - CHAT_PANEL_PERCENT),
                Constraint::Percentage(CHAT_PANEL_PERCENT),
            ])
            .split(chunks[1]);
        (cols[0], Some(cols[1]))
    } else {
        (chunks[1], None)
    };

    match app.view {
        View::Listing => listing::draw_listing(f, app, main_area),
        View::Detail => detail::draw_detail(f, app, main_area),
        View::Map => map::draw_map(f, app, main_area),
    }
    if let Some(chat_area) = chat_area {
        chat::draw_chat(f, &mut app.chat, app.focus, chat_area);
    }

    let bar = labels::bottom_bar(app.view, app.focus, app.chat.is_waiting());
    f.render_widget(Paragraph::new(bar).alignment(Alignment::Right), chunks[2]);

    if let Some(ref form) = app.filter_form {
        popups::draw_filter_form(f, area, form);
    }
    if let Some(ref prompt) = app.search_prompt {
        popups::draw_search_prompt(f, area, prompt);
    }

    // Toast: top right, below header. Opaque background so it's visible over the listing.
    if let Some((ref text, deadline)) = app.toast {
        if deadline > Instant::now() {
            let toast_text = format!(" {} ", text);
            let toast_width = toast_text.chars().count() as u16 + 2;
            let toast_area = Rect {
                x: area.x + area.width.saturating_sub(toast_width).saturating_sub(1),
                y: area.y + HEADER_HEIGHT,
                width: toast_width.min(area.width),
                height: 3u16.min(area.height.saturating_sub(HEADER_HEIGHT)),
            };
            f.render_widget(Clear, toast_area);
            let block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(ACCENT))
                .style(Style::default().bg(Color::Black));
            let para = Paragraph::new(Line::from(toast_text))
                .block(block)
                .style(Style::default().fg(ACCENT).bg(Color::Black));
            f.render_widget(para, toast_area);
        } else {
            app.toast = None;
        }
    }
}
