//! Header: spinner, title, page counter, active filters or search.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use std::time::Instant;

use crate::core::app::NAME;
use crate::core::filters::{FilterField, PropertyFilters, sort_label};
use crate::core::property::format_count;

use super::super::app::{App, ListingSource};
use super::super::constants::{LOGO_IDLE, LOGO_LOADING};

/// Start time for header animation phase (loading spinner).
pub(crate) static HEADER_START: std::sync::OnceLock<Instant> = std::sync::OnceLock::new();

const PAGE_INFO_WIDTH: u16 = 36;

fn is_busy(app: &App) -> bool {
    app.loading || app.detail_loading || app.chat.is_waiting()
}

/// One-line summary of the active filters, e.g. "City: Irvine · Min beds: 3".
pub(crate) fn filter_summary(filters: &PropertyFilters) -> String {
    let parts: Vec<String> = FilterField::ALL
        .iter()
        .filter_map(|f| {
            let value = filters.value_of(*f)?;
            let shown = if *f == FilterField::Sort {
                sort_label(filters.sort.as_ref())
            } else {
                value
            };
            Some(format!("{}: {}", f.label(), shown))
        })
        .collect();
    if parts.is_empty() {
        "All properties".to_string()
    } else {
        parts.join(" · ")
    }
}

pub(crate) fn draw_header(f: &mut Frame, app: &App, area: Rect, accent: Color) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(0),
            Constraint::Length(PAGE_INFO_WIDTH),
        ])
        .split(rows[0]);

    let logo_symbol = if is_busy(app) {
        let start = HEADER_START.get_or_init(Instant::now);
        let phase = start.elapsed().as_millis() as usize;
        let frame = (phase / 80) % LOGO_LOADING.len();
        LOGO_LOADING[frame]
    } else {
        LOGO_IDLE
    };
    f.render_widget(
        Paragraph::new(Span::styled(format!("{} ", logo_symbol), Style::default().fg(accent))),
        top[0],
    );

    let title = Line::from(Span::styled(
        NAME,
        Style::default().fg(accent).add_modifier(Modifier::BOLD),
    ));
    f.render_widget(Paragraph::new(title).alignment(Alignment::Center), top[1]);

    let info = app.page_info();
    let page_text = if app.page.is_some() {
        format!(
            "{}{}{} · {} properties",
            if info.has_prev() { "◂ " } else { "" },
            info.label(),
            if info.has_next() { " ▸" } else { "" },
            format_count(info.total_elements as i64)
        )
    } else if app.loading {
        "Loading…".to_string()
    } else {
        String::new()
    };
    f.render_widget(
        Paragraph::new(Span::styled(page_text, Style::default().fg(Color::DarkGray)))
            .alignment(Alignment::Right),
        top[2],
    );

    let subtitle = match &app.source {
        ListingSource::Filters => Line::from(Span::styled(
            filter_summary(&app.filters),
            Style::default().fg(Color::DarkGray),
        )),
        ListingSource::Search { query, .. } => Line::from(vec![
            Span::styled("Search: ", Style::default().fg(Color::DarkGray)),
            Span::styled(format!("\"{}\"", query), Style::default().fg(accent)),
            Span::styled("  (Esc to leave)", Style::default().fg(Color::DarkGray)),
        ]),
    };
    f.render_widget(Paragraph::new(subtitle).alignment(Alignment::Center), rows[1]);
}
