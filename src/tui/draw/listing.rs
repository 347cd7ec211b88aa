//! Listing: one card per property, with a placeholder card for unreadable records.

use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};

use crate::core::page::ListingEntry;
use crate::core::property::{Property, format_price};
use crate::core::util::truncate_chars;

use super::super::app::{App, Focus};
use super::super::constants::{ACCENT, PRICE};

fn property_card(p: &Property, width: usize) -> Text<'static> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut first = vec![
        Span::styled(
            format_price(p.price),
            Style::default().fg(PRICE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  #{}", p.id), dim),
    ];
    if let Some(status) = p.status() {
        first.push(Span::styled(format!("  {}", status), Style::default().fg(ACCENT)));
    }
    let summary = p.summary_line();
    let address = p.display_address().unwrap_or("Address not available");
    let location = p.location_line();
    Text::from(vec![
        Line::from(first),
        Line::from(truncate_chars(&summary, width)),
        Line::from(truncate_chars(address, width)),
        Line::from(Span::styled(truncate_chars(&location, width), dim)),
        Line::from(""),
    ])
}

fn malformed_card(id: Option<i64>, reason: &str, width: usize) -> Text<'static> {
    let title = match id {
        Some(id) => format!("Listing #{} could not be read", id),
        None => "Listing could not be read".to_string(),
    };
    Text::from(vec![
        Line::from(Span::styled(title, Style::default().fg(Color::Red))),
        Line::from(Span::styled(
            truncate_chars(reason, width),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(""),
        Line::from(""),
    ])
}

fn draw_message(f: &mut Frame, area: Rect, block: Block<'_>, text: Text<'_>) {
    f.render_widget(
        Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

pub(crate) fn draw_listing(f: &mut Frame, app: &mut App, area: Rect) {
    let border = if app.focus == Focus::Main {
        ACCENT
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Listings ");

    if let Some(err) = app.load_error.clone() {
        let text = Text::from(vec![
            Line::from(""),
            Line::from(Span::styled(err, Style::default().fg(Color::Red))),
            Line::from(""),
            Line::from(Span::styled(
                "r retry  f filters  x clear",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        draw_message(f, area, block, text);
        return;
    }
    if app.page.is_none() {
        let msg = if app.loading { "Loading properties…" } else { "" };
        draw_message(f, area, block, Text::from(vec![Line::from(""), Line::from(msg)]));
        return;
    }
    if app.entries().is_empty() {
        let text = Text::from(vec![
            Line::from(""),
            Line::from("No properties found"),
            Line::from(Span::styled(
                "Try different filters (f) or clear them (x)",
                Style::default().fg(Color::DarkGray),
            )),
        ]);
        draw_message(f, area, block, text);
        return;
    }

    let width = block.inner(area).width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .entries()
        .iter()
        .map(|entry| {
            ListItem::new(match entry {
                ListingEntry::Property(p) => property_card(p, width),
                ListingEntry::Malformed { id, reason } => malformed_card(*id, reason, width),
            })
        })
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_symbol("▌ ")
        .highlight_style(Style::default().add_modifier(Modifier::BOLD));
    app.list_state.select(Some(app.selected));
    f.render_stateful_widget(list, area, &mut app.list_state);
}
