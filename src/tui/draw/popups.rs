//! Popups: filter form, natural-language search prompt.

use ratatui::Frame;
use ratatui::layout::{Constraint, Flex, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph};

use crate::core::filters::{FilterField, SortOrder, sort_label};

use super::super::app::{FilterForm, SearchPrompt};
use super::super::constants::ACCENT;

fn popup_area(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::vertical([Constraint::Length(height)]).flex(Flex::Center);
    let horizontal = Layout::horizontal([Constraint::Percentage(percent_x)]).flex(Flex::Center);
    let vertical_areas = vertical.split(area);
    let horizontal_areas = horizontal.split(vertical_areas[0]);
    horizontal_areas[0]
}

const LABEL_WIDTH: usize = 11;

pub(crate) fn draw_filter_form(f: &mut Frame, area: Rect, form: &FilterForm) {
    let height = FilterField::ALL.len() as u16 + 5;
    let popup_rect = popup_area(area, 60, height);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Filters ");

    let mut lines = Vec::with_capacity(FilterField::ALL.len() + 3);
    let mut cursor = None;
    for (i, field) in FilterField::ALL.iter().enumerate() {
        let focused = i == form.focused;
        let label_style = if focused {
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let raw = form.value(*field);
        let value = if *field == FilterField::Sort {
            let sort = raw.parse::<SortOrder>().ok();
            format!("◂ {} ▸", sort_label(sort.as_ref()))
        } else {
            raw.to_string()
        };
        if focused && *field != FilterField::Sort {
            cursor = Some((i as u16, value.chars().count() as u16));
        }
        lines.push(Line::from(vec![
            Span::styled(
                format!("{} {:<LABEL_WIDTH$}", if focused { "▸" } else { " " }, field.label()),
                label_style,
            ),
            Span::raw(value),
        ]));
    }
    lines.push(Line::from(""));
    match &form.error {
        Some(e) => lines.push(Line::from(Span::styled(e.clone(), Style::default().fg(Color::Red)))),
        None => lines.push(Line::from("")),
    }
    lines.push(Line::from(vec![
        Span::styled("Enter ", Style::default().fg(ACCENT)),
        Span::raw("apply  "),
        Span::styled("Tab/↑↓ ", Style::default().fg(Color::DarkGray)),
        Span::raw("field  "),
        Span::styled("←→ ", Style::default().fg(Color::DarkGray)),
        Span::raw("sort  "),
        Span::styled("Ctrl+U ", Style::default().fg(Color::DarkGray)),
        Span::raw("clear  "),
        Span::styled("Ctrl+X ", Style::default().fg(Color::DarkGray)),
        Span::raw("clear all  "),
        Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
        Span::raw("cancel"),
    ]));

    let inner = block.inner(popup_rect);
    f.render_widget(Clear, popup_rect);
    f.render_widget(Paragraph::new(lines).block(block), popup_rect);
    if let Some((row, col)) = cursor {
        let x = inner.x + LABEL_WIDTH as u16 + 2 + col;
        f.set_cursor_position(Position::new(x.min(inner.right().saturating_sub(1)), inner.y + row));
    }
}

pub(crate) fn draw_search_prompt(f: &mut Frame, area: Rect, prompt: &SearchPrompt) {
    let popup_rect = popup_area(area, 70, 5);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT))
        .title(" Search (e.g. 3 bed homes in Irvine under 900k) ");
    let inner = block.inner(popup_rect);
    let visible = inner.width.saturating_sub(1) as usize;
    let count = prompt.input.chars().count();
    let shown: String = prompt.input.chars().skip(count.saturating_sub(visible)).collect();
    let lines = vec![
        Line::from(shown.clone()),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter ", Style::default().fg(ACCENT)),
            Span::raw("search  "),
            Span::styled("Esc ", Style::default().fg(Color::DarkGray)),
            Span::raw("cancel"),
        ]),
    ];
    f.render_widget(Clear, popup_rect);
    f.render_widget(Paragraph::new(lines).block(block), popup_rect);
    f.set_cursor_position(Position::new(
        inner.x + shown.chars().count() as u16,
        inner.y,
    ));
}
