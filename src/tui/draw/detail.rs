//! Detail view: every known fact about one property, photo link, remarks.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::property::{Property, format_price};

use super::super::app::{App, Focus};
use super::super::constants::{ACCENT, ACCENT_SECONDARY, PRICE};
use super::super::text::wrap_paragraphs;

pub(crate) fn detail_lines(p: &Property, width: usize) -> Vec<Line<'static>> {
    let dim = Style::default().fg(Color::DarkGray);
    let mut lines = vec![Line::from(vec![
        Span::styled(
            format_price(p.price),
            Style::default().fg(PRICE).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("  #{}", p.id), dim),
    ])];
    if let Some(addr) = p.display_address() {
        lines.push(Line::from(Span::styled(
            addr.to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        )));
    }
    let location = p.location_line();
    if !location.is_empty() {
        lines.push(Line::from(location));
    }
    let summary = p.summary_line();
    if !summary.is_empty() {
        lines.push(Line::from(Span::styled(summary, Style::default().fg(ACCENT))));
    }
    lines.push(Line::from(""));

    let fields = p.detail_fields();
    let label_width = fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    let value_width = width.saturating_sub(label_width + 2).max(1);
    for (label, value) in fields {
        for (i, chunk) in wrap_paragraphs(&value, value_width).into_iter().enumerate() {
            let label = if i == 0 { label } else { "" };
            lines.push(Line::from(vec![
                Span::styled(format!("{:<label_width$}  ", label), dim),
                Span::raw(chunk),
            ]));
        }
    }

    if let Some(url) = p.primary_photo() {
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled("Photo  ", dim),
            Span::styled(url, Style::default().fg(ACCENT_SECONDARY)),
        ]));
    }

    if let Some(remarks) = p.remarks.as_deref().map(str::trim).filter(|r| !r.is_empty()) {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled("Description", dim)));
        for chunk in wrap_paragraphs(remarks, width.max(1)) {
            lines.push(Line::from(chunk));
        }
    }
    lines
}

pub(crate) fn draw_detail(f: &mut Frame, app: &mut App, area: Rect) {
    let border = if app.focus == Focus::Main {
        ACCENT
    } else {
        Color::DarkGray
    };
    let title = if app.detail_loading {
        " Property · refreshing… "
    } else {
        " Property "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(title);
    let inner = block.inner(area);

    let Some(p) = app.detail.as_ref() else {
        f.render_widget(Paragraph::new("No property selected").block(block), area);
        return;
    };
    let lines = detail_lines(p, inner.width.saturating_sub(1) as usize);
    let max_scroll =
        u16::try_from(lines.len().saturating_sub(inner.height as usize)).unwrap_or(u16::MAX);
    app.detail_scroll = app.detail_scroll.min(max_scroll);

    let total = lines.len();
    f.render_widget(
        Paragraph::new(lines)
            .block(block)
            .scroll((app.detail_scroll, 0)),
        area,
    );
    if max_scroll > 0 {
        let mut state = ScrollbarState::new(total).position(app.detail_scroll as usize);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            inner,
            &mut state,
        );
    }
}
