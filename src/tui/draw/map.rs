//! Map view: world outline on a braille canvas with clustered price markers.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Map, MapResolution};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::core::geo::{self, Cluster, Marker};
use crate::core::property::price_label;
use crate::core::util::truncate_chars;

use super::super::app::{App, Focus};
use super::super::constants::{ACCENT, MAP_CELL_COLS, MAP_CELL_ROWS, PRICE};

/// Marker text: the price for a single listing, the count for a cluster.
fn cluster_label(cluster: &Cluster, markers: &[Marker]) -> String {
    if cluster.len() == 1 {
        let price = markers
            .iter()
            .find(|m| Some(&m.id) == cluster.ids.first())
            .and_then(|m| m.price);
        format!("● {}", compact_price(price))
    } else {
        format!("◉ {}", cluster.len())
    }
}

/// "$850k", "$1.2M"; falls back to the full label for small or missing prices.
fn compact_price(price: Option<f64>) -> String {
    match price {
        Some(p) if p >= 1_000_000.0 => format!("${:.1}M", p / 1_000_000.0),
        Some(p) if p >= 1_000.0 => format!("${:.0}k", p / 1_000.0),
        _ => price_label(price),
    }
}

pub(crate) fn draw_map(f: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .split(area);
    let border = if app.focus == Focus::Main {
        ACCENT
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Map ");
    let inner = block.inner(chunks[0]);

    let markers = app.markers();
    let viewport = app.viewport();
    let cols = (inner.width / MAP_CELL_COLS).max(1) as usize;
    let rows = (inner.height / MAP_CELL_ROWS).max(1) as usize;
    let clusters = geo::cluster(&markers, &viewport, cols, rows);
    let selected_id = app.selected_property().map(|p| p.id);

    let labels: Vec<(f64, f64, Line<'static>)> = clusters
        .iter()
        .map(|c| {
            let selected = selected_id.is_some_and(|id| c.ids.contains(&id));
            let style = if selected {
                Style::default()
                    .fg(Color::Black)
                    .bg(ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(PRICE)
            };
            (
                c.center.lng,
                c.center.lat,
                Line::from(Span::styled(cluster_label(c, &markers), style)),
            )
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .marker(symbols::Marker::Braille)
        .x_bounds([viewport.min_lng, viewport.max_lng])
        .y_bounds([viewport.min_lat, viewport.max_lat])
        .paint(move |ctx| {
            ctx.draw(&Map {
                resolution: MapResolution::High,
                color: Color::DarkGray,
            });
            ctx.layer();
            for (x, y, line) in &labels {
                ctx.print(*x, *y, line.clone());
            }
        });
    f.render_widget(canvas, chunks[0]);

    let missing = app
        .page
        .as_ref()
        .map(|p| p.properties().count().saturating_sub(markers.len()))
        .unwrap_or(0);
    let mut stats = geo::stats_label(markers.len());
    if missing > 0 {
        stats.push_str(&format!(" · {} without location", missing));
    }
    let mut spans = vec![Span::styled(stats, Style::default().fg(Color::DarkGray))];
    if let Some(p) = app.selected_property() {
        let text = format!(
            "  ▸ #{} {} {}",
            p.id,
            price_label(p.price),
            p.display_address().unwrap_or_default()
        );
        spans.push(Span::styled(
            truncate_chars(&text, chunks[1].width as usize),
            Style::default().fg(ACCENT),
        ));
    }
    f.render_widget(Paragraph::new(Line::from(spans)), chunks[1]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compact_prices() {
        assert_eq!(compact_price(Some(850_000.0)), "$850k");
        assert_eq!(compact_price(Some(1_240_000.0)), "$1.2M");
        assert_eq!(compact_price(Some(900.0)), "$900");
        assert_eq!(compact_price(None), "N/A");
    }
}
