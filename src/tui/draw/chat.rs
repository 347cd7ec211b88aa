//! Chat panel: transcript, suggested questions, input box.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState};

use crate::core::chat::{ChatMessage, Role};
use crate::core::util::truncate_chars;

use super::super::app::{ChatPanel, Focus};
use super::super::constants::{ACCENT, ACCENT_SECONDARY, CHAT_INPUT_LINES};
use super::super::text::wrap_paragraphs;

/// Max suggested questions shown under the transcript.
const MAX_SUGGESTIONS: usize = 4;

fn message_lines(
    lines: &mut Vec<Line<'static>>,
    msg: &ChatMessage,
    width: usize,
    show_timestamps: bool,
) {
    let (label, color) = match msg.role {
        Role::User => ("You", Color::Gray),
        Role::Assistant => ("Assistant", ACCENT_SECONDARY),
        Role::System => ("System", Color::DarkGray),
    };
    let mut header = vec![Span::styled(
        label,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];
    if show_timestamps && let Some(t) = msg.time_label() {
        header.push(Span::styled(
            format!(" {}", t),
            Style::default().fg(Color::DarkGray),
        ));
    }
    lines.push(Line::from(header));
    let border = Style::default().fg(color);
    for chunk in wrap_paragraphs(msg.content.trim(), width.saturating_sub(2).max(1)) {
        lines.push(Line::from(vec![Span::styled("│ ", border), Span::raw(chunk)]));
    }
    lines.push(Line::from(""));
}

/// Transcript as display lines wrapped to `width`.
pub(crate) fn transcript_lines(chat: &ChatPanel, width: usize) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for msg in chat.transcript.messages() {
        message_lines(&mut lines, msg, width, chat.show_timestamps);
    }
    if chat.is_waiting() {
        lines.push(Line::from(Span::styled(
            "Assistant",
            Style::default()
                .fg(ACCENT_SECONDARY)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(Span::styled(
            "│ Thinking…",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

pub(crate) fn draw_chat(f: &mut Frame, chat: &mut ChatPanel, focus: Focus, area: Rect) {
    let border = if focus == Focus::Chat {
        ACCENT
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Assistant ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let suggestions: Vec<String> = if chat.is_waiting() {
        vec![]
    } else {
        chat.transcript
            .suggestions()
            .iter()
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    };
    let suggestion_height = if suggestions.is_empty() {
        0
    } else {
        suggestions.len() as u16 + 1
    };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),
            Constraint::Length(suggestion_height),
            Constraint::Length(CHAT_INPUT_LINES),
        ])
        .split(inner);

    let width = chunks[0].width.saturating_sub(1) as usize;
    let lines = transcript_lines(chat, width);
    let height = chunks[0].height as usize;
    chat.last_max_scroll = lines.len().saturating_sub(height);
    let scroll = chat.scroll_line();
    f.render_widget(
        Paragraph::new(lines).scroll((chat.scroll_offset(), 0)),
        chunks[0],
    );
    if chat.last_max_scroll > 0 {
        let mut state = ScrollbarState::new(chat.last_max_scroll).position(scroll);
        f.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            chunks[0],
            &mut state,
        );
    }

    if !suggestions.is_empty() {
        let sw = chunks[1].width.saturating_sub(2) as usize;
        let mut s_lines = vec![Line::from(Span::styled(
            "Suggested (←→ pick, Enter ask)",
            Style::default().fg(Color::DarkGray),
        ))];
        for (i, q) in suggestions.iter().enumerate() {
            let selected = chat.selected_suggestion == Some(i);
            let style = if selected {
                Style::default().fg(Color::Black).bg(ACCENT)
            } else {
                Style::default().fg(ACCENT_SECONDARY)
            };
            s_lines.push(Line::from(Span::styled(
                format!("• {}", truncate_chars(q, sw)),
                style,
            )));
        }
        f.render_widget(Paragraph::new(s_lines), chunks[1]);
    }

    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border));
    let input_inner = input_block.inner(chunks[2]);
    let visible = input_inner.width.saturating_sub(1) as usize;
    let count = chat.input.chars().count();
    let shown: String = chat.input.chars().skip(count.saturating_sub(visible)).collect();
    let content = if chat.input.is_empty() {
        Line::from(Span::styled(
            "Ask about properties…",
            Style::default().fg(Color::DarkGray),
        ))
    } else {
        Line::from(shown.clone())
    };
    f.render_widget(Paragraph::new(content).block(input_block), chunks[2]);
    if focus == Focus::Chat && !chat.is_waiting() {
        let x = input_inner.x + shown.chars().count() as u16;
        f.set_cursor_position(Position::new(x, input_inner.y));
    }
}
