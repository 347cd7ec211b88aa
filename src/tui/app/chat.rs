//! Chat panel state: transcript, input line, scroll, suggestion picker.

use crate::core::chat::{ChatRequest, ChatResponse, Transcript};

use super::ScrollPosition;

pub(crate) struct ChatPanel {
    pub(crate) transcript: Transcript,
    pub(crate) input: String,
    pub(crate) scroll: ScrollPosition,
    /// Updated by draw; scroll positions clamp to it.
    pub(crate) last_max_scroll: usize,
    /// Highlighted suggested question; only used while the input is empty.
    pub(crate) selected_suggestion: Option<usize>,
    pub(crate) show_timestamps: bool,
}

impl ChatPanel {
    pub(crate) fn new(show_timestamps: bool) -> Self {
        Self {
            transcript: Transcript::new(),
            input: String::new(),
            scroll: ScrollPosition::Bottom,
            last_max_scroll: 0,
            selected_suggestion: None,
            show_timestamps,
        }
    }

    pub(crate) fn is_waiting(&self) -> bool {
        self.transcript.is_waiting()
    }

    pub(crate) fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.selected_suggestion = None;
    }

    pub(crate) fn backspace(&mut self) {
        self.input.pop();
    }

    /// Move the suggestion highlight by `delta`, wrapping around.
    pub(crate) fn cycle_suggestion(&mut self, delta: isize) {
        let n = self.transcript.suggestions().len();
        if n == 0 || !self.input.is_empty() {
            self.selected_suggestion = None;
            return;
        }
        let next = match self.selected_suggestion {
            None if delta < 0 => n - 1,
            None => 0,
            Some(i) => (i as isize + delta).rem_euclid(n as isize) as usize,
        };
        self.selected_suggestion = Some(next);
    }

    /// Build the request for the typed input, or the highlighted suggestion when the input is empty.
    /// Returns `None` when there is nothing to send or a reply is pending.
    pub(crate) fn submit(&mut self, property_ids: &[i64]) -> Option<ChatRequest> {
        let text = if self.input.trim().is_empty() {
            let idx = self.selected_suggestion?;
            self.transcript.suggestions().get(idx)?.clone()
        } else {
            self.input.clone()
        };
        let request = self.transcript.begin_send(&text, property_ids)?;
        self.input.clear();
        self.selected_suggestion = None;
        self.scroll = ScrollPosition::Bottom;
        Some(request)
    }

    pub(crate) fn finish(&mut self, result: Result<ChatResponse, String>) {
        self.transcript.finish(result);
        self.scroll = ScrollPosition::Bottom;
    }

    pub(crate) fn cancel(&mut self) {
        self.transcript.cancel();
        self.scroll = ScrollPosition::Bottom;
    }

    /// Must be called before scroll_up/scroll_down when at bottom.
    pub(crate) fn materialize_scroll(&mut self) {
        if self.scroll == ScrollPosition::Bottom {
            self.scroll = ScrollPosition::Line(self.last_max_scroll);
        }
    }

    pub(crate) fn scroll_down(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            let next = (pos + n).min(self.last_max_scroll);
            self.scroll = if next == self.last_max_scroll {
                ScrollPosition::Bottom
            } else {
                ScrollPosition::Line(next)
            };
        }
    }

    pub(crate) fn scroll_up(&mut self, n: usize) {
        self.materialize_scroll();
        if let ScrollPosition::Line(pos) = self.scroll {
            self.scroll = ScrollPosition::Line(pos.saturating_sub(n));
        }
    }

    /// Resolve scroll position to a concrete line index.
    pub(crate) fn scroll_line(&self) -> usize {
        match self.scroll {
            ScrollPosition::Line(n) => n.min(self.last_max_scroll),
            ScrollPosition::Bottom => self.last_max_scroll,
        }
    }

    /// `scroll_line` as a `Paragraph` offset, saturating at `u16::MAX`.
    pub(crate) fn scroll_offset(&self) -> u16 {
        u16::try_from(self.scroll_line()).unwrap_or(u16::MAX)
    }
}
