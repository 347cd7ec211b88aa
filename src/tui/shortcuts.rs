//! Centralized keyboard shortcuts.
//!
//! Global shortcuts work in every view, including while the chat panel has focus:
//!
//! | Action        | Keys                                    |
//! |---------------|-----------------------------------------|
//! | Chat panel    | Alt+C, ç (Option+C Mac)                 |
//! | Filters       | Alt+F, ƒ (Option+F Mac)                 |
//! | Map           | Alt+M, µ (Option+M Mac)                 |
//! | Refresh       | Ctrl+R                                  |
//! | Quit          | Ctrl+C                                  |
//!
//! Single-letter keys (f, m, c, /, …) do the same when the listing has focus.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Detected shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Open or focus the chat panel (Alt+C)
    ToggleChat,
    /// Open the filter form (Alt+F)
    Filters,
    /// Toggle the map view (Alt+M)
    Map,
    /// Reload the current page (Ctrl+R)
    Refresh,
    /// Quit (Ctrl+C)
    Quit,
}

/// Characters produced by Option+key on Mac (Option not configured as Meta).
const MAC_OPTION_C: char = '\u{00E7}'; // ç
const MAC_OPTION_F: char = '\u{0192}'; // ƒ
const MAC_OPTION_M: char = '\u{00B5}'; // µ

impl Shortcut {
    /// Returns the shortcut if the key matches.
    pub fn match_key(key: &KeyEvent) -> Option<Shortcut> {
        if key.kind != KeyEventKind::Press {
            return None;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('c') if ctrl => Some(Shortcut::Quit),
            KeyCode::Char('r') if ctrl => Some(Shortcut::Refresh),
            KeyCode::Char('c') if alt => Some(Shortcut::ToggleChat),
            KeyCode::Char('f') if alt => Some(Shortcut::Filters),
            KeyCode::Char('m') if alt => Some(Shortcut::Map),
            KeyCode::Char(MAC_OPTION_C) => Some(Shortcut::ToggleChat),
            KeyCode::Char(MAC_OPTION_F) => Some(Shortcut::Filters),
            KeyCode::Char(MAC_OPTION_M) => Some(Shortcut::Map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shortcut;
    use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers};

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::empty(),
        }
    }

    #[test]
    fn match_quit_ctrl_c() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Shortcut::Quit)
        );
    }

    #[test]
    fn match_refresh_ctrl_r() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            Some(Shortcut::Refresh)
        );
    }

    #[test]
    fn match_alt_keys() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::ALT)),
            Some(Shortcut::ToggleChat)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('f'), KeyModifiers::ALT)),
            Some(Shortcut::Filters)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('m'), KeyModifiers::ALT)),
            Some(Shortcut::Map)
        );
    }

    #[test]
    fn match_mac_option_chars() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('µ'), KeyModifiers::empty())),
            Some(Shortcut::Map)
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('ç'), KeyModifiers::empty())),
            Some(Shortcut::ToggleChat)
        );
    }

    #[test]
    fn plain_letters_are_not_global() {
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('m'), KeyModifiers::empty())),
            None
        );
        assert_eq!(
            Shortcut::match_key(&key(KeyCode::Char('c'), KeyModifiers::SHIFT)),
            None
        );
    }

    #[test]
    fn match_key_release_ignored() {
        let key_release = KeyEvent {
            code: KeyCode::Char('c'),
            modifiers: KeyModifiers::CONTROL,
            kind: KeyEventKind::Release,
            state: KeyEventState::empty(),
        };
        assert_eq!(Shortcut::match_key(&key_release), None);
    }
}

/// Labels for the bottom bar, depending on what has focus.
pub mod labels {
    use ratatui::style::Color;
    use ratatui::text::{Line, Span, Text};

    use super::super::app::{Focus, View};

    const DIM: Color = Color::DarkGray;

    fn hints(pairs: &[(&'static str, &'static str)]) -> Line<'static> {
        let mut spans = Vec::with_capacity(pairs.len() * 2);
        for (i, (key, action)) in pairs.iter().enumerate() {
            let key = if i == 0 {
                format!("{} ", key)
            } else {
                format!("  {} ", key)
            };
            spans.push(Span::styled(key, DIM));
            spans.push(Span::raw(*action));
        }
        Line::from(spans)
    }

    pub fn bottom_bar(view: View, focus: Focus, chat_busy: bool) -> Text<'static> {
        if focus == Focus::Chat {
            if chat_busy {
                return Text::from(Line::from(vec![
                    Span::styled("Esc ", Color::Yellow),
                    Span::raw("cancel"),
                    Span::styled("  ↑↓ ", DIM),
                    Span::raw("scroll"),
                ]));
            }
            return Text::from(vec![
                hints(&[
                    ("Enter", "send"),
                    ("←→", "pick suggestion"),
                    ("↑↓", "scroll"),
                    ("Ctrl+U", "clear"),
                ]),
                hints(&[("Tab", "listings"), ("Esc", "back"), ("Alt+C", "close"), ("Ctrl+C", "quit")]),
            ]);
        }
        match view {
            View::Listing => Text::from(vec![
                hints(&[
                    ("↑↓", "select"),
                    ("Enter", "details"),
                    ("←→", "page"),
                    ("f", "filters"),
                    ("/", "search"),
                    ("x", "clear"),
                    ("r", "refresh"),
                ]),
                hints(&[
                    ("m", "map"),
                    ("c", "chat"),
                    ("o", "open photo"),
                    ("y", "copy photo URL"),
                    ("q", "quit"),
                ]),
            ]),
            View::Detail => Text::from(vec![
                hints(&[("Esc", "back"), ("↑↓", "scroll"), ("o", "open photo"), ("y", "copy photo URL")]),
                hints(&[("m", "map"), ("c", "chat"), ("q", "quit")]),
            ]),
            View::Map => Text::from(vec![
                hints(&[
                    ("←→↑↓", "pan"),
                    ("+/-", "zoom"),
                    ("0", "fit"),
                    ("j/k", "select"),
                    ("Enter", "details"),
                ]),
                hints(&[("Esc", "listings"), ("c", "chat"), ("q", "quit")]),
            ]),
        }
    }
}
