//! TUI constants: colors, timing, and layout sizes.

use ratatui::style::Color;

/// Accent green color (#98FB98).
pub(super) const ACCENT: Color = Color::Rgb(152, 251, 152);

/// Secondary accent (#7EC8E3).
pub(super) const ACCENT_SECONDARY: Color = Color::Rgb(126, 200, 227);

/// Price text in cards and map markers (#FFD27F).
pub(super) const PRICE: Color = Color::Rgb(255, 210, 127);

/// Event poll timeout in milliseconds (main loop).
pub(crate) const EVENT_POLL_TIMEOUT_MS: u64 = 100;

/// Scroll amount for arrow keys and mouse wheel.
pub(crate) const SCROLL_LINES_SMALL: usize = 3;

/// Scroll amount for PageUp/PageDown.
pub(crate) const SCROLL_LINES_PAGE: usize = 10;

/// Chat input height including borders.
pub(crate) const CHAT_INPUT_LINES: u16 = 3;

/// Chat panel width as a percentage of the screen.
pub(crate) const CHAT_PANEL_PERCENT: u16 = 40;

/// How long the "Copied" / "Opened" toast stays visible.
pub(crate) const TOAST_SECS: u64 = 2;

/// Terminal columns per map grid cell; keeps cluster labels from overlapping.
pub(crate) const MAP_CELL_COLS: u16 = 8;

/// Terminal rows per map grid cell.
pub(crate) const MAP_CELL_ROWS: u16 = 2;

/// Map zoom step (fraction of the span kept when zooming in).
pub(crate) const MAP_ZOOM_STEP: f64 = 0.5;

/// Map pan step as a fraction of the visible span.
pub(crate) const MAP_PAN_STEP: f64 = 0.2;

/// Minimalist logo when idle (single character).
pub(super) const LOGO_IDLE: &str = "◆";

/// Spinner frames for loading animation (braille pattern, 4 frames).
pub(super) const LOGO_LOADING: &[&str] = &["⠋", "⠙", "⠹", "⠸"];
