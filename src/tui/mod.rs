//! TUI (Text User Interface) for browsing listings with the assistant chat panel.

mod app;
mod constants;
mod draw;
mod handlers;
mod shortcuts;
mod text;

use crossterm::event::{self, Event};
use crossterm::execute;
use std::io::{self};
use std::sync::Arc;
use std::sync::mpsc::{self, TryRecvError};
use std::time::Duration;

use tokio::runtime::Runtime;

use crate::core::api::{ApiClient, ApiError};
use crate::core::config::Config;
use crate::core::filters::PropertyFilters;
use crate::core::persistence;

use app::{App, View};
use draw::draw;
use handlers::{HandleKeyContext, HandleResult, Pending};

/// Guard that restores terminal state on drop (including on panic).
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Self {
        Self
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        use crossterm::terminal::{LeaveAlternateScreen, disable_raw_mode};
        let _ = execute!(
            std::io::stdout(),
            crossterm::event::PopKeyboardEnhancementFlags
        );
        let _ = disable_raw_mode();
        let _ = execute!(std::io::stdout(), crossterm::event::DisableMouseCapture);
        let _ = execute!(std::io::stdout(), LeaveAlternateScreen);
    }
}

/// Non-blocking read of a worker result. A worker that hung up without
/// sending counts as a failed request so the loading state still clears.
fn take_result<T>(rx: &mpsc::Receiver<Result<T, ApiError>>) -> Option<Result<T, ApiError>> {
    match rx.try_recv() {
        Ok(result) => Some(result),
        Err(TryRecvError::Empty) => None,
        Err(TryRecvError::Disconnected) => Some(Err(ApiError::Interrupted)),
    }
}

/// Apply any finished background requests to the app state.
fn poll_pending(app: &mut App, pending: &mut Pending) {
    if let Some(result) = pending.page.as_ref().and_then(take_result) {
        match result {
            Ok(page) => {
                log::info!(
                    "Loaded page {} of {} ({} properties)",
                    page.number + 1,
                    page.total_pages,
                    page.total_elements
                );
                app.set_page(page);
            }
            Err(e) => app.set_load_error(&e),
        }
        pending.page = None;
    }

    if let Some(result) = pending.detail.as_ref().and_then(take_result) {
        app.detail_loading = false;
        match result {
            Ok(p) => {
                if app.view == View::Detail && app.detail.as_ref().is_some_and(|d| d.id == p.id) {
                    app.detail = Some(p);
                }
            }
            Err(ApiError::NotFound(id)) => {
                log::warn!("Property {} no longer exists", id);
                app.show_toast(format!("Property {} not found", id));
            }
            // The card copy stays on screen.
            Err(e) => log::warn!("Detail refresh failed: {}", e),
        }
        pending.detail = None;
    }

    if let Some(result) = pending.chat.as_ref().and_then(|c| take_result(&c.result_rx)) {
        if let Err(ref e) = result {
            log::error!("Chat request failed: {}", e);
        }
        app.chat.finish(result.map_err(|e| e.to_string()));
        pending.chat = None;
    }
}

/// Run the TUI loop. Uses a dedicated Tokio runtime for API calls.
pub fn run(config: Config, client: ApiClient, filters: PropertyFilters) -> io::Result<()> {
    use crossterm::terminal::{Clear, ClearType, EnterAlternateScreen, enable_raw_mode};
    use ratatui::Terminal;
    use ratatui::backend::CrosstermBackend;

    let _guard = TerminalGuard::new();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    execute!(stdout, Clear(ClearType::All))?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let rt = Arc::new(
        Runtime::new().map_err(|e| io::Error::other(format!("Failed to create runtime: {}", e)))?,
    );

    let mut app = App::new(
        client.base_url().to_string(),
        filters,
        config.show_timestamps,
    );
    let mut pending = Pending::default();

    // Mouse wheel scrolling
    execute!(io::stdout(), crossterm::event::EnableMouseCapture)?;

    // Kitty keyboard protocol: Alt+key as single event with modifier (Ghostty, WezTerm, kitty, etc.)
    let _ = execute!(
        io::stdout(),
        crossterm::event::PushKeyboardEnhancementFlags(
            crossterm::event::KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                | crossterm::event::KeyboardEnhancementFlags::REPORT_ALTERNATE_KEYS
        )
    );

    handlers::reload(&mut HandleKeyContext {
        app: &mut app,
        client: &client,
        pending: &mut pending,
        rt: &rt,
    });

    loop {
        poll_pending(&mut app, &mut pending);

        terminal.draw(|f| draw(f, &mut app, f.area()))?;

        if event::poll(Duration::from_millis(constants::EVENT_POLL_TIMEOUT_MS))? {
            match event::read()? {
                Event::Mouse(mouse) => {
                    let _ = handlers::handle_mouse(mouse, &mut app);
                }
                Event::Key(key) => {
                    let result = handlers::handle_key(
                        key,
                        HandleKeyContext {
                            app: &mut app,
                            client: &client,
                            pending: &mut pending,
                            rt: &rt,
                        },
                    );
                    if result == HandleResult::Break {
                        break;
                    }
                }
                _ => {}
            }
        }
    }

    if let Some(pc) = pending.chat.take() {
        pc.cancel_token.cancel();
    }
    if let Err(e) = persistence::save_last_filters(&app.filters) {
        log::warn!("Could not save filters: {}", e);
    }

    terminal.show_cursor()?;
    Ok(())
}
