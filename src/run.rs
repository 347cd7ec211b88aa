//! Application run modes: logger init, subcommand dispatch, TUI launch.

use std::io;

use crate::cli::{Args, Commands};
use crate::core;
use crate::core::api::ApiClient;
use crate::core::config::Config;
use crate::core::filters::PropertyFilters;

/// Initialize env_logger. In TUI mode, writes to file to avoid corrupting the display.
pub fn init_logger(args: &Args) {
    let log_level = args.log_level();
    let mut logger =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level));

    if args.is_tui()
        && let Some(path) = core::paths::log_file()
    {
        if let Some(dir) = path.parent() {
            let _ = std::fs::create_dir_all(dir);
        }
        if let Ok(file) = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
        {
            logger.target(env_logger::Target::Pipe(Box::new(file)));
        }
    }
    let _ = logger.try_init();
}

fn client_or_exit(config: &Config) -> ApiClient {
    ApiClient::from_config(config).unwrap_or_else(|e| {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    })
}

/// Run a plain-text subcommand.
pub async fn run_command(command: Commands, config: &Config) {
    match command {
        Commands::List {
            filters,
            page,
            size,
        } => {
            let filters = filters
                .to_filters(page, size.unwrap_or(config.page_size))
                .unwrap_or_else(|e| {
                    eprintln!("Error: {}", e);
                    std::process::exit(1);
                });
            core::cli::run_list(&client_or_exit(config), &filters).await;
        }
        Commands::Show { id } => core::cli::run_show(&client_or_exit(config), id).await,
        Commands::Search { query, page, size } => {
            let size = size.unwrap_or(config.page_size);
            core::cli::run_search(&client_or_exit(config), &query, page, size).await;
        }
        Commands::Parse { query } => core::cli::run_parse(&client_or_exit(config), &query).await,
        Commands::Chat {
            message,
            property_ids,
        } => core::cli::run_chat(&client_or_exit(config), &message, &property_ids).await,
        Commands::Health => core::cli::run_health(&client_or_exit(config)).await,
        Commands::Config => core::cli::run_config(config),
        // Handled in main before config is loaded.
        Commands::Completions { .. } => {}
    }
}

/// Filters the TUI starts with: last session's, resized to the configured page size.
fn initial_filters(config: &Config) -> PropertyFilters {
    match core::persistence::load_last_filters() {
        Some(mut f) => {
            f.size = config.page_size;
            f
        }
        None => PropertyFilters::with_page_size(config.page_size),
    }
}

/// Launch the TUI in a blocking thread. Returns on panic or IO error.
pub async fn launch_tui(config: Config) -> Result<(), Box<dyn std::error::Error>> {
    let client = ApiClient::from_config(&config)?;
    let filters = initial_filters(&config);
    let join_result: Result<io::Result<()>, tokio::task::JoinError> =
        tokio::task::spawn_blocking(move || crate::tui::run(config, client, filters)).await;

    match join_result {
        Ok(io_result) => io_result?,
        Err(join_err) => {
            if let Ok(panic) = join_err.try_into_panic() {
                let msg = if let Some(s) = panic.downcast_ref::<&str>() {
                    s.to_string()
                } else if let Some(s) = panic.downcast_ref::<String>() {
                    s.clone()
                } else {
                    format!("{:?}", panic)
                };
                eprintln!("TUI panic: {}", msg);
            }
            return Err(
                Box::new(io::Error::other("TUI thread panicked")) as Box<dyn std::error::Error>
            );
        }
    }
    Ok(())
}
