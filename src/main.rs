//! # idx-browser
//!
//! Terminal browser for real-estate listings served by an IDX listing API.
//!
//! ## Modes
//! - Interactive TUI (default): listing cards, detail view, map, filters, assistant chat
//! - Plain-text subcommands: `list`, `show`, `search`, `parse`, `chat`, `health`, `config`

mod cli;
mod core;
mod run;
mod tui;

use clap::{CommandFactory, Parser};
use dotenv::dotenv;

use cli::{Args, Commands};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let args = Args::parse();
    run::init_logger(&args);

    if let Some(Commands::Completions { shell }) = args.command {
        let mut cmd = Args::command();
        let name = cmd.get_name().to_string();
        cli::generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    // Print user-friendly message; exit uses Display not Debug
    let config = core::config::load()
        .and_then(|c| c.with_base_url(args.base_url.as_deref()))
        .unwrap_or_else(|e| {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        });
    log::info!("Using listing API at {}", config.base_url);

    match args.command {
        Some(command) => {
            run::run_command(command, &config).await;
            Ok(())
        }
        None => run::launch_tui(config).await,
    }
}
