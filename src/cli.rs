//! CLI definitions: argument parsing, subcommands, and help text.

use clap::{ArgAction, Args as ClapArgs, Parser, Subcommand};
use clap_complete::Shell;

pub use clap_complete::generate;

use crate::core::filters::{FilterError, FilterField, PropertyFilters, SortOrder};

const AFTER_HELP: &str = "\
EXAMPLES:
  idx-browser                              Launch interactive listing browser
  idx-browser list --city Irvine --min-beds 3
  idx-browser list --sort price,desc --page 2
  idx-browser show 1042                    Full details of one listing
  idx-browser search \"3 bed in Irvine under 900k\"
  idx-browser parse \"condo with a pool\"    Show the criteria the server extracts
  idx-browser chat \"What are good areas for families?\"
  idx-browser health                       Check the listing API
  idx-browser --base-url http://10.0.0.5:8080 list
  idx-browser completions bash             Generate bash completions

ENVIRONMENT:
  IDX_API_BASE_URL          Listing API root (default http://localhost:8080)
  IDX_PAGE_SIZE             Listings per page, 1-200 (default 20)
  IDX_REQUEST_TIMEOUT_SECS  Request timeout (default 30)
  IDX_SHOW_TIMESTAMPS       Show times next to chat messages (1/true)
";

/// Command-line arguments for the application.
#[derive(Parser)]
#[command(
    author,
    version,
    about = "Terminal browser for real-estate listings with an assistant chat",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Listing API root; overrides IDX_API_BASE_URL
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Increase log verbosity (use multiple times for debug)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Reduce log output (errors only)
    #[arg(short = 'q', long = "quiet", global = true)]
    pub quiet: bool,
}

/// Listing filters shared by `list` and the TUI start-up.
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct FilterArgs {
    #[arg(long)]
    pub city: Option<String>,
    /// Two-letter state code
    #[arg(long)]
    pub state: Option<String>,
    #[arg(long)]
    pub zip: Option<String>,
    #[arg(long, value_name = "USD")]
    pub min_price: Option<f64>,
    #[arg(long, value_name = "USD")]
    pub max_price: Option<f64>,
    /// Exact number of bedrooms
    #[arg(long)]
    pub beds: Option<u32>,
    #[arg(long)]
    pub min_beds: Option<u32>,
    /// Exact number of bathrooms
    #[arg(long)]
    pub baths: Option<u32>,
    #[arg(long)]
    pub min_baths: Option<u32>,
    /// Sort as field,asc|desc (e.g. price,desc)
    #[arg(long, value_parser = clap::value_parser!(SortOrder))]
    pub sort: Option<SortOrder>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List one page of properties
    List {
        #[command(flatten)]
        filters: FilterArgs,
        /// Zero-based page index
        #[arg(long, default_value_t = 0)]
        page: u32,
        /// Page size (defaults to IDX_PAGE_SIZE)
        #[arg(long)]
        size: Option<u32>,
    },
    /// Show full details of one property
    Show {
        id: i64,
    },
    /// Natural-language search, e.g. "3 bed homes in Irvine under 900k"
    Search {
        query: String,
        #[arg(long, default_value_t = 0)]
        page: u32,
        #[arg(long)]
        size: Option<u32>,
    },
    /// Show the search criteria the server extracts from a query
    Parse {
        query: String,
    },
    /// Ask the assistant one question
    Chat {
        message: String,
        /// Property ids to give the assistant as context
        #[arg(long = "property", value_name = "ID")]
        property_ids: Vec<i64>,
    },
    /// Check that the listing API is up
    Health,
    /// Show effective configuration and paths
    Config,
    /// Generate shell completion script
    Completions {
        /// Shell to generate completions for (bash, zsh, fish, powershell, elvish)
        #[arg(value_parser = clap::value_parser!(Shell))]
        shell: Shell,
    },
}

impl Args {
    /// Log level based on -v/-q flags: error, warn, info, or debug.
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose >= 2 {
            "debug"
        } else if self.verbose >= 1 {
            "info"
        } else {
            "warn"
        }
    }

    /// True when no subcommand is given and the TUI will own the terminal.
    pub fn is_tui(&self) -> bool {
        self.command.is_none()
    }
}

impl FilterArgs {
    /// Build listing filters; string fields go through the same cleaning as the filter form.
    pub fn to_filters(&self, page: u32, size: u32) -> Result<PropertyFilters, FilterError> {
        let mut f = PropertyFilters::with_page_size(size);
        for (field, value) in [
            (FilterField::City, &self.city),
            (FilterField::State, &self.state),
            (FilterField::Zip, &self.zip),
        ] {
            if let Some(v) = value {
                f.set(field, v)?;
            }
        }
        for (field, value) in [
            (FilterField::MinPrice, self.min_price),
            (FilterField::MaxPrice, self.max_price),
        ] {
            if let Some(v) = value {
                f.set(field, &v.to_string())?;
            }
        }
        f.beds = self.beds;
        f.min_beds = self.min_beds;
        f.baths = self.baths;
        f.min_baths = self.min_baths;
        f.sort = self.sort.clone();
        f.page = page;
        Ok(f)
    }
}
