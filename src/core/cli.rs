//! CLI-only commands: list, show, search, parse, chat, health, config.
//!
//! These run without opening the TUI and produce plain text output.

use crate::core::api::{ApiClient, ApiError};
use crate::core::chat::Transcript;
use crate::core::config::Config;
use crate::core::filters::{PropertyFilters, sort_label};
use crate::core::page::{ListingEntry, PropertyPage};
use crate::core::paths;
use crate::core::persistence;
use crate::core::property::{Property, price_label};
use crate::core::util::truncate_chars;

const LOCATION_WIDTH: usize = 28;
const SUMMARY_WIDTH: usize = 30;

fn fail(client: &ApiClient, e: ApiError) -> ! {
    log::error!("{}", e);
    eprintln!("Error: {}", e);
    if e.is_connection() {
        eprintln!("{}", e.user_message(client.base_url()));
    }
    std::process::exit(1);
}

fn print_page(page: &PropertyPage) {
    if page.content.is_empty() {
        println!("No properties found.");
        return;
    }
    println!(
        "{:>8}  {:>12}  {:<SUMMARY_WIDTH$}  {:<LOCATION_WIDTH$}",
        "ID", "Price", "Summary", "Location"
    );
    println!(
        "{}  {}  {}  {}",
        "-".repeat(8),
        "-".repeat(12),
        "-".repeat(SUMMARY_WIDTH),
        "-".repeat(LOCATION_WIDTH)
    );
    for entry in &page.content {
        match entry {
            ListingEntry::Property(p) => println!(
                "{:>8}  {:>12}  {:<SUMMARY_WIDTH$}  {:<LOCATION_WIDTH$}",
                p.id,
                price_label(p.price),
                truncate_chars(&p.summary_line(), SUMMARY_WIDTH),
                truncate_chars(&p.location_line(), LOCATION_WIDTH),
            ),
            ListingEntry::Malformed { id, .. } => println!(
                "{:>8}  {:>12}  {}",
                id.map(|i| i.to_string()).unwrap_or_else(|| "?".to_string()),
                "-",
                "(listing data could not be read)"
            ),
        }
    }
    let info = page.info();
    println!(
        "\n{} ({} properties)",
        info.label(),
        info.total_elements
    );
}

fn print_property(p: &Property) {
    println!("#{}  {}", p.id, crate::core::property::format_price(p.price));
    if let Some(addr) = p.display_address() {
        println!("{}", addr);
    }
    let location = p.location_line();
    if !location.is_empty() {
        println!("{}", location);
    }
    let summary = p.summary_line();
    if !summary.is_empty() {
        println!("{}", summary);
    }
    println!();
    let fields = p.detail_fields();
    let width = fields.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (label, value) in fields {
        println!("{:<width$}  {}", label, value);
    }
    if let Some(url) = p.primary_photo() {
        println!("{:<width$}  {}", "Photo", url);
    }
    if let Some(remarks) = p.remarks.as_deref().filter(|r| !r.trim().is_empty()) {
        println!("\n{}", textwrap::fill(remarks.trim(), 80));
    }
}

/// Run the `list` command: one page of listings for the given filters.
pub async fn run_list(client: &ApiClient, filters: &PropertyFilters) {
    let sort = sort_label(filters.sort.as_ref());
    log::info!("Listing properties (sort: {})", sort);
    match client.fetch_properties(filters).await {
        Ok(page) => print_page(&page),
        Err(e) => fail(client, e),
    }
}

/// Run the `show` command: full details of one property.
pub async fn run_show(client: &ApiClient, id: i64) {
    match client.fetch_property(id).await {
        Ok(p) => print_property(&p),
        Err(e) => fail(client, e),
    }
}

/// Run the `search` command: natural-language search on the server.
pub async fn run_search(client: &ApiClient, query: &str, page: u32, size: u32) {
    match client.nlp_search(query, page, size).await {
        Ok(result) => print_page(&result),
        Err(e) => fail(client, e),
    }
}

/// Run the `parse` command: show the criteria the server extracts from a query.
pub async fn run_parse(client: &ApiClient, query: &str) {
    let parsed = match client.nlp_parse(query).await {
        Ok(p) => p,
        Err(e) => fail(client, e),
    };
    let criteria = parsed.criteria();
    if criteria.is_empty() {
        println!("No criteria recognized.");
        return;
    }
    let width = criteria.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
    for (label, value) in criteria {
        println!("{:<width$}  {}", label, value);
    }
}

/// Run the `chat` command: one question to the assistant, printing the reply.
pub async fn run_chat(client: &ApiClient, message: &str, property_ids: &[i64]) {
    let mut transcript = Transcript::new();
    let Some(request) = transcript.begin_send(message, property_ids) else {
        eprintln!("Error: empty message");
        std::process::exit(1);
    };
    let response = match client.send_chat(&request).await {
        Ok(r) => r,
        Err(e) => fail(client, e),
    };
    println!("{}", response.message);
    if let Some(ids) = response.related_property_ids.as_ref().filter(|v| !v.is_empty()) {
        let ids: Vec<String> = ids.iter().map(|i| i.to_string()).collect();
        println!("\nRelated properties: {}", ids.join(", "));
    }
    if let Some(qs) = response.suggested_questions.as_ref().filter(|v| !v.is_empty()) {
        println!("\nYou could also ask:");
        for q in qs {
            println!("  - {}", q);
        }
    }
}

/// Run the `health` command: exit 0 when the API reports up, 1 otherwise.
pub async fn run_health(client: &ApiClient) {
    match client.health().await {
        Ok(h) => {
            let status = h.status.unwrap_or_else(|| if h.up { "UP" } else { "DOWN" }.to_string());
            println!("{}  {}", client.base_url(), status);
            if !h.up {
                std::process::exit(1);
            }
        }
        Err(e) => fail(client, e),
    }
}

/// Run the `config` command: display effective settings and paths.
pub fn run_config(config: &Config) {
    let config_dir = paths::config_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let log_file = paths::log_file()
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "—".to_string());
    let saved = if persistence::load_last_filters().is_some() {
        "saved"
    } else {
        "none"
    };

    println!("API:          {}", config.base_url);
    println!("Page size:    {}", config.page_size);
    println!("Timeout:      {}s", config.request_timeout.as_secs());
    println!("Timestamps:   {}", if config.show_timestamps { "on" } else { "off" });
    println!("Config:       {}", config_dir);
    println!("Log file:     {}", log_file);
    println!("Last filters: {}", saved);
}
