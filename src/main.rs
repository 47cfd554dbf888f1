//! QueryDesk CLI
//!
//! Command-line interface for the QueryDesk search client.
//! Starts the interactive terminal front-end by default, with one-shot
//! commands for scripted use.

use clap::{Parser, Subcommand};
use console::style;
use querydesk::config::DEFAULT_API_URL;
use querydesk::{
    highlight_snippet, Action, AppConfig, Controller, HttpSearchApi, JsonFileStore,
    QueryDeskError, RequestMode, Segment,
};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// QueryDesk - terminal client for a document search service
///
/// Live suggestions, keyboard navigation, search history and result
/// filters on top of a `/suggest` + `/search` HTTP API.
#[derive(Parser)]
#[command(name = "querydesk")]
#[command(author = "QueryDesk Contributors")]
#[command(version)]
#[command(about = "Terminal client for a document search service", long_about = None)]
struct Cli {
    /// Base URL of the search API
    #[arg(long, global = true, env = "QUERYDESK_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// File holding search history and the theme flag (default: next to the executable)
    #[arg(long, global = true)]
    state_file: Option<PathBuf>,

    /// Log file (default: querydesk.log next to the executable)
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Request timeout in milliseconds (default: wait indefinitely)
    #[arg(long, global = true)]
    timeout_ms: Option<u64>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive search screen (default)
    Tui,

    /// Run one search and print the results
    Search {
        /// Query text (use -- before the query if it starts with -)
        #[arg(allow_hyphen_values = true)]
        query: String,

        /// Print the displayed items as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print suggestions for a partial query
    Suggest {
        /// Partial query text
        #[arg(allow_hyphen_values = true)]
        text: String,
    },

    /// Show or clear the remembered queries
    History {
        #[command(subcommand)]
        action: HistoryCommand,
    },
}

#[derive(Subcommand)]
enum HistoryCommand {
    /// List recent queries, most recent first
    List,
    /// Forget all recent queries
    Clear,
}

fn main() {
    let cli = Cli::parse();

    let log_path = cli
        .log_file
        .clone()
        .unwrap_or_else(querydesk::logging::default_log_path);
    // Logging is optional; the tool works the same without it
    let _ = querydesk::logging::init(&log_path, cli.verbose);
    tracing::info!(version = querydesk::VERSION, "QueryDesk starting up");

    let result = build_config(&cli).and_then(|config| match cli.command {
        None | Some(Commands::Tui) => cmd_tui(&config),
        Some(Commands::Search { query, json }) => cmd_search(&config, &query, json),
        Some(Commands::Suggest { text }) => cmd_suggest(&config, &text),
        Some(Commands::History { action }) => match action {
            HistoryCommand::List => cmd_history_list(&config),
            HistoryCommand::Clear => cmd_history_clear(&config),
        },
    });

    if let Err(e) = result {
        tracing::error!(error = %e, "command failed");
        eprintln!("{} {}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}

fn build_config(cli: &Cli) -> querydesk::Result<AppConfig> {
    let mut config = AppConfig::default()
        .with_api_url(&cli.api_url)
        .with_timeout(cli.timeout_ms.map(Duration::from_millis));
    if let Some(path) = &cli.state_file {
        config = config.with_state_file(path.clone());
    }
    config.validate()?;
    Ok(config)
}

fn controller(config: &AppConfig, mode: RequestMode) -> Controller {
    let api = Arc::new(HttpSearchApi::from_config(config));
    let store = Box::new(JsonFileStore::open(&config.state_file));
    Controller::new(config, api, store).with_mode(mode)
}

/// Interactive front-end
fn cmd_tui(config: &AppConfig) -> querydesk::Result<()> {
    querydesk::tui::run(controller(config, RequestMode::Background))
}

/// One-shot search command
fn cmd_search(config: &AppConfig, query: &str, json: bool) -> querydesk::Result<()> {
    if query.trim().is_empty() {
        return Err(QueryDeskError::InvalidInput("query must not be blank".into()));
    }

    let mut controller = controller(config, RequestMode::Inline);
    let start = Instant::now();

    if !json {
        println!(
            "{} Searching for '{}' at {}",
            style("→").cyan().bold(),
            style(query).yellow(),
            style(&config.api_base_url).dim()
        );
    }

    controller.dispatch(Action::QueryCommitted(query.to_string()));
    controller.dispatch(Action::Submit);
    controller.process_messages();

    let state = controller.state();
    if let Some(message) = state.error() {
        return Err(QueryDeskError::SearchFailed(message.to_string()));
    }

    let items = controller.filtered_results();

    if json {
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    println!();
    if state.shows_no_results() {
        println!("  {}", style("No results found.").dim());
        return Ok(());
    }

    let mut summary = format!(
        "Found {} results in {:.2}s",
        style(items.len()).green(),
        start.elapsed().as_secs_f64()
    );
    if let Some(total) = state.total() {
        summary.push_str(&format!(" ({} documents indexed)", total));
    }
    println!("{}:", summary);
    println!();

    for item in &items {
        println!(
            "  {} {} {}",
            style(format!("#{:<3}", item.rank)).dim(),
            style(&item.title).cyan().bold(),
            style(format!("Score: {}", item.score_label())).green()
        );
        println!(
            "       {}",
            style(format!(
                "{} · {} · {}",
                item.doc_type,
                item.date,
                item.doc_id.as_deref().unwrap_or(&item.display_url)
            ))
            .dim()
        );

        let snippet: String = highlight_snippet(&item.snippet, state.query())
            .into_iter()
            .map(|segment| match segment {
                Segment::Plain(text) => text.to_string(),
                Segment::Marked(text) => style(text).yellow().bold().to_string(),
            })
            .collect();
        println!("       {}", snippet);
        println!();
    }

    Ok(())
}

/// One-shot suggestion command
fn cmd_suggest(config: &AppConfig, text: &str) -> querydesk::Result<()> {
    let mut controller = controller(config, RequestMode::Inline);

    if text.chars().count() < config.min_suggest_chars {
        println!(
            "{} Suggestions start at {} characters",
            style("!").yellow().bold(),
            config.min_suggest_chars
        );
        return Ok(());
    }

    controller.dispatch(Action::InputChanged(text.to_string()));
    controller.process_messages();

    for (i, suggestion) in controller.state().suggestions().iter().enumerate() {
        println!(
            "  {} {}",
            style(format!("{:2}.", i + 1)).dim(),
            style(suggestion).cyan()
        );
    }

    Ok(())
}

/// List remembered queries
fn cmd_history_list(config: &AppConfig) -> querydesk::Result<()> {
    let controller = controller(config, RequestMode::Inline);
    let history = controller.state().history();

    if history.is_empty() {
        println!("  {}", style("No recent searches").dim());
        return Ok(());
    }

    for (i, term) in history.entries().iter().enumerate() {
        println!("  {} {}", style(format!("{:2}.", i + 1)).dim(), term);
    }

    Ok(())
}

/// Forget remembered queries
fn cmd_history_clear(config: &AppConfig) -> querydesk::Result<()> {
    let mut controller = controller(config, RequestMode::Inline);
    let count = controller.state().history().len();
    controller.dispatch(Action::ClearHistory);

    println!(
        "{} Cleared {} recent {}",
        style("✓").green().bold(),
        count,
        if count == 1 { "search" } else { "searches" }
    );

    Ok(())
}
