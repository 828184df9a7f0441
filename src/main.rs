//! Binary entry point for rewind.
//!
//! This binary provides the CLI interface for the rewind memory assistant.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stdout/print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use rewind::config::{AnswerProvider, RewindConfig};
use rewind::llm::{AnswerHttpConfig, Answerer, GeminiClient, OllamaClient};
use rewind::services::wants_lookback;
use rewind::{ArchiveStore, AskService, Error, TimeWindow, Timestamp};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

/// Rewind - a personal activity-memory assistant over screen captures.
#[derive(Parser)]
#[command(name = "rewind")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Ask a question about past captures.
    Ask {
        /// The question. Omit to start an interactive session.
        question: Option<String>,

        /// Lookback expression bounding the search, e.g. "2 weeks".
        #[arg(short, long)]
        lookback: Option<String>,
    },

    /// List captured moments.
    List {
        /// Only list moments inside this lookback, e.g. "1 day".
        #[arg(short, long)]
        lookback: Option<String>,
    },

    /// Show archive and configuration status.
    Status,

    /// Manage configuration.
    Config {
        /// Show current configuration.
        #[arg(long)]
        show: bool,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // Pick up GEMINI_API_KEY etc. from a local .env if present.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    rewind::observability::init(cli.verbose);

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: RewindConfig) -> rewind::Result<()> {
    match cli.command {
        Commands::Ask { question, lookback } => cmd_ask(&config, question, lookback),
        Commands::List { lookback } => cmd_list(&config, lookback),
        Commands::Status => cmd_status(&config),
        Commands::Config { show } => cmd_config(&config, show),
        Commands::Completions { shell } => {
            cmd_completions(shell);
            Ok(())
        },
    }
}

/// Loads configuration.
fn load_config(path: Option<&str>) -> rewind::Result<RewindConfig> {
    // If a path is provided, load from that file
    if let Some(config_path) = path {
        return RewindConfig::load_from_file(std::path::Path::new(config_path));
    }

    // Environment override for config path
    if let Ok(config_path) = std::env::var("REWIND_CONFIG_PATH") {
        if !config_path.trim().is_empty() {
            return RewindConfig::load_from_file(std::path::Path::new(&config_path));
        }
    }

    // Otherwise, load from default location
    Ok(RewindConfig::load_default())
}

/// Builds the Gemini client from configuration.
fn build_gemini_client(config: &RewindConfig) -> GeminiClient {
    let mut client = GeminiClient::new();
    if let Some(ref api_key) = config.llm.api_key {
        client = client.with_api_key(api_key);
    }
    if let Some(ref model) = config.llm.model {
        client = client.with_model(model);
    }
    if let Some(ref base_url) = config.llm.base_url {
        client = client.with_endpoint(base_url);
    }
    client.with_http_config(AnswerHttpConfig::from_config(&config.llm).with_env_overrides())
}

/// Builds the Ollama client from configuration.
fn build_ollama_client(config: &RewindConfig) -> OllamaClient {
    let mut client = OllamaClient::new();
    if let Some(ref model) = config.llm.model {
        client = client.with_model(model);
    }
    if let Some(ref base_url) = config.llm.base_url {
        client = client.with_endpoint(base_url);
    }
    client.with_http_config(AnswerHttpConfig::from_config(&config.llm).with_env_overrides())
}

/// Ask command.
fn cmd_ask(
    config: &RewindConfig,
    question: Option<String>,
    lookback: Option<String>,
) -> rewind::Result<()> {
    match config.llm.provider {
        AnswerProvider::Gemini => {
            run_ask(config, build_gemini_client(config), question, lookback)
        },
        AnswerProvider::Ollama => {
            run_ask(config, build_ollama_client(config), question, lookback)
        },
    }
}

/// Runs the ask flow with the configured answerer.
fn run_ask<A: Answerer>(
    config: &RewindConfig,
    answerer: A,
    question: Option<String>,
    lookback: Option<String>,
) -> rewind::Result<()> {
    let store = ArchiveStore::new(&config.archive_dir);
    let service = AskService::new(store, answerer).with_context_limit(config.context_limit);

    match question {
        Some(question) => run_one_shot(&service, &question, lookback),
        None => run_interactive(&service),
    }
}

/// Answers a single question and exits.
fn run_one_shot<A: Answerer>(
    service: &AskService<A>,
    question: &str,
    lookback: Option<String>,
) -> rewind::Result<()> {
    let lookback = match lookback {
        Some(expression) => Some(expression),
        // A timing question without a bound: ask for one rather than
        // silently answering in point mode.
        None if wants_lookback(question) => Some(prompt_line(
            "How far back should I search? (e.g. '1 day', '1 week', '1 month'): ",
        )?),
        None => None,
    };

    let outcome = service.ask(question, lookback.as_deref())?;
    print_outcome(&outcome);
    Ok(())
}

/// Runs the interactive question loop.
///
/// Failures are reported and the loop returns to the prompt; only an empty
/// archive or an empty question ends the session.
fn run_interactive<A: Answerer>(service: &AskService<A>) -> rewind::Result<()> {
    let moments = service.store().scan()?;
    if moments.is_empty() {
        println!("No captures recorded yet in {}", service.store().path().display());
        return Ok(());
    }

    println!("Rewind - your personal memory assistant");
    println!("Found {} moments in your timeline", moments.len());
    println!();

    loop {
        let question = prompt_line("What would you like to rewind to? (empty to quit): ")?;
        if question.is_empty() {
            return Ok(());
        }

        let lookback = if wants_lookback(&question) {
            Some(prompt_line(
                "How far back should I search? (e.g. '1 day', '1 week', '1 month'): ",
            )?)
        } else {
            None
        };

        match service.ask(&question, lookback.as_deref()) {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) => eprintln!("{e}"),
        }
        println!();
    }
}

/// Prints an answer with the moments behind it.
fn print_outcome(outcome: &rewind::AskOutcome) {
    println!();
    match outcome.moments.as_slice() {
        [single] => println!("Rewound to {}", single.long_format()),
        moments => println!("Rewound across {} captures", moments.len()),
    }
    println!();
    println!("{}", outcome.answer);
}

/// List command.
fn cmd_list(config: &RewindConfig, lookback: Option<String>) -> rewind::Result<()> {
    let store = ArchiveStore::new(&config.archive_dir);
    let mut moments = store.scan()?;

    if let Some(ref expression) = lookback {
        let duration = rewind::services::parse_lookback(expression)?;
        let window = TimeWindow::lookback(Timestamp::now(), duration);
        moments = rewind::services::within(&window, &moments);
    }

    if moments.is_empty() {
        match lookback {
            Some(expression) => println!("No captures in the last {expression}"),
            None => println!("No captures recorded yet in {}", store.path().display()),
        }
        return Ok(());
    }

    for moment in &moments {
        println!("{}  {}", moment.compact(), moment.long_format());
    }
    println!();
    println!("{} moments in your timeline", moments.len());

    Ok(())
}

/// Status command.
fn cmd_status(config: &RewindConfig) -> rewind::Result<()> {
    println!("Rewind Status");
    println!("=============");
    println!();
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!();

    let archive_status = if config.archive_dir.exists() {
        "Available"
    } else {
        "Not found (no captures yet)"
    };
    println!("Archive Directory: {archive_status}");
    println!("  Path: {}", config.archive_dir.display());

    let store = ArchiveStore::new(&config.archive_dir);
    let moments = store.scan()?;
    println!("Captures: {}", moments.len());
    if let (Some(first), Some(last)) = (moments.first(), moments.last()) {
        println!("  Earliest: {}", first.long_format());
        println!("  Latest:   {}", last.long_format());
    }

    println!();
    println!("Answerer: {}", config.llm.provider.as_str());
    println!(
        "  Model: {}",
        config.llm.model.as_deref().unwrap_or("(default)")
    );

    println!();
    println!("Use 'rewind config --show' to view full configuration");

    Ok(())
}

/// Config command.
fn cmd_config(config: &RewindConfig, show: bool) -> rewind::Result<()> {
    if show {
        println!("Current Configuration");
        println!("=====================");
        println!();
        println!("Archive Directory: {}", config.archive_dir.display());
        println!("Context Limit: {}", config.context_limit);
        println!();
        println!("Answerer Configuration:");
        println!("  Provider: {}", config.llm.provider.as_str());
        println!(
            "  Model: {}",
            config.llm.model.as_deref().unwrap_or("(default)")
        );
        println!(
            "  Base URL: {}",
            config.llm.base_url.as_deref().unwrap_or("(default)")
        );
    } else {
        println!("Use --show to display configuration");
    }

    Ok(())
}

/// Completions command.
fn cmd_completions(shell: Shell) {
    clap_complete::generate(shell, &mut Cli::command(), "rewind", &mut io::stdout());
}

/// Prompts on stdout and reads one trimmed line from stdin.
fn prompt_line(prompt: &str) -> rewind::Result<String> {
    print!("{prompt}");
    io::stdout().flush().map_err(io_error("prompt"))?;

    let mut line = String::new();
    io::stdin()
        .lock()
        .read_line(&mut line)
        .map_err(io_error("read_input"))?;
    Ok(line.trim().to_string())
}

/// Maps an I/O error into the crate error type.
fn io_error(operation: &'static str) -> impl Fn(io::Error) -> Error {
    move |e| Error::OperationFailed {
        operation: operation.to_string(),
        cause: e.to_string(),
    }
}
