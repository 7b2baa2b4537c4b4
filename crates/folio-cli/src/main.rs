//! Folio CLI — entry point.
//!
//! # Commands
//!
//! - `folio ask -m MESSAGE [-l LANG] [--json]` — one chat request
//! - `folio chat [-l LANG]` — interactive REPL, one independent request per line
//! - `folio status` — show configuration and provider status
//! - `folio init` — write the default config file

mod helpers;
mod init;
mod repl;
mod status;

use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::info;

use folio_core::config::load_config;
use folio_core::Language;
use folio_providers::{ChatError, ChatService};

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Folio — portfolio chat assistant with provider fallback
#[derive(Parser)]
#[command(name = "folio", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Ask a single question
    Ask {
        /// The question to send.
        #[arg(short, long)]
        message: String,

        /// Answer language ("en" or "ar")
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Print the JSON response envelope instead of plain text
        #[arg(long, default_value_t = false)]
        json: bool,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Interactive chat (no history is sent between questions)
    Chat {
        /// Answer language ("en" or "ar")
        #[arg(short, long, default_value = "en")]
        language: String,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Show configuration and provider status
    Status,

    /// Write the default configuration file
    Init,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<ExitCode> {
    // A missing .env is normal in production.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    match cli.command {
        Commands::Ask {
            message,
            language,
            json,
            logs,
        } => {
            init_logging(logs);
            return run_ask(message, language, json).await;
        }
        Commands::Chat { language, logs } => {
            init_logging(logs);
            let language = parse_language(&language)?;
            let service = build_service();
            repl::run(service, language).await?;
        }
        Commands::Status => status::run()?,
        Commands::Init => init::run()?,
    }

    Ok(ExitCode::SUCCESS)
}

// ─────────────────────────────────────────────
// Ask command
// ─────────────────────────────────────────────

async fn run_ask(message: String, language: String, json: bool) -> Result<ExitCode> {
    let service = build_service();
    // The language goes through the same validator as HTTP callers.
    let body = serde_json::json!({ "message": message, "language": language });

    info!(language = %language, "processing single message");

    match service.handle(&body).await {
        Ok(response) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&response)?);
            } else {
                helpers::print_response(&response.response);
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            info!(status = e.status_code(), "request failed");
            let output = failure_output(&e, json)?;
            if json {
                println!("{output}");
            } else {
                helpers::print_error(&output);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// The single report for a failed `ask`: the error envelope with `--json`,
/// the user-facing message otherwise.
fn failure_output(error: &ChatError, json: bool) -> Result<String> {
    if json {
        Ok(serde_json::to_string_pretty(&error.to_body())?)
    } else {
        Ok(error.user_message())
    }
}

/// Build the chat service from the loaded configuration.
fn build_service() -> ChatService {
    let config = load_config(None);
    ChatService::from_config(&config)
}

fn parse_language(code: &str) -> Result<Language> {
    Language::parse(code)
        .ok_or_else(|| anyhow::anyhow!("unsupported language '{code}' (expected \"en\" or \"ar\")"))
}

/// Initialize tracing/logging.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("folio=debug,info")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
