//! CLI administration tool for url-tracker.
//!
//! Generates encryption keys and builds or inspects tracking URLs using the
//! same environment configuration as the server.
//!
//! # Usage
//!
//! ```bash
//! # Generate a new encryption key
//! cargo run --bin admin -- key generate
//!
//! # Build tracking URLs
//! cargo run --bin admin -- url open --metadata '{"customer_id": 1}'
//! cargo run --bin admin -- url click https://example.com/offer
//!
//! # Inspect a tracking URL
//! cargo run --bin admin -- decode https://t.example.com/click/eyJ1cmwi...
//! ```
//!
//! # Environment Variables
//!
//! `key generate` needs none. The other commands read the server's
//! variables (see `url_tracker::config`), including `ENCRYPTION_KEY`.

use url_tracker::application::tracking;
use url_tracker::codec::fernet::EncryptionKey;
use url_tracker::config;
use url_tracker::domain::{Configuration, Metadata, TrackingResult};
use url_tracker::infrastructure::webhook::WebhookBody;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing url-tracker.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage encryption keys
    Key {
        #[command(subcommand)]
        action: KeyAction,
    },

    /// Build tracking URLs
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Decode a tracking URL or path and print the result as JSON
    Decode {
        /// Full tracking URL, or the encoded path with `--bare`
        input: String,

        /// Treat the input as an encoded path without base URL
        #[arg(short, long)]
        bare: bool,
    },
}

/// Key management subcommands.
#[derive(Subcommand)]
enum KeyAction {
    /// Generate a new encryption key
    Generate {
        /// Print only the key
        #[arg(short, long)]
        quiet: bool,
    },
}

/// URL building subcommands.
#[derive(Subcommand)]
enum UrlAction {
    /// Build an open tracking URL
    Open {
        /// Metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,
    },

    /// Build a click tracking URL
    Click {
        /// Destination URL
        url: String,

        /// Metadata as a JSON object
        #[arg(short, long)]
        metadata: Option<String>,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Key { action } => handle_key_action(action),
        Commands::Url { action } => handle_url_action(action, &load_configuration()?),
        Commands::Decode { input, bare } => decode(&input, bare, &load_configuration()?),
    }
}

fn load_configuration() -> Result<Configuration> {
    config::load_from_env()
        .context("Failed to load configuration from environment")?
        .tracking_configuration()
}

/// Dispatches key management commands.
fn handle_key_action(action: KeyAction) -> Result<()> {
    match action {
        KeyAction::Generate { quiet } => {
            let key = EncryptionKey::generate(&mut rand::rng()).to_base64();

            if quiet {
                println!("{}", key);
                return Ok(());
            }

            println!("{}", "🔑 New encryption key".bright_blue().bold());
            println!();
            println!("  {}", key.bright_yellow().bold());
            println!();
            println!(
                "{}",
                "⚠️  Tokens issued with one key cannot be read with another."
                    .red()
                    .bold()
            );
            println!();
            println!("{}", "Add this to your environment:".bright_white());
            println!("  {}={}", "ENCRYPTION_KEY".bright_cyan(), key.bright_yellow());
            println!();
        }
    }

    Ok(())
}

/// Dispatches URL building commands.
fn handle_url_action(action: UrlAction, configuration: &Configuration) -> Result<()> {
    let url = match action {
        UrlAction::Open { metadata } => {
            tracking::open_tracking_url(&parse_metadata(metadata)?, configuration)?
        }
        UrlAction::Click { url, metadata } => {
            tracking::click_tracking_url(&url, &parse_metadata(metadata)?, configuration)?
        }
    };

    println!("{}", url);

    Ok(())
}

fn parse_metadata(raw: Option<String>) -> Result<Metadata> {
    match raw {
        Some(raw) => serde_json::from_str(&raw).context("--metadata must be a JSON object"),
        None => Ok(Metadata::new()),
    }
}

/// Decodes a tracking URL.
///
/// Full URLs are matched against the open base URL first, then the click
/// base URL.
fn decode(input: &str, bare: bool, configuration: &Configuration) -> Result<()> {
    let result = if bare {
        tracking::click_tracking_result(input, None, configuration)?
    } else {
        decode_full_url(input, configuration)?
    };

    let kind = if result.is_click_tracking() {
        "click".green().bold()
    } else {
        "open".cyan().bold()
    };
    eprintln!("{} {}", "Decoded".bright_white(), kind);

    let body = serde_json::to_string_pretty(&WebhookBody::from(&result))?;
    println!("{}", body);

    Ok(())
}

fn decode_full_url(url: &str, configuration: &Configuration) -> Result<TrackingResult> {
    if let Ok(path) = tracking::open_tracking_url_path(url, configuration) {
        return Ok(tracking::open_tracking_result(&path, None, configuration)?);
    }

    let path = tracking::click_tracking_url_path(url, configuration)
        .context("URL matches neither the open nor the click tracking base URL")?;

    Ok(tracking::click_tracking_result(&path, None, configuration)?)
}
