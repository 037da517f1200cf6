//! Binary entry point for deckport.
//!
//! This binary provides the CLI for importing flashcard files into study sets.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

mod commands;

use clap::{Parser, Subcommand};
use deckport::config::DeckportConfig;
use deckport::observability;
use std::path::PathBuf;
use std::process::ExitCode;

/// Deckport - import flashcard files into study sets.
#[derive(Parser)]
#[command(name = "deckport")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Import a flashcard file as a new study set.
    Import {
        /// File to import (.csv, .json, .md, .markdown, .apkg).
        file: PathBuf,

        /// Owner of the created study set.
        #[arg(short, long, env = "DECKPORT_OWNER")]
        owner: String,

        /// Description for the study set.
        #[arg(short, long)]
        description: Option<String>,

        /// Parse and validate without storing anything.
        #[arg(long)]
        dry_run: bool,

        /// Print the result as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List supported formats.
    Formats,

    /// List an owner's study sets.
    Sets {
        /// Owner whose sets to list.
        #[arg(short, long, env = "DECKPORT_OWNER")]
        owner: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the terms of a study set.
    Show {
        /// Study set ID.
        set_id: String,

        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective configuration.
    Config,
}

/// Main entry point.
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match DeckportConfig::load(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_from_settings(&config.logging, cli.verbose) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
async fn run_command(cli: Cli, config: DeckportConfig) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Import {
            file,
            owner,
            description,
            dry_run,
            json,
        } => {
            let options = commands::ImportArgs {
                file,
                owner,
                description,
                dry_run,
                json,
            };
            commands::cmd_import(&config, options).await?;
        },

        Commands::Formats => commands::cmd_formats(),

        Commands::Sets { owner, json } => commands::cmd_sets(&config, &owner, json)?,

        Commands::Show { set_id, json } => commands::cmd_show(&config, &set_id, json)?,

        Commands::Config => commands::cmd_config(&config),
    }

    Ok(())
}
