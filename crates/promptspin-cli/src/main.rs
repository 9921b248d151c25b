//! Promptspin CLI - Command-line interface for deterministic prompt expansion
//!
//! This binary provides commands for expanding prompt templates, collapsing
//! brace choices, and inspecting a wildcard corpus.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use promptspin_cli::commands;

/// Promptspin - Deterministic Prompt Expansion
#[derive(Parser)]
#[command(name = "promptspin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Expand a prompt template into positive and negative text
    Expand {
        /// Template text (omit when using --file)
        text: Option<String>,

        /// Read the template from a file instead
        #[arg(short, long)]
        file: Option<String>,

        /// User-supplied negative template, expanded in negative phase
        #[arg(short, long)]
        negative: Option<String>,

        /// Seed driving every deterministic choice
        #[arg(short, long, default_value_t = 0)]
        seed: u32,

        /// Directory with wildcard .txt files (default: ./wildcards)
        #[arg(short, long)]
        wildcards: Option<String>,

        /// Variety lane: alternate choice sequence for the same seed
        #[arg(long, default_value_t = 0)]
        variety: u32,

        /// Do not derive mirrored exclusions from the positive template
        #[arg(long)]
        no_auto_negative: bool,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// Collapse brace choices only, leaving wildcard tokens untouched
    Choices {
        /// Template text
        text: String,

        /// Seed driving every deterministic choice
        #[arg(short, long, default_value_t = 0)]
        seed: u32,

        /// Variety lane: alternate choice sequence for the same seed
        #[arg(long, default_value_t = 0)]
        variety: u32,
    },

    /// Resolve one wildcard token and show its options
    Resolve {
        /// Token name as written between the double underscores
        token: String,

        /// Directory with wildcard .txt files (default: ./wildcards)
        #[arg(short, long)]
        wildcards: Option<String>,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },

    /// List all wildcard tokens available under a directory
    List {
        /// Directory with wildcard .txt files (default: ./wildcards)
        #[arg(short, long)]
        wildcards: Option<String>,

        /// Output machine-readable JSON instead of colored text
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Expand {
            text,
            file,
            negative,
            seed,
            wildcards,
            variety,
            no_auto_negative,
            json,
        } => commands::expand::run(
            text.as_deref(),
            file.as_deref(),
            negative.as_deref(),
            seed,
            wildcards.as_deref(),
            variety,
            no_auto_negative,
            json,
        ),
        Commands::Choices {
            text,
            seed,
            variety,
        } => commands::choices::run(&text, seed, variety),
        Commands::Resolve {
            token,
            wildcards,
            json,
        } => commands::resolve::run(&token, wildcards.as_deref(), json),
        Commands::List { wildcards, json } => commands::list::run(wildcards.as_deref(), json),
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
