//! Shopfeed CLI - terminal feed viewer and catalog fixture tools.
//!
//! # Usage
//!
//! ```bash
//! # Browse the feed against a running catalog service
//! sf-cli browse
//!
//! # Browse a filtered feed, loading every page
//! sf-cli browse --category Books --all
//!
//! # Search (3+ characters, like the feed's search box)
//! sf-cli browse --search lamp --pages 2
//!
//! # Dump a reproducible catalog as JSON
//! sf-cli generate --count 131 --seed 7 --pretty
//! ```
//!
//! # Commands
//!
//! - `browse` - Render the product feed page by page
//! - `generate` - Print a generated catalog as JSON

#![cfg_attr(not(test), forbid(unsafe_code))]
// A terminal viewer writes to stdout by design.
#![allow(clippy::print_stdout)]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(author, version, about = "Shopfeed CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product feed
    Browse {
        /// Base URL of the catalog service
        #[arg(long, default_value = "http://localhost:3000")]
        base_url: String,

        /// Search term (minimum 3 characters)
        #[arg(short, long)]
        search: Option<String>,

        /// Category filter (`all` or a category name)
        #[arg(short, long, default_value = "all")]
        category: String,

        /// Number of pages to load
        #[arg(short, long, default_value_t = 1, conflicts_with = "all")]
        pages: u32,

        /// Keep loading until the feed is exhausted
        #[arg(long)]
        all: bool,

        /// Retry once if the feed fails to load
        #[arg(long)]
        retry: bool,
    },
    /// Print a generated catalog as JSON
    Generate {
        /// Number of products to generate
        #[arg(short = 'n', long, default_value_t = 131)]
        count: usize,

        /// Generator seed for reproducible output
        #[arg(short, long)]
        seed: Option<u64>,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Browse {
            base_url,
            search,
            category,
            pages,
            all,
            retry,
        } => {
            let limit = if all { None } else { Some(pages) };
            commands::browse::browse(
                &base_url,
                search.as_deref(),
                &category,
                limit,
                retry,
            )
            .await?;
        }
        Commands::Generate {
            count,
            seed,
            pretty,
        } => {
            commands::generate::generate(count, seed, pretty)?;
        }
    }
    Ok(())
}
