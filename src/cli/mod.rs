//! Command-line interface for Cityscope.
//!
//! Every lookup command goes through the same cache-or-fetch resolver the
//! HTTP API uses, so a CLI lookup warms the store for the server.

mod commands;

use clap::{Parser, Subcommand};

/// Cityscope - location, forecast, business and movie lookups
/// with a SQLite-backed cache for geocodes and forecasts
#[derive(Parser)]
#[command(name = "cityscope")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default when no command is given)
    #[command(alias = "-d", alias = "--daemon", alias = "daemon")]
    Serve,

    /// Resolve a location from free text
    #[command(alias = "loc", alias = "l")]
    Location {
        /// Location text, used verbatim as the cache key
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Show the daily forecast for a location
    #[command(alias = "w", alias = "forecast")]
    Weather {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// List nearby businesses for a location
    #[command(alias = "y", alias = "businesses")]
    Yelp {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Search movies by text
    #[command(alias = "m")]
    Movies {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
