//! Command-line interface for Biodex.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::UserId;

/// Biodex - species catalog with Wikipedia autofill
#[derive(Parser)]
#[command(name = "biodex")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a query and fetch the article description and image
    #[command(alias = "l")]
    Lookup {
        /// Free-text species name
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Resolve a query to a Wikipedia article title
    #[command(alias = "r")]
    Resolve {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Fetch the description and image of a known article title
    #[command(alias = "s")]
    Summary {
        /// Exact article title
        #[arg(required = true)]
        title: Vec<String>,
    },

    /// Filter a species catalog file by free text
    #[command(alias = "f")]
    Filter {
        /// JSON file holding an array of species
        path: PathBuf,
        /// Text to search for
        text: String,
        #[arg(long)]
        no_scientific_name: bool,
        #[arg(long)]
        no_common_name: bool,
        #[arg(long)]
        no_description: bool,
        /// Mark the records this user may edit
        #[arg(long = "as", value_name = "USER_ID")]
        viewer: Option<UserId>,
    },

    /// Validate a species entry before submission
    #[command(alias = "v")]
    Validate {
        /// JSON file holding a single species entry
        path: PathBuf,
    },

    /// Start the web API server
    #[command(alias = "web")]
    Serve,

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
