use crate::config::{DEFAULT_API_BASE, DEFAULT_GITHUB_USERNAME};
use crate::filter::SortMode;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "portfolio-page")]
#[command(about = "Portfolio page - GitHub projects listing and contact form relay")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// GitHub account whose public repositories are listed
    #[arg(long, env = "GITHUB_USERNAME", default_value = DEFAULT_GITHUB_USERNAME)]
    pub github_username: String,

    /// Form-relay endpoint for the contact form (empty = not configured)
    #[arg(long, env = "FORMSPREE_ENDPOINT", default_value = "")]
    pub formspree_endpoint: String,

    /// GitHub REST API base URL
    #[arg(long, env = "GITHUB_API_BASE", default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render the projects list
    Projects {
        #[command(flatten)]
        listing: ListingArgs,

        /// Print the display list as JSON instead of HTML
        #[arg(long)]
        json: bool,
    },

    /// Render a complete HTML page
    Page {
        #[command(flatten)]
        listing: ListingArgs,
    },

    /// Submit the contact form once
    Contact {
        /// Form field as name=value (repeatable)
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
}

#[derive(clap::Args)]
pub struct ListingArgs {
    /// Search text matched against name, description and language
    #[arg(long, default_value = "")]
    pub query: String,

    /// Sort mode: stars, name or updated
    #[arg(long, default_value = "updated", value_parser = parse_sort)]
    pub sort: SortMode,

    /// Write the output to a file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

fn parse_sort(value: &str) -> Result<SortMode, String> {
    Ok(SortMode::from_selector(value))
}

fn parse_field(value: &str) -> Result<(String, String), String> {
    match value.split_once('=') {
        Some((name, field_value)) if !name.is_empty() => {
            Ok((name.to_string(), field_value.to_string()))
        }
        _ => Err(format!("expected name=value, got '{}'", value)),
    }
}
