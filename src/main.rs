use clap::Parser;
use colored::*;
use portfolio_page::cli::{Cli, Commands, ListingArgs};
use portfolio_page::contact::{ContactFormController, FormState, HttpFormRelay, Outcome};
use portfolio_page::error::Result;
use portfolio_page::github::GitHubClient;
use portfolio_page::page::PageController;
use portfolio_page::render::render_document;
use portfolio_page::view::{
    ContactElements, MemoryContainer, MemoryForm, MemoryInput, MemoryText, PageElements,
};
use portfolio_page::PortfolioConfig;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    dotenv::dotenv().ok();

    // Logs go to stderr so rendered HTML on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info"))
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = PortfolioConfig::from(&cli);

    match cli.command {
        Commands::Projects { listing, json } => {
            let (projects, shown) = run_listing(&config, &listing).await?;
            let output = if json {
                serde_json::to_string_pretty(&shown.filtered)?
            } else {
                projects
            };
            emit(&output, listing.out.as_deref())?;
        }
        Commands::Page { listing } => {
            let (projects, shown) = run_listing(&config, &listing).await?;
            let document = render_document(&projects, &shown.year, &config.github_username);
            emit(&document, listing.out.as_deref())?;
        }
        Commands::Contact { fields } => {
            let form = MemoryForm::default();
            for (name, value) in &fields {
                form.set(name, value);
            }
            let status = MemoryText::new();
            let elements = ContactElements {
                form: Some(Box::new(form)),
                status: Some(Box::new(status.clone())),
            };

            let mut controller = ContactFormController::new(
                config.formspree_endpoint.clone(),
                HttpFormRelay::new()?,
                elements,
            );
            let state = controller.submit().await;

            match state {
                FormState::Settled(Outcome::Sent) => println!("{}", status.text().as_str().green()),
                FormState::Settled(Outcome::NotConfigured) => {
                    println!("{}", status.text().as_str().yellow());
                    std::process::exit(1);
                }
                _ => {
                    println!("{}", status.text().as_str().red());
                    std::process::exit(1);
                }
            }
        }
    }

    Ok(())
}

struct ListingOutput {
    filtered: Vec<portfolio_page::Repository>,
    year: String,
}

/// Runs the page controller once against the live API and returns the
/// projects container's content.
async fn run_listing(
    config: &PortfolioConfig,
    listing: &ListingArgs,
) -> Result<(String, ListingOutput)> {
    let client = GitHubClient::new(&config.github_api_base)?;

    let projects = MemoryContainer::new();
    let year = MemoryText::new();
    let elements = PageElements {
        projects: Some(Box::new(projects.clone())),
        search: Some(Box::new(MemoryInput::new(&listing.query))),
        sort: Some(Box::new(MemoryInput::new(listing.sort.as_str()))),
        year: Some(Box::new(year.clone())),
    };

    info!("Loading projects for {}", config.github_username);
    let mut controller = PageController::new(config.github_username.clone(), client, elements);
    controller.start().await;

    let output = ListingOutput {
        filtered: controller.state().filtered.clone(),
        year: year.text(),
    };
    Ok((projects.html(), output))
}

fn emit(output: &str, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            std::fs::write(path, output)?;
            eprintln!("{} {}", "✅ Wrote".green(), path.display());
        }
        None => println!("{}", output),
    }
    Ok(())
}
