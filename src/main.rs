mod cli;
mod error;
mod models;
mod scrapers;
mod storage;
mod summarizer;

use clap::Parser;
use dialoguer::{Confirm, Input};
use tracing::{info, warn, Level};

use cli::Cli;
use scrapers::{collect_reviews, AuthSession, OpenworkParser, OpenworkScraper, ScrapeParams, OPENWORK_BASE_URL};
use summarizer::{OpenAiClient, Summarizer};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    dotenvy::dotenv().ok();
    let args = Cli::parse();

    let credentials = args.resolve_credentials()?;
    let api_key = Cli::resolve_api_key()?;

    let company_id = match &args.company_id {
        Some(id) => id.clone(),
        None => {
            let entered: String = Input::new()
                .with_prompt("Enter the company id")
                .interact_text()?;
            let entered = entered.trim().to_string();
            anyhow::ensure!(!entered.is_empty(), "company id is required");
            entered
        }
    };

    storage::ensure_output_dirs().await?;

    let parser = OpenworkParser::new();
    let session = AuthSession::login(OPENWORK_BASE_URL, &credentials, &parser).await?;
    let scraper = OpenworkScraper::new(&session, OPENWORK_BASE_URL);

    let profile = scraper.company_profile(&parser, &company_id).await?;
    let company = profile.into_company(&company_id)?;
    info!("Resolved company {company_id}: {}", company.name);

    let reviews_path = storage::reviews_path(&company.name);
    let summary_path = storage::summary_path(&company.name);

    if summary_path.exists() {
        let regenerate = Confirm::new()
            .with_prompt(format!(
                "Summary file '{}' already exists. Regenerate?",
                summary_path.display()
            ))
            .default(false)
            .interact()?;
        if !regenerate {
            info!("Skipping summary regeneration as per user choice.");
            return Ok(());
        }
    }

    let reviews = collect_reviews(&scraper, &parser, &company_id, &ScrapeParams::default()).await;
    storage::save_reviews(&reviews_path, &reviews).await?;

    if reviews.is_empty() {
        warn!("No reviews found for summarization");
        return Ok(());
    }

    info!("✅ Scraped {} reviews for {}", reviews.len(), company.name);

    let texts: Vec<String> = reviews.iter().map(|r| r.content.clone()).collect();
    let summarizer = Summarizer::new(OpenAiClient::new(api_key), args.model_name, args.lang);
    let summary = summarizer.summarize(&company, &texts).await?;

    storage::save_summary(&summary_path, &summary).await?;

    println!("\n{summary}");

    Ok(())
}
