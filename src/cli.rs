use anyhow::{Context, Result};
use clap::Parser;

use crate::models::Credentials;
use crate::summarizer::Lang;

/// Scrape a company's OpenWork reviews and summarize them with an LLM.
/// Needs an OpenWork account with access to full reviews and an OpenAI
/// API key.
#[derive(Parser)]
#[command(name = "openwork-scout", version)]
pub struct Cli {
    /// Company id to scrape. If omitted, you'll be prompted for it.
    #[arg(long)]
    pub company_id: Option<String>,

    /// OpenWork username. Falls back to OPENWORK_USERNAME (env or .env).
    #[arg(long)]
    pub username: Option<String>,

    /// OpenWork password. Falls back to OPENWORK_PASSWORD (env or .env).
    #[arg(long)]
    pub password: Option<String>,

    /// Model to use for summarization.
    #[arg(long, default_value = "gpt-4o")]
    pub model_name: String,

    /// Language for the summary output.
    #[arg(long, value_enum, default_value = "ja")]
    pub lang: Lang,
}

impl Cli {
    /// Flags win over environment; both missing is fatal.
    pub fn resolve_credentials(&self) -> Result<Credentials> {
        let username = self
            .username
            .clone()
            .or_else(|| std::env::var("OPENWORK_USERNAME").ok())
            .context("OpenWork username not set (use --username or OPENWORK_USERNAME)")?;
        let password = self
            .password
            .clone()
            .or_else(|| std::env::var("OPENWORK_PASSWORD").ok())
            .context("OpenWork password not set (use --password or OPENWORK_PASSWORD)")?;
        Ok(Credentials { username, password })
    }

    pub fn resolve_api_key() -> Result<String> {
        std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")
    }
}
