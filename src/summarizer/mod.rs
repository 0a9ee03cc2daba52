pub mod client;
pub mod prompt;

pub use client::{ChatRequest, Message, OpenAiClient};
pub use prompt::Lang;

use tracing::{error, info};

use crate::error::{Result, ScoutError};
use crate::models::CompanyInfo;

/// Turns collected review text plus company metadata into one narrative
/// summary via a single chat-completion call.
pub struct Summarizer {
    client: OpenAiClient,
    model: String,
    lang: Lang,
}

impl Summarizer {
    pub fn new(client: OpenAiClient, model: impl Into<String>, lang: Lang) -> Self {
        Self {
            client,
            model: model.into(),
            lang,
        }
    }

    /// Callers must not pass an empty review list; that is a caller error,
    /// reported before any request goes out.
    pub async fn summarize(&self, company: &CompanyInfo, reviews: &[String]) -> Result<String> {
        if reviews.is_empty() {
            error!("No reviews provided for summarization");
            return Err(ScoutError::EmptyInput);
        }

        info!("Preparing to send {} reviews for summarization", reviews.len());
        let data = format!(
            "Name: {}\nIntro: {}\n\n{}",
            company.name,
            company.introduction.as_deref().unwrap_or(""),
            prompt::wrap_reviews(reviews)
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message::developer(self.lang.instructions()),
                Message::user(data),
            ],
            // Full-exploration sampling, matching how the summaries are tuned
            temperature: 1.0,
            top_p: 1.0,
        };

        let summary = self.client.chat_completion(&request).await?;
        info!("Successfully generated summary");
        Ok(summary)
    }
}
