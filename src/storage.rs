use std::path::{Path, PathBuf};

use anyhow::Result;
use tracing::info;

use crate::models::ReviewRecord;

pub const REVIEWS_DIR: &str = "reviews";
pub const SUMMARIES_DIR: &str = "summaries";

pub async fn ensure_output_dirs() -> Result<()> {
    tokio::fs::create_dir_all(REVIEWS_DIR).await?;
    tokio::fs::create_dir_all(SUMMARIES_DIR).await?;
    Ok(())
}

/// Replace every character outside alphanumerics, `-` and `_` with an
/// underscore, one for one, so a company name is usable as a file name.
pub fn safe_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

pub fn reviews_path(company_name: &str) -> PathBuf {
    Path::new(REVIEWS_DIR).join(format!("reviews_{}.json", safe_filename(company_name)))
}

pub fn summary_path(company_name: &str) -> PathBuf {
    Path::new(SUMMARIES_DIR).join(format!("summary_{}.txt", safe_filename(company_name)))
}

pub async fn save_reviews(path: &Path, reviews: &[ReviewRecord]) -> Result<()> {
    let json = serde_json::to_string_pretty(reviews)?;
    tokio::fs::write(path, json).await?;
    info!("Saved {} reviews to {}", reviews.len(), path.display());
    Ok(())
}

pub async fn save_summary(path: &Path, summary: &str) -> Result<()> {
    tokio::fs::write(path, summary).await?;
    info!("Saved summary to {}", path.display());
    Ok(())
}
