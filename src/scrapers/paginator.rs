use chrono::{Duration, NaiveDate, Utc};
use rand::Rng;
use tracing::{debug, info, warn};

use crate::models::ReviewRecord;
use crate::scrapers::traits::{ListingSource, ReviewPageParser};
use crate::scrapers::types::{PageOutcome, ScrapeParams, StopReason};

/// Walk the paginated review listing, newest first, until the page ceiling,
/// an empty page, or a review older than the cutoff.
///
/// This never fails: anything that goes wrong mid-run stops the walk and
/// returns whatever was harvested up to that point.
pub async fn collect_reviews<S, P>(
    source: &S,
    parser: &P,
    company_id: &str,
    params: &ScrapeParams,
) -> Vec<ReviewRecord>
where
    S: ListingSource,
    P: ReviewPageParser,
{
    let cutoff = (Utc::now() - Duration::days(params.cutoff_days)).date_naive();
    let mut collected = Vec::new();

    for page in 1..=params.max_pages {
        info!("Scraping page {page} of maximum {}", params.max_pages);

        let outcome = match source.fetch_listing(company_id, page).await {
            Ok(fetched) if !fetched.status.is_success() => {
                PageOutcome::Stop(Vec::new(), StopReason::BadStatus(fetched.status))
            }
            Ok(fetched) => scan_listing(parser, &fetched.body, cutoff),
            Err(e) => PageOutcome::Stop(Vec::new(), StopReason::PageFailure(e.to_string())),
        };

        match outcome {
            PageOutcome::Continue(records) => collected.extend(records),
            PageOutcome::Stop(records, reason) => {
                collected.extend(records);
                log_stop(page, &reason, collected.len());
                return collected;
            }
        }

        if page < params.max_pages {
            // Uniform jitter between requests, so page fetches don't hammer
            // the server at a fixed cadence.
            let wait_ms = {
                let mut rng = rand::thread_rng();
                rng.gen_range(params.min_delay_ms..=params.max_delay_ms)
            };
            debug!("Waiting {wait_ms}ms before next page");
            tokio::time::sleep(std::time::Duration::from_millis(wait_ms)).await;
        }
    }

    collected
}

/// Process one listing page against the cutoff. Pure: all the stop/continue
/// policy lives here, away from the network.
fn scan_listing<P: ReviewPageParser>(parser: &P, html: &str, cutoff: NaiveDate) -> PageOutcome {
    let items = match parser.review_listing(html) {
        Some(items) => items,
        None => return PageOutcome::Stop(Vec::new(), StopReason::MissingListing),
    };
    if items.is_empty() {
        return PageOutcome::Stop(Vec::new(), StopReason::NoItems);
    }

    let mut records = Vec::new();
    for item in items {
        if let Some(date_str) = item.date.as_deref() {
            match NaiveDate::parse_from_str(date_str, "%Y-%m-%d") {
                Ok(date) if date < cutoff => {
                    // Listings are newest-first, so everything after this
                    // one is older still. Drop it and stop.
                    return PageOutcome::Stop(records, StopReason::CutoffReached);
                }
                Ok(_) => {}
                Err(e) => {
                    return PageOutcome::Stop(
                        records,
                        StopReason::PageFailure(format!("unparseable review date {date_str:?}: {e}")),
                    );
                }
            }
        }
        records.push(ReviewRecord {
            date: item.date,
            content: item.content,
        });
    }
    PageOutcome::Continue(records)
}

fn log_stop(page: u32, reason: &StopReason, total: usize) {
    match reason {
        StopReason::BadStatus(status) => {
            warn!("Request for page {page} failed with status code {status}")
        }
        StopReason::MissingListing => warn!("No reviews found on page {page}. Stopping."),
        StopReason::NoItems => warn!("No review data found on page {page}. Stopping."),
        StopReason::CutoffReached => {
            info!("Found review older than 2 years on page {page}. Stopping further scraping.")
        }
        StopReason::PageFailure(description) => {
            warn!("Error occurred on page {page} ({description}); keeping {total} reviews already collected")
        }
    }
}
