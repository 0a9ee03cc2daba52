use reqwest::StatusCode;

use crate::models::ReviewRecord;

/// Tuning knobs for the review pagination loop
#[derive(Debug, Clone)]
pub struct ScrapeParams {
    /// Hard ceiling on listing pages fetched per run
    pub max_pages: u32,
    /// Reviews older than now minus this many days are out of scope
    pub cutoff_days: i64,
    /// Lower bound of the random pause between page fetches
    pub min_delay_ms: u64,
    /// Upper bound of the random pause between page fetches
    pub max_delay_ms: u64,
}

impl Default for ScrapeParams {
    fn default() -> Self {
        Self {
            max_pages: 12,
            cutoff_days: 2 * 365,
            min_delay_ms: 500,
            max_delay_ms: 1000,
        }
    }
}

/// One review item as it appears in the listing markup, before any
/// cutoff decision is made
#[derive(Debug, Clone)]
pub struct RawReview {
    pub date: Option<String>,
    pub content: String,
}

/// A fetched listing page: status plus the raw body, parsed separately
#[derive(Debug, Clone)]
pub struct FetchedPage {
    pub status: StatusCode,
    pub body: String,
}

/// Outcome of processing a single listing page.
///
/// Stopping is data, not control flow: the caller appends whatever records
/// the page yielded and then decides whether to keep going.
#[derive(Debug)]
pub enum PageOutcome {
    /// Every item on the page was in range; fetch the next page
    Continue(Vec<ReviewRecord>),
    /// Stop after this page, keeping the records harvested before the stop
    Stop(Vec<ReviewRecord>, StopReason),
}

/// Why the pagination loop stopped before the page ceiling
#[derive(Debug)]
pub enum StopReason {
    /// Listing request answered with a non-success status
    BadStatus(StatusCode),
    /// The review container region is absent from the page
    MissingListing,
    /// The container is present but holds zero review items
    NoItems,
    /// A review predates the cutoff; older ones would follow
    CutoffReached,
    /// Something went wrong mid-page; previously collected records survive
    PageFailure(String),
}
