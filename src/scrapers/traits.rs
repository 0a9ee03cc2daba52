use async_trait::async_trait;

use crate::error::Result;
use crate::scrapers::types::{FetchedPage, RawReview};

/// Narrow seam over the site's markup, one method per extracted field.
/// Selector changes on the site stay inside a single adapter implementation.
pub trait ReviewPageParser: Send + Sync {
    /// Hidden anti-forgery token from the login form, if present and non-empty
    fn csrf_token(&self, html: &str) -> Option<String>;

    /// Whether the post-login landing page greets a signed-in member
    fn greeting_present(&self, html: &str) -> bool;

    /// Company display name from the profile page
    fn company_name(&self, html: &str) -> Option<String>;

    /// Company introduction blurb from the profile page
    fn company_intro(&self, html: &str) -> Option<String>;

    /// Review items from a listing page in document order.
    /// `None` means the review container region itself is absent.
    fn review_listing(&self, html: &str) -> Option<Vec<RawReview>>;
}

/// Source of paginated review listings, so the pagination loop can be
/// exercised without the live site
#[async_trait]
pub trait ListingSource: Send + Sync {
    /// Fetch one listing page, newest reviews first
    async fn fetch_listing(&self, company_id: &str, page: u32) -> Result<FetchedPage>;
}
