use async_trait::async_trait;
use reqwest::header;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::CompanyProfile;
use crate::scrapers::session::AuthSession;
use crate::scrapers::traits::{ListingSource, ReviewPageParser};
use crate::scrapers::types::FetchedPage;

/// Authenticated access to OpenWork's company pages. Borrows the session;
/// the orchestrator keeps ownership for the lifetime of the run.
pub struct OpenworkScraper<'a> {
    session: &'a AuthSession,
    base_url: String,
}

impl<'a> OpenworkScraper<'a> {
    pub fn new(session: &'a AuthSession, base_url: impl Into<String>) -> Self {
        Self {
            session,
            base_url: base_url.into(),
        }
    }

    /// Fetch the company profile page and pull out name and introduction.
    /// Either may be missing; that is logged, not failed, so the caller can
    /// decide whether a nameless profile means a bad id.
    pub async fn company_profile<P: ReviewPageParser>(
        &self,
        parser: &P,
        company_id: &str,
    ) -> Result<CompanyProfile> {
        info!("Fetching company info for id: {company_id}");

        let url = format!("{}/company_answer.php", self.base_url);
        let html = self
            .session
            .client()
            .get(&url)
            .query(&[("m_id", company_id)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let name = parser.company_name(&html);
        let introduction = parser.company_intro(&html);

        if name.is_none() {
            warn!("Company name not found for id {company_id}");
        }
        if introduction.is_none() {
            warn!("Company introduction not found for id {company_id}");
        }

        Ok(CompanyProfile { name, introduction })
    }
}

#[async_trait]
impl ListingSource for OpenworkScraper<'_> {
    async fn fetch_listing(&self, company_id: &str, page: u32) -> Result<FetchedPage> {
        let url = format!("{}/company_answer.php", self.base_url);
        let referer = format!("{url}?m_id={company_id}");
        let page_param = page.to_string();

        debug!("Fetching listing page {page} for company {company_id}");
        let response = self
            .session
            .client()
            .get(&url)
            .query(&[
                ("m_id", company_id),
                ("sort_key", "1"),
                ("sort_val", "-1"),
                ("next_page", page_param.as_str()),
            ])
            .header(header::REFERER, referer)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        Ok(FetchedPage { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoutError;
    use crate::scrapers::parser::OpenworkParser;
    use crate::scrapers::testutil::{company_page, listing_page, logged_in_session};
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn company_profile_extracts_name_and_intro() {
        let server = MockServer::start().await;
        let session = logged_in_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/company_answer.php"))
            .and(query_param("m_id", "12345"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(company_page("Acme Corp", Some("Fine anvils since 1949."))),
            )
            .mount(&server)
            .await;

        let scraper = OpenworkScraper::new(&session, server.uri());
        let profile = scraper
            .company_profile(&OpenworkParser::new(), "12345")
            .await
            .unwrap();
        assert_eq!(profile.name.as_deref(), Some("Acme Corp"));
        assert_eq!(profile.introduction.as_deref(), Some("Fine anvils since 1949."));
    }

    #[tokio::test]
    async fn blank_profile_resolves_to_invalid_id_upstream() {
        let server = MockServer::start().await;
        let session = logged_in_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/company_answer.php"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
            .mount(&server)
            .await;

        let scraper = OpenworkScraper::new(&session, server.uri());
        let profile = scraper
            .company_profile(&OpenworkParser::new(), "99999")
            .await
            .unwrap();
        assert!(profile.name.is_none());
        assert!(profile.introduction.is_none());
        assert!(matches!(
            profile.into_company("99999").unwrap_err(),
            ScoutError::InvalidIdentifier(_)
        ));
    }

    #[tokio::test]
    async fn listing_request_carries_sort_and_page_params() {
        let server = MockServer::start().await;
        let session = logged_in_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/company_answer.php"))
            .and(query_param("m_id", "12345"))
            .and(query_param("sort_key", "1"))
            .and(query_param("sort_val", "-1"))
            .and(query_param("next_page", "3"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_string(listing_page(&[("2025-06-01", "a review")])),
            )
            .mount(&server)
            .await;

        let scraper = OpenworkScraper::new(&session, server.uri());
        let fetched = scraper.fetch_listing("12345", 3).await.unwrap();
        assert!(fetched.status.is_success());
        assert!(fetched.body.contains("a review"));
    }

    #[tokio::test]
    async fn three_listing_pages_yield_all_reviews_in_server_order() {
        use crate::scrapers::paginator::collect_reviews;
        use crate::scrapers::types::ScrapeParams;
        use chrono::{Duration, Utc};

        let server = MockServer::start().await;
        let session = logged_in_session(&server).await;

        let date = (Utc::now() - Duration::days(30))
            .date_naive()
            .format("%Y-%m-%d")
            .to_string();
        let mut texts = Vec::new();
        for (page, count) in [(1u32, 5usize), (2, 5), (3, 2)] {
            let items: Vec<(String, String)> = (0..count)
                .map(|i| (date.clone(), format!("page {page} review {i}")))
                .collect();
            texts.extend(items.iter().map(|(_, t)| t.clone()));
            let borrowed: Vec<(&str, &str)> = items
                .iter()
                .map(|(d, t)| (d.as_str(), t.as_str()))
                .collect();
            Mock::given(method("GET"))
                .and(path("/company_answer.php"))
                .and(query_param("m_id", "12345"))
                .and(query_param("next_page", page.to_string()))
                .respond_with(
                    ResponseTemplate::new(200).set_body_string(listing_page(&borrowed)),
                )
                .mount(&server)
                .await;
        }
        Mock::given(method("GET"))
            .and(path("/company_answer.php"))
            .and(query_param("next_page", "4"))
            .respond_with(ResponseTemplate::new(200).set_body_string(listing_page(&[])))
            .mount(&server)
            .await;

        let scraper = OpenworkScraper::new(&session, server.uri());
        let params = ScrapeParams {
            min_delay_ms: 0,
            max_delay_ms: 0,
            ..ScrapeParams::default()
        };
        let reviews = collect_reviews(&scraper, &OpenworkParser::new(), "12345", &params).await;

        assert_eq!(reviews.len(), 12);
        let collected: Vec<_> = reviews.iter().map(|r| r.content.as_str()).collect();
        let expected: Vec<_> = texts.iter().map(String::as_str).collect();
        assert_eq!(collected, expected);
    }

    #[tokio::test]
    async fn non_success_status_is_returned_not_raised() {
        let server = MockServer::start().await;
        let session = logged_in_session(&server).await;
        Mock::given(method("GET"))
            .and(path("/company_answer.php"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let scraper = OpenworkScraper::new(&session, server.uri());
        let fetched = scraper.fetch_listing("12345", 1).await.unwrap();
        assert_eq!(fetched.status.as_u16(), 503);
    }
}
