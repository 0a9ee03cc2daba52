use scraper::{ElementRef, Html, Selector};

use crate::scrapers::traits::ReviewPageParser;
use crate::scrapers::types::RawReview;

/// Marker that only appears on OpenWork pages rendered for a signed-in member
const GREETING_MARKER: &str = "ようこそ";

/// The one place that knows OpenWork's markup. Everything is keyed on
/// structural selectors, so a site redesign breaks here and nowhere else.
#[derive(Debug, Default)]
pub struct OpenworkParser;

impl OpenworkParser {
    pub fn new() -> Self {
        Self
    }

    fn select_text(document: &Html, selector_str: &str) -> Option<String> {
        let selector = Selector::parse(selector_str).ok()?;
        let element = document.select(&selector).next()?;
        let text = clean_text(&element);
        (!text.is_empty()).then_some(text)
    }
}

impl ReviewPageParser for OpenworkParser {
    fn csrf_token(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        let selector = Selector::parse(r#"input[name="_csrf_token"]"#).ok()?;
        let input = document.select(&selector).next()?;
        let value = input.value().attr("value")?.trim();
        (!value.is_empty()).then(|| value.to_string())
    }

    fn greeting_present(&self, html: &str) -> bool {
        html.contains(GREETING_MARKER)
    }

    fn company_name(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        Self::select_text(&document, "#mainTitle > h2 > a")
    }

    fn company_intro(&self, html: &str) -> Option<String> {
        let document = Html::parse_document(html);
        Self::select_text(
            &document,
            "#contentsHeader_text > div > p.mt-20.w-740.madblack.break-all",
        )
    }

    fn review_listing(&self, html: &str) -> Option<Vec<RawReview>> {
        let document = Html::parse_document(html);
        let anchor_selector = Selector::parse("#anchor01").ok()?;
        let anchor = document.select(&anchor_selector).next()?;

        let article_selector = Selector::parse("article.article").ok()?;
        let date_selector = Selector::parse("div.article_header-white > p > time").ok()?;
        let content_selector = Selector::parse("div.article_body > dl > dd.article_answer").ok()?;

        let mut items = Vec::new();
        for article in anchor.select(&article_selector) {
            let date = article
                .select(&date_selector)
                .next()
                .and_then(|time| time.value().attr("datetime"))
                .map(str::to_string);
            let content = article
                .select(&content_selector)
                .next()
                .map(|dd| clean_text(&dd))
                .unwrap_or_default();
            items.push(RawReview { date, content });
        }
        Some(items)
    }
}

/// Join text fragments and collapse runs of whitespace
fn clean_text(element: &ElementRef) -> String {
    element
        .text()
        .collect::<Vec<_>>()
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
