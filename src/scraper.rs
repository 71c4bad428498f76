use std::time::Duration;

use scraper::{Html, Selector};
use tracing::debug;

use crate::error::{RankError, Result};

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// Common job description containers, tried in order.
const CONTENT_SELECTORS: &[&str] = &[
    "article",
    "main",
    ".job-description",
    ".job-details",
    "#job-description",
    "#job-details",
    "div[class*='description']",
    "div[class*='details']",
];

/// Fetches a job posting and reduces it to its readable text.
pub fn scrape_job_url(url: &str) -> Result<String> {
    let fetch_error = |reason: String| RankError::Fetch {
        url: url.to_string(),
        reason,
    };

    let client = reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(|e| fetch_error(e.to_string()))?;
    let response_text = client
        .get(url)
        .send()
        .and_then(|r| r.error_for_status())
        .and_then(|r| r.text())
        .map_err(|e| fetch_error(e.to_string()))?;

    let text = text_from_html(&response_text);
    if text.is_empty() {
        return Err(fetch_error(
            "could not extract any meaningful content from the page".into(),
        ));
    }
    debug!(url, chars = text.len(), "scraped job description");
    Ok(text)
}

/// Text of the first matching content container, else all paragraphs,
/// else the whole body. Empty when the page has no text at all.
pub fn text_from_html(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut extracted_text = String::new();
    for sel_str in CONTENT_SELECTORS {
        let Ok(selector) = Selector::parse(sel_str) else {
            continue;
        };
        for element in document.select(&selector) {
            extracted_text.push_str(&element.text().collect::<Vec<_>>().join(" "));
            extracted_text.push_str("\n\n");
        }
        if !extracted_text.trim().is_empty() {
            return extracted_text.trim().to_string();
        }
    }

    if let Ok(p_selector) = Selector::parse("p") {
        for element in document.select(&p_selector) {
            extracted_text.push_str(&element.text().collect::<Vec<_>>().join(" "));
            extracted_text.push('\n');
        }
    }

    if extracted_text.trim().is_empty() {
        if let Ok(body_selector) = Selector::parse("body") {
            if let Some(body_element) = document.select(&body_selector).next() {
                extracted_text = body_element.text().collect::<Vec<_>>().join(" ");
            }
        }
    }

    extracted_text.trim().to_string()
}
