use regex::Regex;
use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use crate::config::SelectorConfig;
use crate::error::{Result, ScrapeError};
use crate::models::{CompanyRecord, PageResult};

/// Extracts company records from a parsed listing page.
///
/// All site-specific knowledge (which nodes hold which field) is confined
/// here and in the selector config; a markup change on the site means a
/// selector update, nothing else.
pub struct CompanyExtractor {
    entry: Selector,
    name: Selector,
    detail: Selector,
    link: Selector,
    pagenav: Selector,
    leading_number: Regex,
}

impl CompanyExtractor {
    /// Compiles all selectors up front; a bad selector string is a fatal
    /// configuration error, not something to discover on page 37.
    pub fn new(selectors: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            entry: parse_selector(&selectors.entry)?,
            name: parse_selector(&selectors.name)?,
            detail: parse_selector(&selectors.detail)?,
            link: parse_selector(&selectors.link)?,
            pagenav: parse_selector(&selectors.pagenav)?,
            leading_number: Regex::new(r"\d[\d.,]*").unwrap(),
        })
    }

    pub fn extract_page(&self, html: &str) -> PageResult {
        let document = Html::parse_document(html);

        let mut records = Vec::new();
        for entry in document.select(&self.entry) {
            match self.extract_entry(entry) {
                Some(record) => records.push(record),
                None => debug!("Skipping entry without a company name"),
            }
        }

        PageResult {
            records,
            total_pages: self.advertised_page_count(&document),
        }
    }

    /// Returns `None` only when the entry has no name; every other missing
    /// field becomes an unknown on the record.
    fn extract_entry(&self, entry: ElementRef) -> Option<CompanyRecord> {
        let name = entry.select(&self.name).next().map(element_text)?;
        if name.is_empty() {
            return None;
        }

        // The three facts share one class on the site; their order in the
        // markup is employee count, sector, headquarters.
        let details: Vec<String> = entry.select(&self.detail).map(element_text).collect();
        let employee_count = details
            .first()
            .and_then(|text| self.parse_employee_count(text));
        let sector = details.get(1).cloned().filter(|s| !s.is_empty());
        let headquarters = details.get(2).cloned().filter(|s| !s.is_empty());

        let mut website_url = None;
        let mut linkedin_url = None;
        let mut facebook_url = None;
        let mut twitter_url = None;
        let mut instagram_url = None;

        for link in entry.select(&self.link) {
            let Some(href) = link.value().attr("href") else {
                continue;
            };
            let slot = match href.to_lowercase() {
                h if h.contains("linkedin") => &mut linkedin_url,
                h if h.contains("facebook") => &mut facebook_url,
                h if h.contains("twitter") => &mut twitter_url,
                h if h.contains("instagram") => &mut instagram_url,
                _ => &mut website_url,
            };
            // Keep the first link of each kind.
            slot.get_or_insert_with(|| href.to_string());
        }

        if employee_count.is_none() {
            debug!("{}: no usable employee count", name);
        }
        if website_url.is_none() {
            debug!("{}: no website link", name);
        }

        Some(CompanyRecord {
            name,
            employee_count,
            sector,
            headquarters,
            website_url,
            linkedin_url,
            facebook_url,
            twitter_url,
            instagram_url,
        })
    }

    /// Best-effort normalization of free text like "50-100 empleados" or
    /// "1.200 empleados": take the leading numeric token, drop separators.
    fn parse_employee_count(&self, text: &str) -> Option<u64> {
        let token = self.leading_number.find(text)?;
        let digits: String = token
            .as_str()
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    /// The total page count the pagination nav advertises. The last nav
    /// link points at the last page, e.g. `.../certificadas/page/17/`.
    fn advertised_page_count(&self, document: &Html) -> Option<usize> {
        let last_href = document
            .select(&self.pagenav)
            .filter_map(|a| a.value().attr("href"))
            .last()?;
        last_href
            .trim_end_matches('/')
            .rsplit('/')
            .next()?
            .parse()
            .ok()
    }
}

fn parse_selector(selector: &str) -> Result<Selector> {
    Selector::parse(selector)
        .map_err(|e| ScrapeError::Selector(selector.to_string(), e.to_string()))
}

/// Collapses an element's text nodes into one whitespace-normalized string.
fn element_text(element: ElementRef) -> String {
    element
        .text()
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
