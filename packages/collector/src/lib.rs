#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Incident collector for the gun-violence archive listing.
//!
//! Fetches a bounded number of listing pages and extracts the rows dated
//! `target_date` into [`Incident`] core records. The archive marks data
//! rows with alternating `even`/`odd` CSS classes and never signals
//! end-of-results: past the last page it silently serves the final page
//! again, so the collector iterates a fixed page bound instead of probing
//! for an end. The default bound is generous for a single day's volume but
//! otherwise arbitrary; see [`ArchiveSource::with_max_pages`].

use scraper::{ElementRef, Html, Selector};
use shotbot_models::Incident;

/// Listing pages scanned per run when no override is given.
pub const DEFAULT_MAX_PAGES: u32 = 10;

/// Errors from fetching a listing page.
#[derive(Debug, thiserror::Error)]
pub enum CollectError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// The archive listing to scrape.
#[derive(Debug, Clone)]
pub struct ArchiveSource {
    /// Listing URL; the page number is appended as a `page` query value.
    pages_url: String,
    /// Root URL used to resolve the relative incident detail links.
    root_url: String,
    /// Number of listing pages to scan.
    max_pages: u32,
}

impl ArchiveSource {
    /// Creates a source for the given listing and root URLs with the
    /// default page bound.
    #[must_use]
    pub fn new(pages_url: &str, root_url: &str) -> Self {
        Self {
            pages_url: pages_url.to_owned(),
            root_url: root_url.to_owned(),
            max_pages: DEFAULT_MAX_PAGES,
        }
    }

    /// Overrides the number of listing pages to scan.
    ///
    /// The archive repeats its final page indefinitely rather than
    /// returning an error or an empty page, so this bound is the only
    /// termination condition. It is a structural limitation of the source,
    /// not something the collector can detect.
    #[must_use]
    pub const fn with_max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Collects all incidents dated `target_date` (in the archive's display
    /// format, e.g. "August 21, 2015") from the configured page range.
    ///
    /// A fetch failure on one page is logged and that page skipped;
    /// collection continues with the next page. Malformed rows are skipped
    /// individually. This stage never fails the run.
    pub async fn collect(&self, client: &reqwest::Client, target_date: &str) -> Vec<Incident> {
        let mut incidents = Vec::new();

        for page in 0..self.max_pages {
            log::info!("Retrieving incident reports page {}...", page + 1);

            match self.fetch_page(client, page).await {
                Ok(body) => {
                    incidents.extend(parse_page(&body, target_date, &self.root_url));
                }
                Err(e) => {
                    log::error!(
                        "HTTP error ({e}) while getting incidents page {}, moving on",
                        page + 1
                    );
                }
            }
        }

        log::info!(
            "Collected {} incident(s) dated {target_date}",
            incidents.len()
        );
        incidents
    }

    /// Fetches one listing page body.
    async fn fetch_page(&self, client: &reqwest::Client, page: u32) -> Result<String, CollectError> {
        let separator = if self.pages_url.contains('?') { '&' } else { '?' };
        let url = format!("{}{separator}page={page}", self.pages_url);
        let response = client.get(&url).send().await?.error_for_status()?;
        Ok(response.text().await?)
    }
}

/// Parses one listing page, returning the incidents whose displayed date
/// equals `target_date`.
///
/// Rows that match the date filter but fail positional extraction (missing
/// cells, missing links, unparseable counts) are dropped entirely with a
/// diagnostic dump of the row markup. Partial rows are never emitted: the
/// two outbound links double as a reliability signal for the row as a
/// whole, so a row missing either link is treated as untrustworthy.
#[must_use]
pub fn parse_page(html: &str, target_date: &str, root_url: &str) -> Vec<Incident> {
    let document = Html::parse_document(html);

    let row_sel = Selector::parse("tr.even, tr.odd").unwrap_or_else(|_| unreachable!());
    let cell_sel = Selector::parse("td").unwrap_or_else(|_| unreachable!());

    let mut incidents = Vec::new();

    for row in document.select(&row_sel) {
        let cells: Vec<ElementRef<'_>> = row.select(&cell_sel).collect();

        // Date filter first: rows for other days are expected, not errors.
        if cells.first().is_none_or(|c| cell_text(*c) != target_date) {
            continue;
        }

        if let Some(incident) = extract_row(&cells, root_url) {
            incidents.push(incident);
        } else {
            log::warn!("Skipping malformed incident row: {}", row.html());
        }
    }

    incidents
}

/// Extracts the eight positional fields from a row's cells.
///
/// Returns `None` unless every required sub-field, including both outbound
/// links in the seventh cell, is present.
fn extract_row(cells: &[ElementRef<'_>], root_url: &str) -> Option<Incident> {
    let anchor_sel = Selector::parse("a").unwrap_or_else(|_| unreachable!());

    // The seventh cell holds both links: the archive's incident detail
    // page (relative) followed by the external news source (absolute).
    let mut anchors = cells.get(6)?.select(&anchor_sel);
    let incident_href = anchors.next()?.value().attr("href")?;
    let source_href = anchors.next()?.value().attr("href")?;
    if incident_href.is_empty() || source_href.is_empty() {
        return None;
    }

    let killed = cell_text(*cells.get(4)?).parse().ok()?;
    let injured = cell_text(*cells.get(5)?).parse().ok()?;

    Some(Incident {
        date: cell_text(*cells.first()?),
        state: cell_text(*cells.get(1)?),
        city_or_county: cell_text(*cells.get(2)?),
        address: cell_text(*cells.get(3)?),
        killed,
        injured,
        incident_url: format!("{root_url}{incident_href}"),
        source_url: source_href.to_owned(),
        coordinates: None,
        national_legislators: Vec::new(),
        state_legislators: Vec::new(),
    })
}

/// Collects and trims the text content of a cell.
fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<Vec<_>>().join("").trim().to_owned()
}
