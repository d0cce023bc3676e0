//! Campaign-finance contribution fetcher.
//!
//! Queries a fixed industry code's contribution totals for each configured
//! election cycle and returns their sum. The provider signals "no
//! contributions recorded for this cycle" as an HTTP 404, which resolves
//! to zero for that cycle specifically; so does a response missing the
//! total field, with a diagnostic. The contract guarantees a definite
//! non-negative integer for every call, never an error.

use serde_json::Value;
use shotbot_json_utils::lookup_u64;

use crate::LegislatorError;

/// Industry code for gun-rights organisations in the campaign-finance API.
pub const GUN_RIGHTS_INDUSTRY: &str = "Q13";

/// Election cycles queried when the configuration does not override them.
pub const DEFAULT_CYCLES: &[u16] = &[2012, 2014];

/// Client for the campaign-finance totals endpoint.
#[derive(Debug, Clone)]
pub struct ContributionFetcher {
    base_url: String,
    api_key: String,
    industry: String,
    cycles: Vec<u16>,
}

impl ContributionFetcher {
    /// Creates a fetcher for the gun-rights industry over the default
    /// cycles.
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_owned(),
            api_key: api_key.to_owned(),
            industry: GUN_RIGHTS_INDUSTRY.to_owned(),
            cycles: DEFAULT_CYCLES.to_vec(),
        }
    }

    /// Overrides the election cycles to sum over.
    #[must_use]
    pub fn with_cycles(mut self, cycles: Vec<u16>) -> Self {
        self.cycles = cycles;
        self
    }

    /// Fetches the summed contribution total for one legislator.
    ///
    /// Each cycle is queried independently; any per-cycle failure degrades
    /// to zero for that cycle. Re-running with the same identifier yields
    /// the same sum — the fetcher holds no state across calls.
    pub async fn fetch(&self, client: &reqwest::Client, crp_id: &str) -> u64 {
        let mut total = 0;

        for cycle in &self.cycles {
            total += match self.fetch_cycle(client, crp_id, *cycle).await {
                Ok(amount) => amount,
                Err(e) => {
                    log::error!("Contribution lookup failed for {crp_id} cycle {cycle}: {e}");
                    0
                }
            };
        }

        total
    }

    /// Fetches one cycle's total. A 404 means no contributions were found
    /// in that cycle and resolves to zero.
    async fn fetch_cycle(
        &self,
        client: &reqwest::Client,
        crp_id: &str,
        cycle: u16,
    ) -> Result<u64, LegislatorError> {
        let cycle = cycle.to_string();
        let response = client
            .get(&self.base_url)
            .query(&[
                ("method", "candIndByInd"),
                ("output", "json"),
                ("cid", crp_id),
                ("cycle", cycle.as_str()),
                ("ind", self.industry.as_str()),
                ("apikey", self.api_key.as_str()),
            ])
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(0);
        }

        let body: Value = response.error_for_status()?.json().await?;
        Ok(cycle_total(&body, crp_id, &cycle))
    }
}

/// Resolves one cycle's response body to its total, degrading a missing
/// total field to zero with a diagnostic.
#[must_use]
pub fn cycle_total(body: &Value, crp_id: &str, cycle: &str) -> u64 {
    parse_total(body).unwrap_or_else(|| {
        log::warn!("Couldn't get contributions for candidate with crp_id of {crp_id}");
        log::warn!("  {cycle}: {body}");
        0
    })
}

/// Extracts the total-contribution figure from a cycle response.
#[must_use]
pub fn parse_total(body: &Value) -> Option<u64> {
    lookup_u64(body, &["response", "indus", "@attributes", "total"])
}
