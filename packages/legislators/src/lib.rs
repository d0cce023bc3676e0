#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Legislator resolver stage.
//!
//! For each geocoded incident, issues two independent point lookups — one
//! against the national-legislator service, one against the state-
//! legislator service — and attaches normalized contact records to the
//! incident. Each national legislator additionally gets a campaign-finance
//! contribution sum from the [`contributions`] fetcher.
//!
//! Incidents whose coordinates are the unresolved sentinel are skipped
//! entirely: both lists stay empty. Per-incident lookup failures are
//! logged and leave that incident's list empty; nothing here aborts the
//! run.

pub mod contributions;
pub mod national;
pub mod state;

use serde_json::Value;
use shotbot_models::Incident;

pub use contributions::ContributionFetcher;

/// Errors from a single legislator service call.
#[derive(Debug, thiserror::Error)]
pub enum LegislatorError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response was not shaped as expected.
    #[error("Parse error: {message}")]
    Parse {
        /// Description of the parsing failure.
        message: String,
    },
}

/// Resolver for both legislator services plus the contribution fetcher.
#[derive(Debug, Clone)]
pub struct Resolver {
    national_url: String,
    state_url: String,
    api_key: String,
    contributions: ContributionFetcher,
}

impl Resolver {
    /// Creates a resolver.
    ///
    /// `api_key` authenticates both the national and the state lookup
    /// services (they share a key provider).
    #[must_use]
    pub fn new(
        national_url: &str,
        state_url: &str,
        api_key: &str,
        contributions: ContributionFetcher,
    ) -> Self {
        Self {
            national_url: national_url.to_owned(),
            state_url: state_url.to_owned(),
            api_key: api_key.to_owned(),
            contributions,
        }
    }

    /// Attaches national and state legislator lists to every incident with
    /// resolved coordinates.
    pub async fn resolve_all(&self, client: &reqwest::Client, incidents: &mut [Incident]) {
        log::info!("Finding relevant legislators...");

        for incident in incidents {
            // Only proceed if we know where this happened.
            let Some(coordinates) = incident.resolved_coordinates() else {
                continue;
            };

            match self
                .locate(client, &self.national_url, coordinates.latitude, coordinates.longitude)
                .await
            {
                Ok(found) => {
                    for legislator in &found {
                        let contributions = match national::crp_id(legislator) {
                            Some(id) => self.contributions.fetch(client, &id).await,
                            None => 0,
                        };
                        incident
                            .national_legislators
                            .push(national::assemble(legislator, contributions));
                    }
                }
                Err(e) => {
                    log::error!(
                        "National legislator lookup failed for ({}, {}): {e}",
                        coordinates.latitude,
                        coordinates.longitude
                    );
                }
            }

            match self
                .locate(client, &self.state_url, coordinates.latitude, coordinates.longitude)
                .await
            {
                Ok(found) => {
                    incident
                        .state_legislators
                        .extend(found.iter().map(state::assemble));
                }
                Err(e) => {
                    log::error!(
                        "State legislator lookup failed for ({}, {}): {e}",
                        coordinates.latitude,
                        coordinates.longitude
                    );
                }
            }
        }
    }

    /// Performs one point lookup and returns the legislator objects.
    ///
    /// Both services take the same query shape; they differ only in how the
    /// result array is wrapped, which [`result_array`] normalizes.
    async fn locate(
        &self,
        client: &reqwest::Client,
        url: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<Vec<Value>, LegislatorError> {
        let response = client
            .get(url)
            .query(&[
                ("latitude", latitude.to_string()),
                ("longitude", longitude.to_string()),
                ("apikey", self.api_key.clone()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: Value = response.json().await?;
        result_array(&body)
    }
}

/// Normalizes a point-lookup response into a list of legislator objects.
///
/// The national service wraps its list in a `results` key; the state
/// service returns a bare array.
fn result_array(body: &Value) -> Result<Vec<Value>, LegislatorError> {
    match body {
        Value::Array(items) => Ok(items.clone()),
        Value::Object(map) => match map.get("results") {
            Some(Value::Array(items)) => Ok(items.clone()),
            _ => Err(LegislatorError::Parse {
                message: format!("no results array in response: {body}"),
            }),
        },
        _ => Err(LegislatorError::Parse {
            message: format!("unexpected response shape: {body}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use serde_json::json;
    use shotbot_models::Coordinates;
    use tokio::net::TcpListener;

    use super::*;

    #[test]
    fn unwraps_results_object() {
        let body = json!({"results": [{"first_name": "Patty"}]});
        let items = result_array(&body).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn accepts_bare_array() {
        let body = json!([{"first_name": "Patty"}, {"first_name": "Maria"}]);
        assert_eq!(result_array(&body).unwrap().len(), 2);
    }

    #[test]
    fn rejects_missing_results() {
        let body = json!({"error": "bad key"});
        assert!(result_array(&body).is_err());
    }

    fn unlocated_incident(coordinates: Option<Coordinates>) -> Incident {
        Incident {
            date: "August 21, 2015".to_owned(),
            state: "Washington".to_owned(),
            city_or_county: "Grapeview".to_owned(),
            address: "200 block of North Monroe Street".to_owned(),
            killed: 1,
            injured: 2,
            incident_url: "http://archive.example/incident/1".to_owned(),
            source_url: "http://news.example/story".to_owned(),
            coordinates,
            national_legislators: Vec::new(),
            state_legislators: Vec::new(),
        }
    }

    #[tokio::test]
    async fn sentinel_coordinates_leave_both_lists_empty() {
        // Count every connection attempt; the resolver must not issue any
        // lookup for an incident without a resolved location.
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&hits);
        tokio::spawn(async move {
            while listener.accept().await.is_ok() {
                counter.fetch_add(1, Ordering::SeqCst);
            }
        });

        let fetcher = ContributionFetcher::new(&format!("http://{addr}/api/"), "crp-key");
        let resolver = Resolver::new(
            &format!("http://{addr}/legislators/locate"),
            &format!("http://{addr}/legislators/geo/"),
            "leg-key",
            fetcher,
        );

        let client = reqwest::Client::new();
        let mut incidents = vec![
            unlocated_incident(Some(Coordinates::UNRESOLVED)),
            unlocated_incident(None),
        ];
        resolver.resolve_all(&client, &mut incidents).await;

        for incident in &incidents {
            assert!(incident.national_legislators.is_empty());
            assert!(incident.state_legislators.is_empty());
        }
        assert_eq!(hits.load(Ordering::SeqCst), 0);
    }
}
