#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Geocoder stage: resolves each incident's fuzzy location to coordinates.
//!
//! Builds a free-text address from the incident's street, city/county, and
//! state fields and resolves it with one geocoding call per incident. The
//! location data going in is fuzzy ("48th and Wellington", "200 block of
//! North Monroe Street"), so matches are often a town centre or street
//! corner rather than a rooftop.
//!
//! Every incident leaves this stage with coordinates present: a transport
//! failure, an empty candidate list, or an unexpected response shape all
//! resolve to [`Coordinates::UNRESOLVED`] with a diagnostic log, never an
//! aborted run.

use serde_json::Value;
use shotbot_json_utils::lookup_f64;
use shotbot_models::{Coordinates, Incident};

/// Errors from a single geocoding call.
#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Client for a Google-style geocoding REST endpoint.
#[derive(Debug, Clone)]
pub struct Geocoder {
    base_url: String,
    api_key: String,
}

impl Geocoder {
    /// Creates a geocoder for the given endpoint and API key.
    #[must_use]
    pub fn new(base_url: &str, api_key: &str) -> Self {
        Self {
            base_url: base_url.to_owned(),
            api_key: api_key.to_owned(),
        }
    }

    /// Appends coordinates to every incident, one geocoding call each.
    ///
    /// This stage never fails the run; unresolvable incidents get the
    /// sentinel pair.
    pub async fn geocode_all(&self, client: &reqwest::Client, incidents: &mut [Incident]) {
        log::info!("Finding geocodes for {} incident(s)...", incidents.len());

        for incident in incidents {
            let address = build_address(incident);

            let coordinates = match self.lookup(client, &address).await {
                Ok(body) => parse_coordinates(&body).unwrap_or_else(|| {
                    log::warn!("Couldn't parse lat/long from geocode:");
                    log::warn!("  Address: {address}");
                    log::warn!("  Results: {body}");
                    Coordinates::UNRESOLVED
                }),
                Err(e) => {
                    log::error!("Failed to get geocode response for '{address}': {e}");
                    Coordinates::UNRESOLVED
                }
            };

            incident.coordinates = Some(coordinates);
        }
    }

    /// Performs one geocoding call for a free-text address.
    async fn lookup(&self, client: &reqwest::Client, address: &str) -> Result<Value, GeocodeError> {
        let response = client
            .get(&self.base_url)
            .query(&[("address", address), ("key", &self.api_key)])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json().await?)
    }
}

/// Builds the free-text address sent to the geocoding service.
#[must_use]
pub fn build_address(incident: &Incident) -> String {
    format!(
        "{}, {}, {}",
        incident.address, incident.city_or_county, incident.state
    )
}

/// Extracts the first candidate's coordinates from a geocoding response.
///
/// Returns `None` when the candidate list is empty or the response shape
/// is unexpected.
#[must_use]
pub fn parse_coordinates(body: &Value) -> Option<Coordinates> {
    let latitude = lookup_f64(body, &["results", "0", "geometry", "location", "lat"])?;
    let longitude = lookup_f64(body, &["results", "0", "geometry", "location", "lng"])?;
    Some(Coordinates {
        latitude,
        longitude,
    })
}
