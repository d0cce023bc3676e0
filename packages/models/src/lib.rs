#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared record types for the shotbot pipeline.
//!
//! An [`Incident`] starts out with the eight core fields scraped from the
//! archive listing and is enriched strictly additively by each pipeline
//! stage: the geocoder fills [`Incident::coordinates`], the legislator
//! resolver fills both legislator lists. Earlier fields are never mutated.
//!
//! Legislator fields that could not be resolved from the upstream APIs are
//! `None` — an explicit absent-value marker, never an error. The one
//! exception is [`NationalLegislator::contributions`], which is
//! definitionally additive and degrades to `0` instead.

use serde::{Deserialize, Serialize};

/// A latitude/longitude pair (WGS84).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    /// Latitude.
    pub latitude: f64,
    /// Longitude.
    pub longitude: f64,
}

impl Coordinates {
    /// Sentinel value meaning "location could not be geocoded".
    ///
    /// After the geocode stage every incident carries coordinates; an
    /// unresolved location is signalled by this value, never by absence.
    pub const UNRESOLVED: Self = Self {
        latitude: -1.0,
        longitude: -1.0,
    };

    /// Returns `true` if this is the unresolved sentinel.
    #[must_use]
    // The sentinel is assigned verbatim, never computed, so exact
    // comparison is well-defined here.
    #[allow(clippy::float_cmp)]
    pub fn is_unresolved(self) -> bool {
        self.latitude == Self::UNRESOLVED.latitude && self.longitude == Self::UNRESOLVED.longitude
    }
}

/// One gun-violence event scraped from the archive listing for a given
/// date, progressively enriched by the pipeline stages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Incident {
    /// Report date in the archive's display format (e.g. "August 21, 2015").
    pub date: String,
    /// State name (e.g. "Indiana", or "District of Columbia").
    pub state: String,
    /// City or county (e.g. "Jenison (Georgetown Township)").
    pub city_or_county: String,
    /// Street-level address (often fuzzy, e.g. "200 block of North Monroe
    /// Street" or "48th and Wellington").
    pub address: String,
    /// Number killed. Zero killed and injured usually means an attempt or a
    /// found weapon.
    pub killed: u32,
    /// Number injured.
    pub injured: u32,
    /// Absolute URL of the archive's incident detail page.
    pub incident_url: String,
    /// URL of the external news report.
    pub source_url: String,
    /// Geocoded location. `None` only before the geocode stage has run;
    /// afterwards always `Some`, with [`Coordinates::UNRESOLVED`] meaning
    /// the lookup failed.
    pub coordinates: Option<Coordinates>,
    /// Federal legislators responsible for the incident's location.
    pub national_legislators: Vec<NationalLegislator>,
    /// State legislators responsible for the incident's location.
    pub state_legislators: Vec<StateLegislator>,
}

impl Incident {
    /// Returns the coordinates if the geocode stage resolved a real
    /// location (ran, and did not produce the sentinel).
    #[must_use]
    pub fn resolved_coordinates(&self) -> Option<Coordinates> {
        self.coordinates.filter(|c| !c.is_unresolved())
    }
}

/// Contact and campaign-finance details for one federal legislator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NationalLegislator {
    /// Short title, e.g. "Sen" or "Rep".
    pub title: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Nickname, if any.
    pub nickname: Option<String>,
    /// Twitter handle, e.g. "SenatorCantwell".
    pub twitter_id: Option<String>,
    /// Facebook page identifier.
    pub facebook_id: Option<String>,
    /// Office phone number.
    pub phone: Option<String>,
    /// Office fax number.
    pub fax: Option<String>,
    /// Party letter, e.g. "D", "R", "I".
    pub party: Option<String>,
    /// URL of the legislator's web contact form.
    pub contact_form: Option<String>,
    /// Birthday as an ISO date string.
    pub birthday: Option<String>,
    /// Start of the current term as an ISO date string.
    pub term_start: Option<String>,
    /// Total recorded gun-rights industry contributions (USD) summed over
    /// the configured election cycles. Always present; `0` when unknown.
    pub contributions: u64,
}

/// Contact details for one state legislator.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct StateLegislator {
    /// Party name, e.g. "Republican".
    pub party: Option<String>,
    /// First name.
    pub first_name: Option<String>,
    /// Last name.
    pub last_name: Option<String>,
    /// Contact email address.
    pub email: Option<String>,
    /// Phone number of the legislator's first listed office.
    pub office_phone: Option<String>,
    /// Fax number of the legislator's first listed office.
    pub office_fax: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_is_unresolved() {
        assert!(Coordinates::UNRESOLVED.is_unresolved());
    }

    #[test]
    fn real_coordinates_are_resolved() {
        let c = Coordinates {
            latitude: 47.6062,
            longitude: -122.3321,
        };
        assert!(!c.is_unresolved());
    }

    #[test]
    fn resolved_coordinates_skips_sentinel() {
        let incident = Incident {
            date: "August 21, 2015".to_owned(),
            state: "Washington".to_owned(),
            city_or_county: "Grapeview".to_owned(),
            address: "200 block of North Monroe Street".to_owned(),
            killed: 1,
            injured: 2,
            incident_url: "http://archive.example/incident/1".to_owned(),
            source_url: "http://news.example/story".to_owned(),
            coordinates: Some(Coordinates::UNRESOLVED),
            national_legislators: Vec::new(),
            state_legislators: Vec::new(),
        };
        assert_eq!(incident.resolved_coordinates(), None);
    }
}
