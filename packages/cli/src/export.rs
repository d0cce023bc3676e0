//! Structured CSV export of the enriched incident list.
//!
//! One record per incident: the eight core fields, the coordinate pair
//! (sentinel values included, so unresolved rows stay distinguishable),
//! and the number of legislators attached by the resolver.

use std::io::Write;
use std::path::Path;

use serde::Serialize;
use shotbot_models::{Coordinates, Incident};

/// One exported CSV record.
#[derive(Debug, Serialize)]
struct IncidentRow<'a> {
    date: &'a str,
    state: &'a str,
    city_or_county: &'a str,
    address: &'a str,
    killed: u32,
    injured: u32,
    incident_url: &'a str,
    source_url: &'a str,
    latitude: f64,
    longitude: f64,
    national_legislators: usize,
    state_legislators: usize,
}

impl<'a> IncidentRow<'a> {
    fn from_incident(incident: &'a Incident) -> Self {
        let coordinates = incident.coordinates.unwrap_or(Coordinates::UNRESOLVED);
        Self {
            date: &incident.date,
            state: &incident.state,
            city_or_county: &incident.city_or_county,
            address: &incident.address,
            killed: incident.killed,
            injured: incident.injured,
            incident_url: &incident.incident_url,
            source_url: &incident.source_url,
            latitude: coordinates.latitude,
            longitude: coordinates.longitude,
            national_legislators: incident.national_legislators.len(),
            state_legislators: incident.state_legislators.len(),
        }
    }
}

/// Writes the incident list as CSV to `path`.
///
/// # Errors
///
/// Returns [`csv::Error`] if the file cannot be created or a record fails
/// to serialize.
pub fn write_csv(path: &Path, incidents: &[Incident]) -> Result<(), csv::Error> {
    let mut writer = csv::Writer::from_path(path)?;
    write_records(&mut writer, incidents)?;
    writer.flush()?;
    Ok(())
}

fn write_records<W: Write>(
    writer: &mut csv::Writer<W>,
    incidents: &[Incident],
) -> Result<(), csv::Error> {
    for incident in incidents {
        writer.serialize(IncidentRow::from_incident(incident))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn incident() -> Incident {
        Incident {
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
        }
    }

    #[test]
    fn exports_sentinel_coordinates_verbatim() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        write_records(&mut writer, &[incident()]).unwrap();

        let data = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        let mut lines = data.lines();

        let header = lines.next().unwrap();
        assert!(header.starts_with("date,state,city_or_county,address"));

        let record = lines.next().unwrap();
        assert!(record.contains("-1.0,-1.0"));
        assert!(record.contains("http://news.example/story"));
    }
}
