//! Human-readable console summary.
//!
//! One block per incident: date/location header, casualty counts, address,
//! then a line per national legislator (with the contribution flag only
//! when a nonzero sum was found) and a line per state legislator. Absent
//! fields render as empty strings rather than markers.

use shotbot_models::Incident;

/// Prints the summary for every incident to stdout.
pub fn print_summary(incidents: &[Incident]) {
    for incident in incidents {
        print!("{}", render(incident));
    }
}

/// Renders one incident's summary block.
#[must_use]
pub fn render(incident: &Incident) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}: Incident in {}, {}\n",
        incident.date, incident.city_or_county, incident.state
    ));
    out.push_str(&format!(
        "  {} injured, {} killed.\n",
        incident.injured, incident.killed
    ));
    out.push_str(&format!("  Location: {}\n", incident.address));
    out.push_str("  Relevant legislators:\n");

    for legislator in &incident.national_legislators {
        out.push_str(&format!(
            "    National: {}. {} {}\n",
            or_empty(&legislator.title),
            or_empty(&legislator.first_name),
            or_empty(&legislator.last_name)
        ));
        out.push_str(&format!(
            "      Twitter: {}\n",
            or_empty(&legislator.twitter_id)
        ));
        if legislator.contributions != 0 {
            out.push_str(&format!(
                "      Has campaign contributions from Gun Rights industry: ${}\n",
                legislator.contributions
            ));
        }
    }

    for legislator in &incident.state_legislators {
        out.push_str(&format!(
            "    State: {} {} (Email: {})\n",
            or_empty(&legislator.first_name),
            or_empty(&legislator.last_name),
            or_empty(&legislator.email)
        ));
    }

    out.push('\n');
    out
}

fn or_empty(field: &Option<String>) -> &str {
    field.as_deref().unwrap_or("")
}
