//! State legislator record assembly.
//!
//! State legislator objects carry their contact numbers inside a nested
//! `offices` array that is sometimes absent or empty. The office-dependent
//! fields fall back to `None` in that case without abandoning the fields
//! already resolved from the top-level object.

use serde_json::Value;
use shotbot_json_utils::{lookup, lookup_str};
use shotbot_models::StateLegislator;

/// Assembles a [`StateLegislator`] from one service object.
#[must_use]
pub fn assemble(legislator: &Value) -> StateLegislator {
    let mut record = StateLegislator {
        party: lookup_str(legislator, &["party"]),
        first_name: lookup_str(legislator, &["first_name"]),
        last_name: lookup_str(legislator, &["last_name"]),
        email: lookup_str(legislator, &["email"]),
        office_phone: None,
        office_fax: None,
    };

    // Sometimes there are no offices listed; keep the rest of the record.
    if let Some(office) = lookup(legislator, &["offices", "0"]) {
        record.office_phone = lookup_str(office, &["phone"]);
        record.office_fax = lookup_str(office, &["fax"]);
    }

    record
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn assembles_record_with_office() {
        let value = json!({
            "party": "Republican",
            "first_name": "Patty B.",
            "last_name": "Murray",
            "email": "patty@leg.example",
            "offices": [
                {"phone": "360-786-7600", "fax": "360-786-1999"},
                {"phone": "206-555-0000"}
            ]
        });

        let record = assemble(&value);
        assert_eq!(record.party.as_deref(), Some("Republican"));
        assert_eq!(record.office_phone.as_deref(), Some("360-786-7600"));
        assert_eq!(record.office_fax.as_deref(), Some("360-786-1999"));
    }

    #[test]
    fn missing_offices_keeps_resolved_fields() {
        let value = json!({
            "party": "Democratic",
            "first_name": "Maria",
            "last_name": "Cantwell",
            "email": null
        });

        let record = assemble(&value);
        assert_eq!(record.first_name.as_deref(), Some("Maria"));
        assert_eq!(record.email, None);
        assert_eq!(record.office_phone, None);
        assert_eq!(record.office_fax, None);
    }

    #[test]
    fn malformed_offices_keeps_resolved_fields() {
        let value = json!({
            "first_name": "Maria",
            "last_name": "Cantwell",
            "offices": "none"
        });

        let record = assemble(&value);
        assert_eq!(record.last_name.as_deref(), Some("Cantwell"));
        assert_eq!(record.office_phone, None);
    }
}
