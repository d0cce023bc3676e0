//! National legislator record assembly.
//!
//! Maps one legislator object from the national point-lookup service into
//! the fixed-shape [`NationalLegislator`] record. Every field goes through
//! the tolerant accessor: a key missing from one legislator's object
//! becomes `None` in that record without affecting any other field.

use serde_json::Value;
use shotbot_json_utils::lookup_str;
use shotbot_models::NationalLegislator;

/// Extracts the legislator's campaign-finance system identifier.
///
/// Without it no contribution lookup is possible, and the contribution sum
/// defaults to zero.
#[must_use]
pub fn crp_id(legislator: &Value) -> Option<String> {
    lookup_str(legislator, &["crp_id"])
}

/// Assembles a [`NationalLegislator`] from one service object plus the
/// already-fetched contribution sum.
#[must_use]
pub fn assemble(legislator: &Value, contributions: u64) -> NationalLegislator {
    NationalLegislator {
        title: lookup_str(legislator, &["title"]),
        first_name: lookup_str(legislator, &["first_name"]),
        last_name: lookup_str(legislator, &["last_name"]),
        nickname: lookup_str(legislator, &["nickname"]),
        twitter_id: lookup_str(legislator, &["twitter_id"]),
        facebook_id: lookup_str(legislator, &["facebook_id"]),
        phone: lookup_str(legislator, &["phone"]),
        fax: lookup_str(legislator, &["fax"]),
        party: lookup_str(legislator, &["party"]),
        contact_form: lookup_str(legislator, &["contact_form"]),
        birthday: lookup_str(legislator, &["birthday"]),
        term_start: lookup_str(legislator, &["term_start"]),
        contributions,
    }
}
