//! Neighborhood extraction from free-text client addresses.
//!
//! The address field encodes street/neighborhood/city in a variable
//! comma-separated format. The comma count decides which segment is the
//! neighborhood: two commas mean the third segment, one comma the second,
//! and anything else falls into a fixed sentinel bucket. Parsing never
//! fails; a malformed address is still grouped, just under the sentinel.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::models::{ClientRow, NeighborhoodGroup};

/// Placeholder when no neighborhood segment can be identified
pub const UNIDENTIFIED_NEIGHBORHOOD: &str = "Bairro não identificado";

static THREE_SEGMENTS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^,]+,[^,]+,[^,]+$").unwrap());

static TWO_SEGMENTS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^,]+,[^,]+$").unwrap());

/// Extract the neighborhood from a free-text address.
///
/// Exactly two commas: trimmed third segment. Exactly one comma: trimmed
/// second segment. Any other shape (including the empty string) yields
/// [`UNIDENTIFIED_NEIGHBORHOOD`].
pub fn neighborhood_of(address: &str) -> String {
    let segment = if THREE_SEGMENTS.is_match(address) {
        address.split(',').nth(2)
    } else if TWO_SEGMENTS.is_match(address) {
        address.split(',').nth(1)
    } else {
        None
    };

    match segment {
        Some(s) => s.trim().to_string(),
        None => UNIDENTIFIED_NEIGHBORHOOD.to_string(),
    }
}

/// Group clients by (city, neighborhood).
///
/// Each group carries the client count and the comma-joined alphabetical
/// name list. Groups are ordered by city ascending, then count descending,
/// then neighborhood ascending as a deterministic tiebreak.
pub fn group_by_neighborhood(clients: &[ClientRow]) -> Vec<NeighborhoodGroup> {
    let mut buckets: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();

    for client in clients {
        let neighborhood = neighborhood_of(&client.address);
        buckets
            .entry((client.city.clone(), neighborhood))
            .or_default()
            .push(client.name.clone());
    }

    let mut groups: Vec<NeighborhoodGroup> = buckets
        .into_iter()
        .map(|((city, neighborhood), mut names)| {
            names.sort();
            NeighborhoodGroup {
                city,
                neighborhood,
                total: names.len() as u64,
                clients: names.join(", "),
            }
        })
        .collect();

    groups.sort_by(|a, b| {
        a.city
            .cmp(&b.city)
            .then(b.total.cmp(&a.total))
            .then(a.neighborhood.cmp(&b.neighborhood))
    });

    groups
}
