//! Branch-coverage relational division.
//!
//! A branch group is the set of branch rows sharing a (name, city) pair;
//! the rows keep distinct identity through their primary key. A client
//! covers the group when the distinct branch ids they hold accounts at
//! include every row of the group.

use std::collections::{BTreeMap, HashSet};

use sqlx::FromRow;

/// One (client, branch) holding: the client has at least one account at
/// the branch row identified by `branch_id`
#[derive(Debug, Clone, FromRow)]
pub struct Holding {
    pub client: String,
    pub branch_id: i32,
}

/// Clients holding accounts at every branch row of the group, sorted by name.
///
/// An empty branch group returns the empty set. The original query's
/// `count = 0` arithmetic would have let every grouped client through in
/// that case; here the degenerate case is guarded explicitly.
pub fn clients_covering_all(branch_ids: &[i32], holdings: &[Holding]) -> Vec<String> {
    if branch_ids.is_empty() {
        return Vec::new();
    }

    let required: HashSet<i32> = branch_ids.iter().copied().collect();

    let mut held: BTreeMap<&str, HashSet<i32>> = BTreeMap::new();
    for holding in holdings {
        if required.contains(&holding.branch_id) {
            held.entry(holding.client.as_str())
                .or_default()
                .insert(holding.branch_id);
        }
    }

    held.into_iter()
        .filter(|(_, branches)| branches.len() == required.len())
        .map(|(client, _)| client.to_string())
        .collect()
}
