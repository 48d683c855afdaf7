use std::collections::BTreeMap;

use serde::Serialize;

use super::scope::ScopeFilter;
use super::zone::{ZONE_COUNT, to_index};

/// Pitch count for one `(x, y)` pair, as grouped by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneRow {
    pub x: i64,
    pub y: i64,
    pub count: i64,
}

/// Pitch count for one result id. `name` is `None` when the id has no row in
/// the result lookup table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub result_id: i64,
    pub name: Option<String>,
    pub count: i64,
}

/// Count and average velocity for one pitcher. Names are `None` when the
/// pitcher row is missing.
#[derive(Debug, Clone, PartialEq)]
pub struct PitcherRow {
    pub pitcher_id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total: i64,
    pub avg_velocity: Option<f64>,
}

/// Grouped rows for one scope, before folding into [`PitchStats`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScopeAggregates {
    pub total: i64,
    pub avg_velocity: Option<f64>,
    pub zones: Vec<ZoneRow>,
    pub results: Vec<ResultRow>,
    /// Only filled in for team scopes.
    pub pitchers: Vec<PitcherRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitcherRollup {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub total: i64,
    pub avg_vel: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PitchStats {
    pub total: i64,
    pub avg_vel: Option<f64>,
    pub zone_counts: [i64; ZONE_COUNT],
    #[serde(rename = "byResultado")]
    pub by_result: BTreeMap<String, i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitchers: Option<Vec<PitcherRollup>>,
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

/// Folds grouped rows into the response shape.
///
/// Zone rows with off-grid coordinates are dropped from the histogram; they
/// still count towards `total`. Result ids without a name are keyed by the
/// id itself.
#[must_use]
pub fn fold(aggregates: ScopeAggregates, filter: ScopeFilter) -> PitchStats {
    let mut zone_counts = [0i64; ZONE_COUNT];
    for row in &aggregates.zones {
        if let Some(index) = to_index(row.x, row.y) {
            zone_counts[index] += row.count;
        }
    }

    let mut by_result = BTreeMap::new();
    for row in aggregates.results {
        let key = row.name.unwrap_or_else(|| row.result_id.to_string());
        *by_result.entry(key).or_insert(0) += row.count;
    }

    let pitchers = match filter {
        ScopeFilter::Team(_) => Some(
            aggregates
                .pitchers
                .into_iter()
                .filter(|p| p.total > 0)
                .map(|p| PitcherRollup {
                    id: p.pitcher_id,
                    first_name: p.first_name,
                    last_name: p.last_name,
                    total: p.total,
                    avg_vel: finite(p.avg_velocity),
                })
                .collect(),
        ),
        ScopeFilter::Pitcher(_) => None,
    };

    PitchStats {
        total: aggregates.total,
        avg_vel: finite(aggregates.avg_velocity),
        zone_counts,
        by_result,
        pitchers,
    }
}
