//! Pitch statistics for a pitcher or a whole team.
//!
//! The store does the grouping (counts, averages, joins against the lookup
//! and pitcher tables); this module turns the grouped rows into the response
//! shape. Ownership is not checked here: callers must present an
//! [`AuthorizedScope`], which is only built from records the requester owns.

mod aggregate;
mod scope;
pub mod zone;

pub use aggregate::{
    PitchStats, PitcherRollup, PitcherRow, ResultRow, ScopeAggregates, ZoneRow, fold,
};
pub use scope::{AuthorizedScope, ScopeFilter};

use crate::error::Result;
use crate::store::Store;

/// Computes totals, average velocity, the zone histogram, result counts and,
/// for team scopes, the per-pitcher rollup.
pub fn compute_stats(store: &dyn Store, scope: &AuthorizedScope) -> Result<PitchStats> {
    let filter = scope.filter();
    let aggregates = store.pitch_aggregates(filter)?;

    tracing::debug!(
        ?filter,
        total = aggregates.total,
        "aggregated pitch stats"
    );

    Ok(fold(aggregates, filter))
}
