//! Strike-zone grid addressing.
//!
//! The zone is a 5x5 grid. A cell is addressed either by a flat index in
//! `0..25` or by `(x, y)` coordinates with `index = y * 5 + x`.
//!
//! Writes are lenient: [`to_coordinates`] clamps any index into range.
//! Reads are strict: [`to_index`] refuses coordinates outside the grid, and
//! the aggregator drops those events from the histogram.

/// Cells per side of the grid.
pub const GRID_SIZE: i64 = 5;

/// Total number of cells, and the length of every zone histogram.
pub const ZONE_COUNT: usize = (GRID_SIZE * GRID_SIZE) as usize;

const MAX_INDEX: i64 = GRID_SIZE * GRID_SIZE - 1;

/// Converts a flat zone index to `(x, y)`, clamping the index into `0..=24`.
#[must_use]
pub fn to_coordinates(index: i64) -> (i64, i64) {
    let clamped = index.clamp(0, MAX_INDEX);
    (clamped % GRID_SIZE, clamped / GRID_SIZE)
}

/// Converts `(x, y)` to a flat zone index, or `None` if either coordinate is
/// off the grid.
#[must_use]
pub fn to_index(x: i64, y: i64) -> Option<usize> {
    if (0..GRID_SIZE).contains(&x) && (0..GRID_SIZE).contains(&y) {
        Some((y * GRID_SIZE + x) as usize)
    } else {
        None
    }
}
