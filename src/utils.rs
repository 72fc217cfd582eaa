//! Assorted utilities and helpers.

/// Compute an integer square-root-style chunk size for rows of `width` cells.
///
/// This is the heuristic used by [`crate::engine::LayerEngine::new`] to pick
/// how many adjacent cells a single rayon task evaluates.
#[inline]
pub fn default_min_chunk(width: usize) -> usize {
    if width <= 1 {
        1
    } else {
        (width as f64).sqrt().ceil() as usize
    }
}

/// Whether a table value denotes a reachable state.
#[inline]
pub fn is_reachable(cost: f64) -> bool {
    cost.is_finite()
}
