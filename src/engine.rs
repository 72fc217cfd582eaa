//! Generic row-barrier DP engine.
//!
//! The engine fills rows `1..=L` strictly in order. Row `l + 1` is computed
//! cell by cell from the completed, immutable row `l`; with the `parallel`
//! feature the cells of a row are evaluated on the rayon pool, and the row is
//! only published once every cell is done. No locking is needed because a
//! row is never read while it is being written.
//!
//! The engine is completely generic over implementations of [`LayeredProblem`].

use crate::tables::LayerTables;
use crate::traits::LayeredProblem;
use crate::utils::default_min_chunk;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Row-barrier DP engine for a given problem instance `P`.
///
/// Typical usage:
/// ```
/// use dispatch_dp::{dispatch::{DispatchProblem, Fleet, Unit}, LayerEngine};
///
/// let fleet = Fleet::new(vec![
///     Unit::new(0.0, 1.0, 0.0, 0, 5).unwrap(),
///     Unit::new(0.0, 3.0, 0.0, 0, 5).unwrap(),
/// ])
/// .unwrap();
/// let engine = LayerEngine::new(DispatchProblem::new(&fleet));
/// let tables = engine.run();
/// assert_eq!(tables.num_layers(), 2);
/// assert_eq!(tables.row(2).unwrap()[5], 5.0);
/// ```
pub struct LayerEngine<P: LayeredProblem> {
    problem: P,
    min_chunk: usize,
}

impl<P: LayeredProblem> LayerEngine<P> {
    /// Create a new engine with a heuristic parallel chunk size (≈ √width).
    pub fn new(problem: P) -> Self {
        let w = problem.width().max(1);
        let chunk = default_min_chunk(w).max(1);
        Self::with_min_chunk(problem, chunk)
    }

    /// Create a new engine with an explicit minimum number of cells per
    /// parallel work item. Ignored without the `parallel` feature.
    ///
    /// # Panics
    /// Panics if `min_chunk == 0`.
    pub fn with_min_chunk(problem: P, min_chunk: usize) -> Self {
        assert!(min_chunk > 0, "min_chunk must be positive");
        Self { problem, min_chunk }
    }

    /// Expose immutable reference to the underlying problem.
    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// Return the configured chunk size.
    pub fn min_chunk(&self) -> usize {
        self.min_chunk
    }
}

/// Drive the fill: seed row 0, then one `fill` call per layer.
///
/// # Panics
/// Panics if the problem's seed row or any produced row has the wrong width.
fn run_layers<P, F>(problem: &P, mut fill: F) -> LayerTables<P::Cost, P::Choice>
where
    P: LayeredProblem,
    F: FnMut(usize, &[P::Cost]) -> (Vec<P::Cost>, Vec<P::Choice>),
{
    let layers = problem.num_layers();
    let width = problem.width();
    let seed = problem.init_row();
    assert_eq!(seed.len(), width, "init_row must have width() cells");

    let mut tables = LayerTables::with_capacity(layers, seed);
    for layer in 0..layers {
        #[cfg(feature = "tracing")]
        let span = tracing::trace_span!("fill_layer", layer, width);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let (row, choices) = fill(layer, tables.last_row());
        assert_eq!(row.len(), width, "row {} has the wrong width", layer + 1);
        tables.push(row, choices);
    }
    tables
}

/// Same as [`run_layers`] but only the newest row is kept alive.
fn run_final<P, F>(problem: &P, mut fill: F) -> Vec<P::Cost>
where
    P: LayeredProblem,
    F: FnMut(usize, &[P::Cost]) -> (Vec<P::Cost>, Vec<P::Choice>),
{
    let mut row = problem.init_row();
    assert_eq!(row.len(), problem.width(), "init_row must have width() cells");
    for layer in 0..problem.num_layers() {
        row = fill(layer, &row).0;
    }
    row
}

#[cfg(feature = "parallel")]
fn fill_row<P>(
    problem: &P,
    layer: usize,
    prev: &[P::Cost],
    min_chunk: usize,
) -> (Vec<P::Cost>, Vec<P::Choice>)
where
    P: LayeredProblem + Sync,
    P::Cost: Send + Sync,
    P::Choice: Send,
{
    // Indexed collect keeps cell order, so the result matches the serial fill.
    let cells: Vec<(P::Cost, P::Choice)> = (0..problem.width())
        .into_par_iter()
        .with_min_len(min_chunk)
        .map(|x| problem.relax_cell(layer, prev, x))
        .collect();
    cells.into_iter().unzip()
}

#[cfg(not(feature = "parallel"))]
fn fill_row<P>(
    problem: &P,
    layer: usize,
    prev: &[P::Cost],
    _min_chunk: usize,
) -> (Vec<P::Cost>, Vec<P::Choice>)
where
    P: LayeredProblem,
{
    (0..problem.width())
        .map(|x| problem.relax_cell(layer, prev, x))
        .unzip()
}

#[cfg(feature = "parallel")]
impl<P> LayerEngine<P>
where
    P: LayeredProblem + Sync,
    P::Cost: Send + Sync,
    P::Choice: Send,
{
    /// Run the full fill, evaluating each row's cells on the rayon pool.
    ///
    /// Returns every row and every recorded choice. The output is identical
    /// to the serial build for deterministic problems.
    pub fn run(&self) -> LayerTables<P::Cost, P::Choice> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "layer_run",
            layers = self.problem.num_layers(),
            width = self.problem.width(),
            parallel = true
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        run_layers(&self.problem, |layer, prev| {
            fill_row(&self.problem, layer, prev, self.min_chunk)
        })
    }

    /// Run the fill keeping only two rows alive and return the final row.
    pub fn run_final_row(&self) -> Vec<P::Cost> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layer_run_final", layers = self.problem.num_layers());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        run_final(&self.problem, |layer, prev| {
            fill_row(&self.problem, layer, prev, self.min_chunk)
        })
    }
}

#[cfg(not(feature = "parallel"))]
impl<P: LayeredProblem> LayerEngine<P> {
    /// Run the full fill (serial execution).
    ///
    /// Returns every row and every recorded choice.
    ///
    /// # Panics
    /// Panics if the problem produces a row whose width differs from
    /// [`LayeredProblem::width`].
    pub fn run(&self) -> LayerTables<P::Cost, P::Choice> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!(
            "layer_run",
            layers = self.problem.num_layers(),
            width = self.problem.width(),
            parallel = false
        );
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        run_layers(&self.problem, |layer, prev| {
            fill_row(&self.problem, layer, prev, self.min_chunk)
        })
    }

    /// Run the fill keeping only two rows alive and return the final row.
    pub fn run_final_row(&self) -> Vec<P::Cost> {
        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("layer_run_final", layers = self.problem.num_layers());
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        run_final(&self.problem, |layer, prev| {
            fill_row(&self.problem, layer, prev, self.min_chunk)
        })
    }
}
