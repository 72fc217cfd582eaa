//! Row storage produced by the engine.
//!
//! `LayerTables` holds every row `0..=L` of values and, for rows `1..=L`, the
//! choice recorded per cell. Values for row `l` live at `rows[l]`; the choices
//! that produced row `l` live at `choices[l - 1]`.

/// Completed value and choice rows of a layered DP.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerTables<C, D> {
    rows: Vec<Vec<C>>,
    choices: Vec<Vec<D>>,
}

impl<C, D> LayerTables<C, D> {
    pub(crate) fn with_capacity(layers: usize, first_row: Vec<C>) -> Self {
        let mut rows = Vec::with_capacity(layers + 1);
        rows.push(first_row);
        Self {
            rows,
            choices: Vec::with_capacity(layers),
        }
    }

    pub(crate) fn push(&mut self, row: Vec<C>, choices: Vec<D>) {
        debug_assert_eq!(row.len(), choices.len());
        self.rows.push(row);
        self.choices.push(choices);
    }

    /// The most recently completed row.
    pub(crate) fn last_row(&self) -> &[C] {
        self.rows.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of transitions stored (rows minus one).
    #[inline]
    pub fn num_layers(&self) -> usize {
        self.choices.len()
    }

    /// Cells per row.
    #[inline]
    pub fn width(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Row `layer` of values, `layer` in `0..=num_layers()`.
    #[inline]
    pub fn row(&self, layer: usize) -> Option<&[C]> {
        self.rows.get(layer).map(Vec::as_slice)
    }

    /// Choices that produced row `layer`, `layer` in `1..=num_layers()`.
    #[inline]
    pub fn choices(&self, layer: usize) -> Option<&[D]> {
        layer
            .checked_sub(1)
            .and_then(|l| self.choices.get(l))
            .map(Vec::as_slice)
    }
}
