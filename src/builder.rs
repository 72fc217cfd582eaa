use crate::utils::default_min_chunk;
use crate::{LayerEngine, LayeredProblem};

/// Builder for [`LayerEngine`] with optional tuning knobs.
pub struct LayerEngineBuilder<P: LayeredProblem> {
    problem: P,
    min_chunk: Option<usize>,
}

impl<P: LayeredProblem> LayerEngineBuilder<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            min_chunk: None,
        }
    }
    pub fn with_min_chunk(mut self, min_chunk: usize) -> Self {
        self.min_chunk = Some(min_chunk);
        self
    }
    pub fn build(self) -> LayerEngine<P> {
        match self.min_chunk {
            Some(c) => LayerEngine::with_min_chunk(self.problem, c),
            None => {
                let w = self.problem.width().max(1);
                let c = default_min_chunk(w).max(1);
                LayerEngine::with_min_chunk(self.problem, c)
            }
        }
    }
}
