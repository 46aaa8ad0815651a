//! Inner strategy contract used by the restart controller.
//!
//! A [`Strategy`] is one self-contained optimization run with a fixed
//! population size, step size and evaluation cap. The restart controller
//! treats it as a black box: it only ever creates one through a
//! [`StrategyFactory`], runs it to completion and reads back its
//! evaluation count. Any evolution strategy variant can be plugged in
//! this way without the controller knowing.

mod simple_es;

pub use simple_es::{SimpleEs, SimpleEsFactory};

use crate::types::ObjFn;
use ndarray::Array1;

/// A single bounded optimization run.
pub trait Strategy {
    /// Runs the strategy from `start` and returns the best point found.
    ///
    /// The returned point must have the same dimension as `start`. The
    /// evaluation cap given at creation is a soft bound: an implementation
    /// may overrun it by a small fixed margin but must report the true
    /// count through [`Strategy::evaluation_count`].
    fn optimize(&mut self, objective: &dyn ObjFn, start: &Array1<f64>) -> Array1<f64>;

    /// Number of objective evaluations consumed by [`Strategy::optimize`].
    fn evaluation_count(&self) -> usize;
}

/// Builds a fresh [`Strategy`] for each restart.
pub trait StrategyFactory {
    /// Creates a strategy run with the given tolerance, population size,
    /// step size and evaluation cap.
    fn create(
        &mut self,
        tolerance: f64,
        population_size: usize,
        step_size: f64,
        max_evals: usize,
    ) -> Box<dyn Strategy>;
}
