use ndarray::Array1;
use serde::{Deserialize, Serialize};

/// An interface for the objective function to be minimized.
///
/// The function maps a point of the search space (given as a slice of
/// length `dim`) to a scalar value. It is expected to be deterministic
/// for a given input; it may be arbitrarily expensive, which is why the
/// optimizer is driven by an evaluation budget rather than wall time.
pub trait ObjFn: Fn(&[f64]) -> f64 {}
impl<T> ObjFn for T where T: Fn(&[f64]) -> f64 {}

/// Why the restart loop stopped
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum StopReason {
    /// The global evaluation budget is exhausted
    EvaluationBudget,
    /// Successive restart values got closer than the stagnation tolerance
    Stagnation,
}

/// Optimization result
#[derive(Clone, Debug)]
pub struct OptimResult {
    /// Optimum x value
    pub x_opt: Array1<f64>,
    /// Optimum y value (e.g. f(x_opt))
    pub y_opt: f64,
    /// Total number of objective evaluations over all restarts
    pub n_evals: usize,
    /// Number of inner strategy runs, the initial one included
    pub n_restarts: usize,
    /// Why the search stopped
    pub stop_reason: StopReason,
}
