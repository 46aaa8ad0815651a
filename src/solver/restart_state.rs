//! Scratch state of the restart loop.
use ndarray::Array1;

/// Maintains the state from restart to restart of the
/// [crate::IpopSolver].
///
/// Owned exclusively by the controller for the duration of one
/// `minimize` call; created at entry, mutated once per restart,
/// discarded on return.
#[derive(Clone, Debug)]
pub(crate) struct RestartState {
    /// Current population size
    pub lambda: usize,
    /// Population size cap triggering the growth reset
    pub lambda_max: usize,
    /// Current step size
    pub sigma: f64,
    /// Cumulative objective evaluations over all restarts
    pub n_evals: usize,
    /// Number of completed restarts, the initial run included
    pub n_restarts: usize,
    /// Best point found so far
    pub x_best: Array1<f64>,
    /// Best value found so far
    pub f_best: f64,
    /// Best value preceding the last improvement; stagnation baseline.
    /// `None` until the first improving restart shifts it.
    pub f_prev: Option<f64>,
}

impl RestartState {
    /// Records an improving restart result, shifting the stagnation
    /// baseline to the superseded best. Non-improving results leave the
    /// state untouched.
    pub fn record(&mut self, x: Array1<f64>, fx: f64) {
        if fx < self.f_best {
            self.f_prev = Some(self.f_best);
            self.x_best = x;
            self.f_best = fx;
        }
    }
}
