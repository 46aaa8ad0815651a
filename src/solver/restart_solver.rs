//! Restart controller running successive inner strategy runs with
//! increasing population size (IPOP) and decaying step size.
//!
//! Implements the restart scheme of Auger and Hansen (2005) with the
//! population size bound of Liao and Stuetzle (2013) and the step size
//! decay of Loshchilov et al. (2012). Each restart gets a population
//! size doubled from the previous one (reset to its initial value when
//! the bound is reached), a decayed step size, an evaluation budget
//! capped by what remains of the global budget, and a start point drawn
//! by Gaussian perturbation of the user guess. The search stops when
//! the global budget is exhausted or when successive restart values
//! stagnate.

use log::{debug, info};
use ndarray::Array1;
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256Plus;

use crate::errors::{IpopError, Result};
use crate::solver::restart_config::{PopulationLimit, RestartConfig, RELATIVE_EPS, SIGMA_FLOOR_RATIO};
use crate::solver::restart_state::RestartState;
use crate::strategy::StrategyFactory;
use crate::types::{ObjFn, OptimResult, StopReason};

/// Minimum population size for a search space of dimension `dim`
pub(crate) fn initial_lambda(dim: usize) -> usize {
    4 + (3.0 * (dim as f64).ln()).floor() as usize
}

/// Evaluation budget of one restart, capped by `remaining`.
///
/// The bracketed term is truncated before the multiplication by lambda,
/// matching the reference formulation.
pub(crate) fn restart_budget(dim: usize, lambda: usize, remaining: usize) -> usize {
    let d = dim as f64;
    let per_lambda = (100.0 + 50.0 * (d + 3.0) * (d + 3.0) / (lambda as f64).sqrt()) as usize;
    (per_lambda * lambda).min(remaining)
}

/// IPOP restart optimizer
///
/// Owns the strategy factory producing one inner run per restart and
/// the random generator used to perturb restart start points.
pub struct IpopSolver<F: StrategyFactory, R: Rng> {
    config: RestartConfig,
    factory: F,
    rng: R,
}

impl<F: StrategyFactory> IpopSolver<F, Xoshiro256Plus> {
    /// Builds a solver from a checked configuration, seeding the
    /// generator from the configuration when a seed is set.
    pub fn new(config: RestartConfig, factory: F) -> Result<Self> {
        let rng = match config.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };
        Self::new_with_rng(config, factory, rng)
    }
}

impl<F: StrategyFactory, R: Rng> IpopSolver<F, R> {
    pub fn new_with_rng(config: RestartConfig, factory: F, rng: R) -> Result<Self> {
        config.check()?;
        Ok(IpopSolver {
            config,
            factory,
            rng,
        })
    }

    /// Access to the strategy factory
    pub fn factory(&self) -> &F {
        &self.factory
    }

    /// Minimizes `objective` starting from `guess`.
    ///
    /// Returns the best point observed over all restarts together with
    /// the evaluation and restart counts and the reason the loop ended.
    pub fn minimize(&mut self, objective: &dyn ObjFn, guess: &Array1<f64>) -> Result<OptimResult> {
        let dim = guess.len();
        if dim == 0 {
            return Err(IpopError::InvalidValue(
                "initial guess should not be empty".to_string(),
            ));
        }
        let lambda0 = initial_lambda(dim);
        let lambda_max = match self.config.population_limit {
            PopulationLimit::Fixed(n) => n,
            PopulationLimit::Adaptive => 10 * dim * dim,
        };
        let sigma0 = self.config.sigma0;

        let mut state = RestartState {
            lambda: lambda0,
            lambda_max,
            sigma: sigma0,
            n_evals: 0,
            n_restarts: 0,
            x_best: guess.to_owned(),
            f_best: f64::INFINITY,
            f_prev: None,
        };

        // initial run on the unperturbed guess
        let budget = restart_budget(dim, state.lambda, self.config.max_evals);
        let (x, fx, used) = self.run_strategy(objective, guess, &state, budget, dim)?;
        state.n_evals += used + 1;
        state.n_restarts = 1;
        state.x_best = x;
        state.f_best = fx;
        info!(
            "restart {} evals {}/{} budget {} lambda {} sigma {:e} f {:e} best {:e}",
            state.n_restarts,
            state.n_evals,
            self.config.max_evals,
            budget,
            state.lambda,
            state.sigma,
            fx,
            state.f_best
        );

        let mut stop_reason = StopReason::EvaluationBudget;
        while state.n_evals < self.config.max_evals {
            // double the population size, reset to the minimum when the
            // bound is reached
            state.lambda <<= 1;
            if state.lambda >= state.lambda_max {
                state.lambda = lambda0;
            }

            // decay the step size, floored at a fraction of its initial value
            state.sigma = (state.sigma / self.config.sigma_decay).max(SIGMA_FLOOR_RATIO * sigma0);

            let remaining = self.config.max_evals - state.n_evals;
            let budget = restart_budget(dim, state.lambda, remaining);

            // perturb the original guess; the noise scale is the initial
            // step size, not the decayed one
            let x_start = Array1::from_shape_fn(dim, |i| {
                guess[i] + sigma0 * self.rng.sample::<f64, _>(StandardNormal)
            });

            let (x, fx, used) = self.run_strategy(objective, &x_start, &state, budget, dim)?;
            state.n_evals += used + 1;
            state.n_restarts += 1;
            state.record(x, fx);
            info!(
                "restart {} evals {}/{} budget {} lambda {} sigma {:e} f {:e} best {:e}",
                state.n_restarts,
                state.n_evals,
                self.config.max_evals,
                budget,
                state.lambda,
                state.sigma,
                fx,
                state.f_best
            );

            // stagnation: the restart value differs from the baseline by
            // less than the scale-relative tolerance. Identical values
            // skip the check, as does an unset baseline.
            if let Some(f_prev) = state.f_prev {
                if fx != f_prev {
                    let ftol = RELATIVE_EPS * 0.5 * (fx + f_prev).abs();
                    if (fx - f_prev).abs() <= self.config.tolerance + ftol {
                        debug!(
                            "stagnation: |{fx:e} - {f_prev:e}| within {:e}",
                            self.config.tolerance + ftol
                        );
                        stop_reason = StopReason::Stagnation;
                        break;
                    }
                }
            }
        }

        Ok(OptimResult {
            x_opt: state.x_best,
            y_opt: state.f_best,
            n_evals: state.n_evals,
            n_restarts: state.n_restarts,
            stop_reason,
        })
    }

    /// Runs one inner strategy and evaluates the objective on its
    /// returned point, checking the dimension contract.
    fn run_strategy(
        &mut self,
        objective: &dyn ObjFn,
        x_start: &Array1<f64>,
        state: &RestartState,
        budget: usize,
        dim: usize,
    ) -> Result<(Array1<f64>, f64, usize)> {
        let mut strategy = self.factory.create(
            self.config.inner_tolerance,
            state.lambda,
            state.sigma,
            budget,
        );
        let x = strategy.optimize(objective, x_start);
        if x.len() != dim {
            return Err(IpopError::StrategyContractError(format!(
                "strategy returned a point of dimension {}, expected {}",
                x.len(),
                dim
            )));
        }
        let fx = objective(&x.to_vec());
        Ok((x, fx, strategy.evaluation_count()))
    }
}
