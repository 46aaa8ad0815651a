//! Ipop optimizer builder: the crate entry point tying together a
//! configuration, an inner strategy factory and a random stream.
//!
//! ```
//! use ndarray::array;
//! use ipop_es::IpopBuilder;
//!
//! // Sphere function: min f(x) = 0 at x = (0, 0)
//! let sphere = |x: &[f64]| x.iter().map(|&xi| xi * xi).sum::<f64>();
//!
//! let res = IpopBuilder::minimize(sphere)
//!     .configure(|config| config.max_evals(2000).seed(42))
//!     .run(&array![1.0, -1.5])
//!     .expect("sphere minimized");
//! println!("min f(x) = {} at x = {}", res.y_opt, res.x_opt);
//! ```
use ndarray::Array1;
use ndarray_rand::rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

use crate::errors::Result;
use crate::solver::{IpopSolver, RestartConfig};
use crate::strategy::{SimpleEsFactory, StrategyFactory};
use crate::types::{ObjFn, OptimResult};

/// Restart optimizer builder allowing to specify the function to be
/// minimized, the configuration and the inner strategy.
pub struct IpopBuilder<O: ObjFn> {
    objective: O,
    config: RestartConfig,
}

impl<O: ObjFn> IpopBuilder<O> {
    /// Function to be minimized, mapping a point of R^dim given as a
    /// slice to a scalar value.
    pub fn minimize(objective: O) -> Self {
        IpopBuilder {
            objective,
            config: RestartConfig::default(),
        }
    }

    /// Set configuration of the optimizer
    pub fn configure<C: FnOnce(RestartConfig) -> RestartConfig>(mut self, init: C) -> Self {
        self.config = init(self.config);
        self
    }

    /// Runs the restart loop from `guess` with the built-in
    /// [`crate::SimpleEs`] inner strategy.
    pub fn run(self, guess: &Array1<f64>) -> Result<OptimResult> {
        let rng = match self.config.seed {
            Some(seed) => Xoshiro256Plus::seed_from_u64(seed),
            None => Xoshiro256Plus::from_entropy(),
        };
        // separate stream for the inner runs
        let mut factory_rng = rng.clone();
        factory_rng.jump();
        let factory = SimpleEsFactory::new_with_rng(factory_rng);
        let mut solver = IpopSolver::new_with_rng(self.config, factory, rng)?;
        solver.minimize(&self.objective, guess)
    }

    /// Runs the restart loop from `guess` with a caller-supplied
    /// strategy factory.
    pub fn run_with<F: StrategyFactory>(self, factory: F, guess: &Array1<f64>) -> Result<OptimResult> {
        let mut solver = IpopSolver::new(self.config, factory)?;
        solver.minimize(&self.objective, guess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::Strategy;
    use crate::types::StopReason;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    /// Deterministic cyclic coordinate descent with step halving,
    /// standing in for a real evolution strategy.
    struct CoordinateDescent {
        step: f64,
        max_evals: usize,
        n_evals: usize,
    }

    impl Strategy for CoordinateDescent {
        fn optimize(&mut self, objective: &dyn ObjFn, start: &Array1<f64>) -> Array1<f64> {
            let mut x = start.to_owned();
            self.n_evals = 0;
            if self.max_evals == 0 {
                return x;
            }
            let mut fx = objective(&x.to_vec());
            self.n_evals += 1;
            let mut step = self.step;
            while self.n_evals + 2 * x.len() <= self.max_evals && step > 1e-12 {
                let mut improved = false;
                for i in 0..x.len() {
                    for delta in [step, -step] {
                        let mut trial = x.clone();
                        trial[i] += delta;
                        let ft = objective(&trial.to_vec());
                        self.n_evals += 1;
                        if ft < fx {
                            x = trial;
                            fx = ft;
                            improved = true;
                        }
                    }
                }
                if !improved {
                    step *= 0.5;
                }
            }
            x
        }

        fn evaluation_count(&self) -> usize {
            self.n_evals
        }
    }

    struct CoordinateDescentFactory;

    impl StrategyFactory for CoordinateDescentFactory {
        fn create(
            &mut self,
            _tolerance: f64,
            _population_size: usize,
            step_size: f64,
            max_evals: usize,
        ) -> Box<dyn Strategy> {
            Box::new(CoordinateDescent {
                step: step_size,
                max_evals,
                n_evals: 0,
            })
        }
    }

    fn shifted_sphere(x: &[f64]) -> f64 {
        (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2)
    }

    #[test]
    fn test_coordinate_descent_end_to_end() {
        let res = IpopBuilder::minimize(shifted_sphere)
            .configure(|config| config.max_evals(2000).seed(0))
            .run_with(CoordinateDescentFactory, &array![0., 0.])
            .unwrap();
        assert_abs_diff_eq!(res.x_opt, array![1.0, -2.0], epsilon = 1e-3);
        assert!(res.n_evals <= 2000 + 1);
    }

    #[test]
    fn test_simple_es_end_to_end() {
        let res = IpopBuilder::minimize(shifted_sphere)
            .configure(|config| config.max_evals(2000).seed(42))
            .run(&array![0., 0.])
            .unwrap();
        assert_abs_diff_eq!(res.x_opt, array![1.0, -2.0], epsilon = 1e-2);
    }

    #[test]
    fn test_builder_determinism() {
        let run = || {
            IpopBuilder::minimize(shifted_sphere)
                .configure(|config| config.max_evals(1000).seed(7))
                .run(&array![0., 0.])
                .unwrap()
        };
        let res1 = run();
        let res2 = run();
        assert_eq!(res1.x_opt, res2.x_opt);
        assert_eq!(res1.n_evals, res2.n_evals);
        assert_eq!(res1.stop_reason, res2.stop_reason);
    }

    #[test]
    fn test_never_worse_than_first_run() {
        // non-improving restarts must not displace the first result
        let res = IpopBuilder::minimize(shifted_sphere)
            .configure(|config| config.max_evals(2000).seed(3))
            .run_with(CoordinateDescentFactory, &array![0., 0.])
            .unwrap();
        // the first restart alone already solves this separable
        // quadratic; whatever later restarts do, the best is kept
        assert!(res.y_opt <= 1e-6);
        assert!(matches!(
            res.stop_reason,
            StopReason::EvaluationBudget | StopReason::Stagnation
        ));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let res = IpopBuilder::minimize(shifted_sphere)
            .configure(|config| config.max_evals(0))
            .run(&array![0., 0.]);
        assert!(res.is_err());
    }
}
