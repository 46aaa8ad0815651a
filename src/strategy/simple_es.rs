//! A simple isotropic (mu/mu, lambda) evolution strategy.
//!
//! Ships as the default inner strategy: each generation samples `lambda`
//! Gaussian candidates around a recombined mean, ranks them and averages
//! the best `mu = lambda/2` into the next mean. The step size follows a
//! success rule. No covariance adaptation.

use ndarray::Array1;
use ndarray_rand::rand::{Rng, SeedableRng};
use ndarray_rand::rand_distr::StandardNormal;
use rand_xoshiro::Xoshiro256Plus;

use super::{Strategy, StrategyFactory};
use crate::types::ObjFn;

const SIGMA_GROW: f64 = 1.1;
const SIGMA_SHRINK: f64 = 0.75;

/// One bounded (mu/mu, lambda)-ES run
pub struct SimpleEs<R: Rng> {
    tolerance: f64,
    lambda: usize,
    sigma0: f64,
    max_evals: usize,
    n_evals: usize,
    rng: R,
}

impl<R: Rng> SimpleEs<R> {
    pub fn new_with_rng(
        tolerance: f64,
        population_size: usize,
        step_size: f64,
        max_evals: usize,
        rng: R,
    ) -> Self {
        SimpleEs {
            tolerance,
            lambda: population_size.max(1),
            sigma0: step_size,
            max_evals,
            n_evals: 0,
            rng,
        }
    }
}

impl<R: Rng> Strategy for SimpleEs<R> {
    fn optimize(&mut self, objective: &dyn ObjFn, start: &Array1<f64>) -> Array1<f64> {
        self.n_evals = 0;
        if self.max_evals == 0 {
            return start.to_owned();
        }

        let dim = start.len();
        let mu = (self.lambda / 2).max(1);
        let mut mean = start.to_owned();
        let mut sigma = self.sigma0;

        let mut x_best = mean.clone();
        let mut f_best = objective(&mean.to_vec());
        self.n_evals += 1;
        let mut prev_gen_best = f_best;

        // never start a generation the budget cannot pay for
        while self.n_evals + self.lambda <= self.max_evals {
            let mut generation: Vec<(f64, Array1<f64>)> = (0..self.lambda)
                .map(|_| {
                    let x = Array1::from_shape_fn(dim, |i| {
                        mean[i] + sigma * self.rng.sample::<f64, _>(StandardNormal)
                    });
                    let fx = objective(&x.to_vec());
                    (fx, x)
                })
                .collect();
            self.n_evals += self.lambda;
            generation.sort_by(|a, b| {
                a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal)
            });

            let gen_best = generation[0].0;
            if gen_best < f_best {
                f_best = gen_best;
                x_best = generation[0].1.clone();
            }

            // recombine the mu best into the next mean
            let mut next_mean = Array1::zeros(dim);
            for (_, x) in generation.iter().take(mu) {
                next_mean += x;
            }
            mean = next_mean / mu as f64;

            if gen_best < prev_gen_best {
                sigma *= SIGMA_GROW;
            } else {
                sigma *= SIGMA_SHRINK;
            }
            prev_gen_best = gen_best;

            let spread = generation[generation.len() - 1].0 - gen_best;
            if spread.abs() < self.tolerance {
                break;
            }
            if sigma <= f64::EPSILON * self.sigma0 {
                break;
            }
        }

        x_best
    }

    fn evaluation_count(&self) -> usize {
        self.n_evals
    }
}

/// Factory producing a fresh [`SimpleEs`] run per restart, each with its
/// own random stream derived from the factory generator.
pub struct SimpleEsFactory<R: Rng> {
    rng: R,
}

impl SimpleEsFactory<Xoshiro256Plus> {
    pub fn new() -> Self {
        Self::new_with_rng(Xoshiro256Plus::from_entropy())
    }

    pub fn from_seed(seed: u64) -> Self {
        Self::new_with_rng(Xoshiro256Plus::seed_from_u64(seed))
    }
}

impl Default for SimpleEsFactory<Xoshiro256Plus> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> SimpleEsFactory<R> {
    pub fn new_with_rng(rng: R) -> Self {
        SimpleEsFactory { rng }
    }
}

impl<R: Rng> StrategyFactory for SimpleEsFactory<R> {
    fn create(
        &mut self,
        tolerance: f64,
        population_size: usize,
        step_size: f64,
        max_evals: usize,
    ) -> Box<dyn Strategy> {
        let rng = Xoshiro256Plus::seed_from_u64(self.rng.gen());
        Box::new(SimpleEs::new_with_rng(
            tolerance,
            population_size,
            step_size,
            max_evals,
            rng,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;

    fn sphere(x: &[f64]) -> f64 {
        x.iter().map(|&xi| xi * xi).sum()
    }

    #[test]
    fn test_simple_es_sphere() {
        let rng = Xoshiro256Plus::seed_from_u64(42);
        let mut es = SimpleEs::new_with_rng(1e-12, 12, 0.5, 5000, rng);
        let x = es.optimize(&sphere, &array![1.0, -1.5]);
        assert_abs_diff_eq!(x, array![0., 0.], epsilon = 1e-2);
        assert!(es.evaluation_count() <= 5000);
    }

    #[test]
    fn test_simple_es_keeps_dimension() {
        let rng = Xoshiro256Plus::seed_from_u64(0);
        let mut es = SimpleEs::new_with_rng(1e-9, 8, 1.0, 200, rng);
        let x = es.optimize(&sphere, &array![0., 0., 0., 0.]);
        assert_eq!(x.len(), 4);
    }

    #[test]
    fn test_simple_es_zero_budget_returns_start() {
        let rng = Xoshiro256Plus::seed_from_u64(0);
        let mut es = SimpleEs::new_with_rng(1e-9, 8, 1.0, 0, rng);
        let start = array![3., -4.];
        let x = es.optimize(&sphere, &start);
        assert_eq!(x, start);
        assert_eq!(es.evaluation_count(), 0);
    }
}
