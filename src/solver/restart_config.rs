//! Restart controller configuration.
use crate::errors::{IpopError, Result};
use serde::{Deserialize, Serialize};

/// Default divisor applied to the step size at each restart,
/// after Loshchilov et al. (2012).
pub const DEFAULT_SIGMA_DECAY: f64 = 1.6;

/// Relative tolerance scale used by the stagnation check, on the order
/// of ten ulps of 1.0.
pub const RELATIVE_EPS: f64 = 2e-15;

/// Floor on the step size, as a fraction of the initial step size.
pub(crate) const SIGMA_FLOOR_RATIO: f64 = 0.01;

/// Cap on the population size growth
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopulationLimit {
    /// Fixed cap given by the caller
    Fixed(usize),
    /// `10 * dim * dim`, the bound of Liao and Stuetzle (2013)
    Adaptive,
}

/// Restart controller configuration
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RestartConfig {
    /// Absolute tolerance of the stagnation stopping criterion
    pub(crate) tolerance: f64,
    /// Tolerance forwarded verbatim to each inner strategy
    pub(crate) inner_tolerance: f64,
    /// Initial step size; also scales the Gaussian perturbation of
    /// restart start points
    pub(crate) sigma0: f64,
    /// Hard cap on total objective evaluations across all restarts
    pub(crate) max_evals: usize,
    /// Cap on population size growth; growth resets when reached
    pub(crate) population_limit: PopulationLimit,
    /// Divisor applied to the step size at each restart
    pub(crate) sigma_decay: f64,
    /// A random generator seed used to get reproductible results
    pub(crate) seed: Option<u64>,
}

impl Default for RestartConfig {
    fn default() -> Self {
        RestartConfig {
            tolerance: 1e-6,
            inner_tolerance: 1e-9,
            sigma0: 1.0,
            max_evals: 100_000,
            population_limit: PopulationLimit::Adaptive,
            sigma_decay: DEFAULT_SIGMA_DECAY,
            seed: None,
        }
    }
}

impl RestartConfig {
    /// Sets the absolute tolerance used by the stagnation stopping criterion
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the tolerance forwarded to each inner strategy
    pub fn inner_tolerance(mut self, inner_tolerance: f64) -> Self {
        self.inner_tolerance = inner_tolerance;
        self
    }

    /// Sets the initial step size
    pub fn initial_step_size(mut self, sigma0: f64) -> Self {
        self.sigma0 = sigma0;
        self
    }

    /// Sets the global evaluation budget
    pub fn max_evals(mut self, max_evals: usize) -> Self {
        self.max_evals = max_evals;
        self
    }

    /// Sets the population size cap
    pub fn population_limit(mut self, population_limit: PopulationLimit) -> Self {
        self.population_limit = population_limit;
        self
    }

    /// Sets the step size decay factor
    pub fn sigma_decay(mut self, sigma_decay: f64) -> Self {
        self.sigma_decay = sigma_decay;
        self
    }

    /// Allow to specify a seed for random number generator to allow
    /// reproducible runs.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Rejects ill-formed settings before any budget is spent
    pub(crate) fn check(&self) -> Result<()> {
        if self.tolerance <= 0. {
            return Err(IpopError::InvalidConfigError(format!(
                "tolerance should be positive, got {}",
                self.tolerance
            )));
        }
        if self.inner_tolerance <= 0. {
            return Err(IpopError::InvalidConfigError(format!(
                "inner tolerance should be positive, got {}",
                self.inner_tolerance
            )));
        }
        if self.sigma0 <= 0. {
            return Err(IpopError::InvalidConfigError(format!(
                "initial step size should be positive, got {}",
                self.sigma0
            )));
        }
        if self.max_evals == 0 {
            return Err(IpopError::InvalidConfigError(
                "evaluation budget should be positive".to_string(),
            ));
        }
        if self.sigma_decay <= 1. {
            return Err(IpopError::InvalidConfigError(format!(
                "step size decay factor should be greater than 1, got {}",
                self.sigma_decay
            )));
        }
        if let PopulationLimit::Fixed(0) = self.population_limit {
            return Err(IpopError::InvalidConfigError(
                "population size limit should be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(RestartConfig::default().check().is_ok());
    }

    #[test]
    fn test_rejects_bad_settings() {
        assert!(RestartConfig::default().tolerance(0.).check().is_err());
        assert!(RestartConfig::default()
            .inner_tolerance(-1.)
            .check()
            .is_err());
        assert!(RestartConfig::default()
            .initial_step_size(0.)
            .check()
            .is_err());
        assert!(RestartConfig::default().max_evals(0).check().is_err());
        assert!(RestartConfig::default().sigma_decay(1.).check().is_err());
        assert!(RestartConfig::default()
            .population_limit(PopulationLimit::Fixed(0))
            .check()
            .is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = RestartConfig::default()
            .max_evals(5000)
            .population_limit(PopulationLimit::Fixed(64))
            .seed(42);
        let json = serde_json::to_string(&config).unwrap();
        let back: RestartConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.max_evals, 5000);
        assert_eq!(back.population_limit, PopulationLimit::Fixed(64));
        assert_eq!(back.seed, Some(42));
    }
}
