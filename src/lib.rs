//! This library implements the IPOP restart scheme for evolution
//! strategies: a black-box (derivative-free) minimizer that runs a
//! pluggable inner strategy over and over with an increasing population
//! size, a decaying step size and a per-restart evaluation budget, and
//! returns the best point observed under a global evaluation budget.
//!
//! The scheme follows Auger and Hansen, "A restart CMA evolution
//! strategy with increasing population size" (2005), with the
//! population size bound of Liao and Stuetzle (2013) and the restart
//! step size decay of Loshchilov, Schoenauer and Sebag (2012).
//!
//! The inner strategy is an exchangeable collaborator behind the
//! [`Strategy`]/[`StrategyFactory`] traits; any evolution strategy
//! variant honoring a population size, a step size and an evaluation
//! cap can be plugged in. A simple isotropic `(mu/mu, lambda)` strategy
//! ([`SimpleEs`]) ships as the default.
//!
//! # Examples
//!
//! ```
//! use ndarray::array;
//! use ipop_es::IpopBuilder;
//!
//! // Shifted sphere: min f(x) = 0 at x = (1, -2)
//! let f = |x: &[f64]| (x[0] - 1.0).powi(2) + (x[1] + 2.0).powi(2);
//!
//! let res = IpopBuilder::minimize(f)
//!     .configure(|config| config.max_evals(2000).seed(42))
//!     .run(&array![0.0, 0.0])
//!     .expect("shifted sphere minimized");
//! println!("min f(x) = {} at x = {}", res.y_opt, res.x_opt);
//! ```
//!
//! A custom inner strategy is supplied through
//! [`IpopBuilder::run_with`] or by building an [`IpopSolver`] directly
//! with any [`StrategyFactory`] implementation and, for reproducible
//! runs, an explicit random generator.

mod errors;
mod ipop;
mod solver;
pub mod strategy;
mod types;

pub use crate::errors::*;
pub use crate::ipop::*;
pub use crate::solver::*;
pub use crate::strategy::{SimpleEs, SimpleEsFactory, Strategy, StrategyFactory};
pub use crate::types::*;
