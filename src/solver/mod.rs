mod restart_config;
mod restart_state;
mod restart_solver;

pub use restart_config::{PopulationLimit, RestartConfig, DEFAULT_SIGMA_DECAY, RELATIVE_EPS};
pub use restart_solver::IpopSolver;
