use thiserror::Error;

/// A result type for restart optimizer errors
pub type Result<T> = std::result::Result<T, IpopError>;

/// An error raised by the restarted evolution strategy optimizer
#[derive(Error, Debug)]
pub enum IpopError {
    /// When configuration is invalid
    #[error("Invalid configuration: {0}")]
    InvalidConfigError(String),
    /// When an inner strategy breaks its contract
    #[error("Strategy contract violation: {0}")]
    StrategyContractError(String),
    /// When an invalid value is encountered
    #[error("Value error: {0}")]
    InvalidValue(String),
}
