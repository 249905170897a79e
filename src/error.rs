use thiserror::Error;

use crate::models::Time;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    #[error("teller {0} has no customer to dequeue")]
    EmptyQueue(usize),
    #[error("event queue exhausted at time {0}")]
    QueueExhausted(Time),
    #[error("time overflow adding {1} to {0}")]
    TimeOverflow(Time, Time),
    #[error("missing required option '{0}'")]
    MissingOption(&'static str),
    #[error("{0}")]
    ConfigIo(String),
    #[error("{0}")]
    ConfigParse(String),
    #[error("unsupported config format '{0}'")]
    UnsupportedConfigFormat(String),
    #[error("{0}")]
    Cli(String),
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to format output")]
    Format(#[from] std::fmt::Error),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("tellers must be greater than 0")]
    TellersZero,
    #[error("{0} variance must not be negative (got {1})")]
    NegativeVariance(&'static str, Time),
    #[error("{0} mean must be greater than 0 (got {1})")]
    NonPositiveMean(&'static str, Time),
    #[error("{0} mean {1} is smaller than its variance {2}")]
    MeanBelowVariance(&'static str, Time, Time),
    #[error("{0} mean {1} plus variance {2} overflows the time range")]
    DurationOverflow(&'static str, Time, Time),
    #[error("snapshot period must be greater than 0 (got {0})")]
    NonPositiveSnapshotPeriod(Time),
    #[error("time limit must not be negative (got {0})")]
    NegativeTimeLimit(Time),
}

pub type Result<T> = std::result::Result<T, Error>;
