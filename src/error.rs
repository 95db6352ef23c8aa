// src/error.rs

use thiserror::Error;

/// A malformed or inconsistent scenario, detected before any simulation runs.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("demand distribution is empty")]
    EmptyDistribution,

    #[error("demand distribution entry {index} is {value}, outside [0, 1]")]
    ProbabilityOutOfRange { index: usize, value: f64 },

    #[error("demand distribution decreases at entry {index} ({value} < {previous})")]
    NonMonotonicDistribution {
        index: usize,
        previous: f64,
        value: f64,
    },

    #[error("demand distribution ends at {last}, expected 1.0")]
    DistributionDoesNotReachOne { last: f64 },

    #[error("horizon must be a finite, nonnegative number of months, got {0}")]
    InvalidHorizon(f64),

    #[error("mean inter-demand time must be positive, got {0}")]
    NonPositiveMeanInterdemand(f64),

    #[error("{field} must be nonnegative, got {value}")]
    NegativeCost { field: &'static str, value: f64 },

    #[error("invalid delivery lag range [{min}, {max}]")]
    InvalidLagRange { min: f64, max: f64 },

    #[error("policy batch is empty")]
    EmptyPolicyBatch,

    #[error("policy #{index} ({s}, {big_s}): order-up-to level is below the reorder point")]
    InvalidPolicy { index: usize, s: i64, big_s: i64 },
}

/// Failure to ingest a scenario file or to write results.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("line {line}: expected {expected}")]
    MissingLine { line: usize, expected: &'static str },

    #[error("line {line}: cannot parse {field} from '{token}'")]
    BadToken {
        line: usize,
        field: &'static str,
        token: String,
    },

    #[error("line {line}: expected {expected} values, found {found}")]
    WrongArity {
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("invalid scenario: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),
}
