use thiserror::Error;

pub type Result<T> = std::result::Result<T, EngineError>;

/// Errors raised by the scoring and selection engine.
///
/// None of these are retried: every computation is deterministic, so a failure
/// for the same inputs will fail the same way again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    /// A metric column has zero variance across the universe, so its standard
    /// score is undefined.
    #[error("degenerate universe: column `{column}` has zero variance")]
    DegenerateUniverse { column: &'static str },

    #[error("fund universe is empty")]
    EmptyUniverse,

    #[error("invalid fund `{name}`: {detail}")]
    InvalidFund { name: String, detail: String },

    #[error("unknown risk preference: {0:?}")]
    UnknownRiskPreference(String),

    #[error("unknown risk bucket: {0:?}")]
    UnknownRiskBucket(String),

    #[error("unknown investment mode: {0:?}")]
    UnknownInvestmentMode(String),

    #[error("invalid run request: {0}")]
    InvalidRequest(String),

    /// A projection overflowed `f64` for the given amount and horizon.
    #[error("projection for fund `{fund}` is not a finite value")]
    NonFiniteProjection { fund: String },
}
