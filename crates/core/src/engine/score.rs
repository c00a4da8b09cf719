use crate::domain::fund::{Fund, ScoredFund};
use crate::engine::normalize::standard_scores;
use crate::error::{EngineError, Result};
use serde::Serialize;
use std::collections::BTreeSet;

// Ranking weights: returns, sharpe, volatility.
pub const RANK_W_RETURNS: f64 = 0.5;
pub const RANK_W_SHARPE: f64 = 0.3;
pub const RANK_W_STD_DEV: f64 = 0.2;

// Confidence weights, mapped onto 0..=100 around 50.
pub const CONF_W_RETURNS: f64 = 0.45;
pub const CONF_W_SHARPE: f64 = 0.35;
pub const CONF_W_STD_DEV: f64 = 0.20;
const CONF_CENTER: f64 = 50.0;
const CONF_SCALE: f64 = 15.0;

/// The full fund universe with every derived field computed once.
///
/// Normalization always runs over every fund, never over a filtered subset,
/// so scores stay comparable across runs with different risk preferences.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredUniverse {
    funds: Vec<ScoredFund>,
}

impl ScoredUniverse {
    pub fn build(funds: Vec<Fund>) -> Result<Self> {
        validate_universe(&funds)?;

        let returns: Vec<f64> = funds.iter().map(|f| f.returns_5yr).collect();
        let sharpe: Vec<f64> = funds.iter().map(|f| f.sharpe).collect();
        let std_dev: Vec<f64> = funds.iter().map(|f| f.standard_deviation).collect();

        let z_returns = standard_scores("returns_5yr", &returns)?;
        let z_sharpe = standard_scores("sharpe", &sharpe)?;
        let z_std_dev: Vec<f64> = standard_scores("standard_deviation", &std_dev)?
            .into_iter()
            .map(|z| -z)
            .collect();

        let raw: Vec<f64> = (0..funds.len())
            .map(|i| raw_score(z_returns[i], z_sharpe[i], z_std_dev[i]))
            .collect();
        let ranking = standard_scores("raw_score", &raw)?;

        let funds: Vec<ScoredFund> = funds
            .into_iter()
            .enumerate()
            .map(|(i, fund)| ScoredFund {
                fund,
                z_returns_5yr: z_returns[i],
                z_sharpe: z_sharpe[i],
                z_std_dev: z_std_dev[i],
                raw_score: raw[i],
                ranking_score: ranking[i],
                confidence_percent: confidence_score(z_returns[i], z_sharpe[i], z_std_dev[i]),
            })
            .collect();

        tracing::debug!(funds_len = funds.len(), "scored fund universe");
        Ok(Self { funds })
    }

    /// Funds in their original universe order.
    pub fn funds(&self) -> &[ScoredFund] {
        &self.funds
    }

    pub fn len(&self) -> usize {
        self.funds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.funds.is_empty()
    }
}

pub fn raw_score(z_returns_5yr: f64, z_sharpe: f64, z_std_dev: f64) -> f64 {
    RANK_W_RETURNS * z_returns_5yr + RANK_W_SHARPE * z_sharpe + RANK_W_STD_DEV * z_std_dev
}

/// Absolute confidence in `[0, 100]`, rounded to two decimals. Independent of
/// the ranking score.
pub fn confidence_score(z_returns_5yr: f64, z_sharpe: f64, z_std_dev: f64) -> f64 {
    let composite =
        CONF_W_RETURNS * z_returns_5yr + CONF_W_SHARPE * z_sharpe + CONF_W_STD_DEV * z_std_dev;
    let clamped = (CONF_CENTER + CONF_SCALE * composite).clamp(0.0, 100.0);
    (clamped * 100.0).round() / 100.0
}

fn validate_universe(funds: &[Fund]) -> Result<()> {
    if funds.is_empty() {
        return Err(EngineError::EmptyUniverse);
    }

    let mut seen = BTreeSet::<&str>::new();
    for f in funds {
        let invalid = |detail: &str| EngineError::InvalidFund {
            name: f.name.clone(),
            detail: detail.to_string(),
        };

        if f.name.trim().is_empty() {
            return Err(invalid("name must be non-empty"));
        }
        if !seen.insert(f.name.as_str()) {
            return Err(invalid("duplicate fund name"));
        }
        if !(f.returns_5yr.is_finite() && f.sharpe.is_finite() && f.standard_deviation.is_finite())
        {
            return Err(invalid("metrics must be finite"));
        }
        if f.standard_deviation < 0.0 {
            return Err(invalid("standard_deviation must be >= 0"));
        }
    }

    Ok(())
}
