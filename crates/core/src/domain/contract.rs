use crate::domain::fund::{InvestmentMode, RiskPreference};
use crate::domain::recommendation::RunParams;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};

pub const MIN_AMOUNT: f64 = 1000.0;
pub const MAX_AMOUNT: f64 = 1e12;
pub const MIN_YEARS: u32 = 1;
pub const MAX_YEARS: u32 = 30;

/// Unvalidated run input as it arrives from a CLI flag set or a query string.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRequest {
    pub risk: String,
    pub mode: String,
    pub amount: f64,
    pub years: u32,
    pub compare: bool,
}

impl Default for RunRequest {
    fn default() -> Self {
        Self {
            risk: RiskPreference::NoPreference.label().to_string(),
            mode: "sip".to_string(),
            amount: 5000.0,
            years: 10,
            compare: false,
        }
    }
}

impl RunRequest {
    pub fn validate_and_into_params(self) -> Result<RunParams, EngineError> {
        let risk = self.risk.parse::<RiskPreference>()?;
        let mode = self.mode.parse::<InvestmentMode>()?;

        if !(MIN_AMOUNT..=MAX_AMOUNT).contains(&self.amount) {
            return Err(EngineError::InvalidRequest(format!(
                "amount must be {MIN_AMOUNT}..={MAX_AMOUNT} (got {})",
                self.amount
            )));
        }

        if !(MIN_YEARS..=MAX_YEARS).contains(&self.years) {
            return Err(EngineError::InvalidRequest(format!(
                "years must be {MIN_YEARS}..={MAX_YEARS} (got {})",
                self.years
            )));
        }

        Ok(RunParams {
            risk,
            mode,
            amount: self.amount,
            years: self.years,
            compare: self.compare,
        })
    }
}
