use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum RiskBucket {
    #[serde(rename = "Low Risk")]
    LowRisk,
    #[serde(rename = "Moderately Low")]
    ModeratelyLow,
    #[serde(rename = "Moderate")]
    Moderate,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl RiskBucket {
    pub const ALL: [RiskBucket; 4] = [
        RiskBucket::LowRisk,
        RiskBucket::ModeratelyLow,
        RiskBucket::Moderate,
        RiskBucket::HighRisk,
    ];

    pub fn label(self) -> &'static str {
        match self {
            RiskBucket::LowRisk => "Low Risk",
            RiskBucket::ModeratelyLow => "Moderately Low",
            RiskBucket::Moderate => "Moderate",
            RiskBucket::HighRisk => "High Risk",
        }
    }
}

impl fmt::Display for RiskBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskBucket {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        RiskBucket::ALL
            .into_iter()
            .find(|b| b.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| EngineError::UnknownRiskBucket(s.to_string()))
    }
}

impl TryFrom<String> for RiskBucket {
    type Error = EngineError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Investor risk preference as chosen by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskPreference {
    #[serde(rename = "No Preference")]
    NoPreference,
    Low,
    Moderate,
    High,
}

impl RiskPreference {
    pub fn label(self) -> &'static str {
        match self {
            RiskPreference::NoPreference => "No Preference",
            RiskPreference::Low => "Low",
            RiskPreference::Moderate => "Moderate",
            RiskPreference::High => "High",
        }
    }

    /// Buckets a preference maps onto. `NoPreference` has no single bucket set:
    /// it selects across all groups instead of filtering.
    pub fn buckets(self) -> Option<&'static [RiskBucket]> {
        match self {
            RiskPreference::NoPreference => None,
            RiskPreference::Low => Some(&[RiskBucket::LowRisk, RiskBucket::ModeratelyLow]),
            RiskPreference::Moderate => Some(&[RiskBucket::Moderate]),
            RiskPreference::High => Some(&[RiskBucket::HighRisk]),
        }
    }
}

impl fmt::Display for RiskPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for RiskPreference {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        match normalized.as_str() {
            "no preference" => Ok(RiskPreference::NoPreference),
            "low" => Ok(RiskPreference::Low),
            "moderate" => Ok(RiskPreference::Moderate),
            "high" => Ok(RiskPreference::High),
            _ => Err(EngineError::UnknownRiskPreference(s.to_string())),
        }
    }
}

/// Which projection is treated as the headline figure of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvestmentMode {
    #[default]
    Sip,
    Lumpsum,
}

impl FromStr for InvestmentMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sip" => Ok(InvestmentMode::Sip),
            "lumpsum" | "lump_sum" | "lump-sum" => Ok(InvestmentMode::Lumpsum),
            _ => Err(EngineError::UnknownInvestmentMode(s.to_string())),
        }
    }
}

/// Raw fund record as loaded from the universe file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fund {
    #[serde(rename = "scheme_name")]
    pub name: String,
    pub risk_bucket: RiskBucket,
    pub returns_5yr: f64,
    pub sharpe: f64,
    pub standard_deviation: f64,
}

/// A fund with every derived field computed over the full universe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredFund {
    #[serde(flatten)]
    pub fund: Fund,
    pub z_returns_5yr: f64,
    pub z_sharpe: f64,
    /// Negated standard score of `standard_deviation`: lower volatility is higher.
    pub z_std_dev: f64,
    pub raw_score: f64,
    pub ranking_score: f64,
    pub confidence_percent: f64,
}

impl ScoredFund {
    pub fn name(&self) -> &str {
        &self.fund.name
    }

    pub fn risk_bucket(&self) -> RiskBucket {
        self.fund.risk_bucket
    }
}
