use crate::domain::fund::{InvestmentMode, RiskPreference, ScoredFund};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Validated parameters of a single recommendation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunParams {
    pub risk: RiskPreference,
    pub mode: InvestmentMode,
    /// Monthly contribution for SIP projections.
    pub amount: f64,
    pub years: u32,
    pub compare: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendationSnapshot {
    pub id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub params: RunParams,
    pub caption: String,
    pub items: Vec<Recommendation>,
    pub summary: Option<RunSummary>,
    pub comparison: Option<Vec<ComparisonRow>>,
    pub risk_return: Vec<RiskReturnPoint>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recommendation {
    /// Dense, 1-based, by descending ranking score.
    pub rank: u32,
    pub fund: ScoredFund,
    pub confidence_percent: f64,
    pub projected_sip_value: f64,
    pub projected_lumpsum_value: f64,
    pub rationale: String,
}

impl Recommendation {
    pub fn headline_value(&self, mode: InvestmentMode) -> f64 {
        match mode {
            InvestmentMode::Sip => self.projected_sip_value,
            InvestmentMode::Lumpsum => self.projected_lumpsum_value,
        }
    }
}

/// Headline figures for the top-ranked fund of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunSummary {
    pub top_fund: String,
    pub projected_value: f64,
    pub projected_value_display: String,
    pub confidence_percent: f64,
}

/// Side-by-side SIP vs lump-sum corpus, both in lakhs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonRow {
    pub fund: String,
    pub sip_lakhs: f64,
    pub lumpsum_lakhs: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReturnPoint {
    pub fund: String,
    pub standard_deviation: f64,
    pub returns_5yr: f64,
    pub confidence_percent: f64,
}
