use crate::domain::fund::ScoredFund;

const STRONG_RETURNS_Z: f64 = 0.75;
const GOOD_SHARPE_Z: f64 = 0.5;

/// Normalized metrics of a single fund; the only input rationale text depends on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedMetrics {
    pub z_returns_5yr: f64,
    pub z_sharpe: f64,
    pub z_std_dev: f64,
}

impl From<&ScoredFund> for NormalizedMetrics {
    fn from(f: &ScoredFund) -> Self {
        Self {
            z_returns_5yr: f.z_returns_5yr,
            z_sharpe: f.z_sharpe,
            z_std_dev: f.z_std_dev,
        }
    }
}

/// Clauses in fixed order: returns, risk-adjusted (omitted when `z_sharpe <= 0`),
/// volatility.
pub fn rationale_clauses(m: NormalizedMetrics) -> Vec<&'static str> {
    let mut clauses = Vec::with_capacity(3);

    clauses.push(if m.z_returns_5yr > STRONG_RETURNS_Z {
        "Strong long-term returns"
    } else if m.z_returns_5yr > 0.0 {
        "Above-average returns"
    } else {
        "Moderate returns"
    });

    if m.z_sharpe > GOOD_SHARPE_Z {
        clauses.push("Good risk-adjusted performance");
    } else if m.z_sharpe > 0.0 {
        clauses.push("Acceptable risk-adjusted performance");
    }

    clauses.push(if m.z_std_dev < 0.0 {
        "Higher volatility expected"
    } else {
        "Relatively stable volatility"
    });

    clauses
}

pub fn rationale(m: NormalizedMetrics) -> String {
    rationale_clauses(m).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(z_returns_5yr: f64, z_sharpe: f64, z_std_dev: f64) -> NormalizedMetrics {
        NormalizedMetrics {
            z_returns_5yr,
            z_sharpe,
            z_std_dev,
        }
    }

    #[test]
    fn strong_fund() {
        assert_eq!(
            rationale(m(1.2, 0.8, 0.3)),
            "Strong long-term returns, Good risk-adjusted performance, Relatively stable volatility"
        );
    }

    #[test]
    fn thresholds_are_strict() {
        // Exactly 0.75 / 0.5 fall into the lower tier.
        assert_eq!(
            rationale(m(0.75, 0.5, 0.0)),
            "Above-average returns, Acceptable risk-adjusted performance, Relatively stable volatility"
        );
    }

    #[test]
    fn sharpe_clause_omitted_when_not_positive() {
        assert_eq!(
            rationale(m(-0.3, 0.0, -0.1)),
            "Moderate returns, Higher volatility expected"
        );
        assert_eq!(rationale_clauses(m(0.1, -2.0, 1.0)).len(), 2);
    }
}
