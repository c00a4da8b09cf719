pub mod filter;
pub mod normalize;
pub mod projection;
pub mod rationale;
pub mod score;
pub mod select;

use crate::domain::fund::RiskPreference;
use crate::domain::recommendation::{
    ComparisonRow, Recommendation, RecommendationSnapshot, RiskReturnPoint, RunParams, RunSummary,
};
use crate::error::{EngineError, Result};
use crate::report::format_lakhs;
use chrono::{DateTime, Utc};
use rationale::NormalizedMetrics;
use score::ScoredUniverse;
use select::{select, SelectionMode};

/// Runs one recommendation pass over an already-scored universe.
///
/// An empty selection is a valid result: the snapshot then has no items and no
/// summary. A projection that overflows to a non-finite value fails the run.
pub fn recommend(universe: &ScoredUniverse, params: &RunParams) -> Result<RecommendationSnapshot> {
    recommend_at(universe, params, Utc::now())
}

pub fn recommend_at(
    universe: &ScoredUniverse,
    params: &RunParams,
    generated_at: DateTime<Utc>,
) -> Result<RecommendationSnapshot> {
    let ranked = select(universe.funds(), SelectionMode::from(params.risk));

    let items = ranked
        .into_iter()
        .map(|r| {
            let p = projection::project(params.amount, r.fund.fund.returns_5yr, params.years);
            if !p.sip.is_finite() || !p.lumpsum.is_finite() {
                tracing::warn!(
                    fund = r.fund.name(),
                    amount = params.amount,
                    years = params.years,
                    "projection overflowed"
                );
                return Err(EngineError::NonFiniteProjection {
                    fund: r.fund.name().to_string(),
                });
            }
            Ok(Recommendation {
                rank: r.rank,
                fund: r.fund.clone(),
                confidence_percent: r.fund.confidence_percent,
                projected_sip_value: p.sip,
                projected_lumpsum_value: p.lumpsum,
                rationale: rationale::rationale(NormalizedMetrics::from(r.fund)),
            })
        })
        .collect::<Result<Vec<Recommendation>>>()?;

    let summary = items.first().map(|top| {
        let projected_value = top.headline_value(params.mode);
        RunSummary {
            top_fund: top.fund.name().to_string(),
            projected_value,
            projected_value_display: format_lakhs(projected_value),
            confidence_percent: top.confidence_percent,
        }
    });

    let comparison = params.compare.then(|| {
        items
            .iter()
            .map(|r| ComparisonRow {
                fund: r.fund.name().to_string(),
                sip_lakhs: round2(r.projected_sip_value / 1e5),
                lumpsum_lakhs: round2(r.projected_lumpsum_value / 1e5),
            })
            .collect()
    });

    let risk_return = items
        .iter()
        .map(|r| RiskReturnPoint {
            fund: r.fund.name().to_string(),
            standard_deviation: r.fund.fund.standard_deviation,
            returns_5yr: r.fund.fund.returns_5yr,
            confidence_percent: r.confidence_percent,
        })
        .collect();

    tracing::info!(
        risk = %params.risk,
        years = params.years,
        items_len = items.len(),
        "recommendation run complete"
    );

    Ok(RecommendationSnapshot {
        id: uuid::Uuid::new_v4(),
        generated_at,
        params: params.clone(),
        caption: caption(params.risk),
        items,
        summary,
        comparison,
        risk_return,
    })
}

pub fn caption(risk: RiskPreference) -> String {
    match risk {
        RiskPreference::NoPreference => "Balanced selection across all risk categories".to_string(),
        other => format!("Funds aligned with {other} risk preference"),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fund::{Fund, InvestmentMode, RiskBucket};
    use chrono::TimeZone;

    fn fund(name: &str, bucket: RiskBucket, r: f64, s: f64, sd: f64) -> Fund {
        Fund {
            name: name.to_string(),
            risk_bucket: bucket,
            returns_5yr: r,
            sharpe: s,
            standard_deviation: sd,
        }
    }

    fn six_fund_universe() -> ScoredUniverse {
        ScoredUniverse::build(vec![
            fund("Alpha Liquid", RiskBucket::LowRisk, 6.5, 0.9, 1.2),
            fund("Beta Short Duration", RiskBucket::ModeratelyLow, 7.8, 1.1, 2.4),
            fund("Gamma Hybrid", RiskBucket::Moderate, 11.2, 1.0, 9.5),
            fund("Delta Balanced Advantage", RiskBucket::Moderate, 12.0, 1.3, 8.1),
            fund("Epsilon Small Cap", RiskBucket::HighRisk, 24.5, 1.2, 18.7),
            fund("Zeta Mid Cap", RiskBucket::HighRisk, 21.0, 1.15, 16.2),
        ])
        .unwrap()
    }

    fn params(risk: RiskPreference) -> RunParams {
        RunParams {
            risk,
            mode: InvestmentMode::Sip,
            amount: 5000.0,
            years: 10,
            compare: false,
        }
    }

    #[test]
    fn moderate_run_returns_only_moderate_funds_ranked() {
        let u = six_fund_universe();
        let snap = recommend(&u, &params(RiskPreference::Moderate)).unwrap();

        assert_eq!(snap.items.len(), 2);
        assert!(snap
            .items
            .iter()
            .all(|r| r.fund.risk_bucket() == RiskBucket::Moderate));
        let names: Vec<&str> = snap.items.iter().map(|r| r.fund.name()).collect();
        assert_eq!(names, ["Delta Balanced Advantage", "Gamma Hybrid"]);
        let ranks: Vec<u32> = snap.items.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2]);
        assert!(snap.items[0].fund.ranking_score >= snap.items[1].fund.ranking_score);
        assert_eq!(snap.caption, "Funds aligned with Moderate risk preference");
    }

    #[test]
    fn projections_use_each_funds_five_year_return() {
        let u = six_fund_universe();
        let snap = recommend(&u, &params(RiskPreference::Moderate)).unwrap();
        let delta = snap
            .items
            .iter()
            .find(|r| r.fund.name() == "Delta Balanced Advantage")
            .unwrap();

        let r = 12.0 / 100.0 / 12.0;
        let sip = 5000.0 * ((1.0_f64 + r).powf(120.0) - 1.0) / r * (1.0 + r);
        let lumpsum = 600_000.0 * 1.12_f64.powf(10.0);
        assert!((delta.projected_sip_value - sip).abs() < 1e-6);
        assert!((delta.projected_lumpsum_value - lumpsum).abs() < 1e-6);
    }

    #[test]
    fn balanced_run_spans_every_group() {
        let u = six_fund_universe();
        let snap = recommend(&u, &params(RiskPreference::NoPreference)).unwrap();

        assert_eq!(snap.items.len(), 5);
        assert_eq!(snap.caption, "Balanced selection across all risk categories");
        for group in select::BALANCED_GROUPS {
            let n = snap
                .items
                .iter()
                .filter(|r| group.contains(&r.fund.risk_bucket()))
                .count();
            assert!(n <= select::PER_GROUP);
        }
        let ranks: Vec<u32> = snap.items.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn summary_and_comparison_follow_params() {
        let u = six_fund_universe();
        let mut p = params(RiskPreference::High);
        p.mode = InvestmentMode::Lumpsum;
        p.compare = true;

        let at = Utc.with_ymd_and_hms(2026, 1, 27, 10, 0, 0).unwrap();
        let snap = recommend_at(&u, &p, at).unwrap();
        assert_eq!(snap.generated_at, at);

        let top = &snap.items[0];
        let summary = snap.summary.as_ref().unwrap();
        assert_eq!(summary.top_fund, top.fund.name());
        assert_eq!(summary.projected_value, top.projected_lumpsum_value);
        assert_eq!(summary.confidence_percent, top.confidence_percent);

        let comparison = snap.comparison.as_ref().unwrap();
        assert_eq!(comparison.len(), snap.items.len());
        assert_eq!(
            comparison[0].sip_lakhs,
            round2(top.projected_sip_value / 1e5)
        );
        assert_eq!(snap.risk_return.len(), snap.items.len());
    }

    #[test]
    fn empty_selection_has_no_summary() {
        let u = ScoredUniverse::build(vec![
            fund("A", RiskBucket::LowRisk, 6.0, 0.8, 1.0),
            fund("B", RiskBucket::ModeratelyLow, 8.0, 1.2, 3.0),
            fund("C", RiskBucket::Moderate, 11.0, 0.9, 9.0),
        ])
        .unwrap();

        let mut p = params(RiskPreference::High);
        p.compare = true;
        let snap = recommend(&u, &p).unwrap();
        assert!(snap.items.is_empty());
        assert!(snap.summary.is_none());
        assert_eq!(snap.comparison.as_deref(), Some(&[][..]));
    }

    #[test]
    fn overflowing_projection_fails_the_run() {
        let u = ScoredUniverse::build(vec![
            fund("Steady Debt", RiskBucket::LowRisk, 6.0, 0.8, 1.0),
            fund("Runaway Equity", RiskBucket::HighRisk, 1e6, 1.2, 30.0),
            fund("Core Hybrid", RiskBucket::Moderate, 11.0, 0.9, 9.0),
        ])
        .unwrap();

        let mut p = params(RiskPreference::High);
        p.years = 30;
        let err = recommend(&u, &p).unwrap_err();
        assert_eq!(
            err,
            EngineError::NonFiniteProjection {
                fund: "Runaway Equity".into()
            }
        );

        // Same universe, but the overflowing fund is never selected.
        assert!(recommend(&u, &params(RiskPreference::Low)).is_ok());
    }

    #[test]
    fn rationale_matches_normalized_metrics() {
        let u = six_fund_universe();
        let snap = recommend(&u, &params(RiskPreference::High)).unwrap();
        for r in &snap.items {
            assert_eq!(
                r.rationale,
                rationale::rationale(NormalizedMetrics::from(&r.fund))
            );
            assert!(r.rationale.starts_with("Strong long-term returns"));
            assert!(r.rationale.ends_with("Higher volatility expected"));
        }
    }
}
