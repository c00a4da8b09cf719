//! Presentation helpers: currency formatting and the delimited-text report.

use crate::domain::recommendation::RecommendationSnapshot;
use anyhow::Context;

pub const REPORT_FILE_NAME: &str = "mutual_fund_recommendations.csv";

pub const REPORT_HEADER: [&str; 8] = [
    "Rank",
    "Fund Name",
    "Risk Level",
    "Model Ranking Score",
    "Confidence Level (%)",
    "5-Year Annual Return (%)",
    "Expected SIP Value",
    "Recommendation Rationale",
];

/// Formats an amount in lakhs (hundred-thousands), e.g. `1234567.0` becomes
/// `"₹12.35 Lakhs"`.
pub fn format_lakhs(value: f64) -> String {
    format!("₹{} Lakhs", group_thousands(value / 1e5))
}

/// Two decimals with comma thousands separators.
fn group_thousands(v: f64) -> String {
    let fixed = format!("{:.2}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if v < 0.0 && fixed.bytes().any(|b| b.is_ascii_digit() && b != b'0') {
        "-"
    } else {
        ""
    };
    format!("{sign}{grouped}.{frac_part}")
}

/// One row per recommendation in rank order, with the SIP value pre-formatted.
pub fn export_recommendations_csv(snapshot: &RecommendationSnapshot) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(REPORT_HEADER)?;

    for r in &snapshot.items {
        wtr.write_record([
            r.rank.to_string(),
            r.fund.name().to_string(),
            r.fund.risk_bucket().to_string(),
            r.fund.ranking_score.to_string(),
            r.confidence_percent.to_string(),
            r.fund.fund.returns_5yr.to_string(),
            format_lakhs(r.projected_sip_value),
            r.rationale.clone(),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::fund::{Fund, InvestmentMode, RiskBucket, RiskPreference};
    use crate::domain::recommendation::RunParams;
    use crate::engine::{recommend, score::ScoredUniverse};

    #[test]
    fn formats_lakhs_with_two_decimals() {
        assert_eq!(format_lakhs(1_234_567.0), "₹12.35 Lakhs");
        assert_eq!(format_lakhs(600_000.0), "₹6.00 Lakhs");
        assert_eq!(format_lakhs(0.0), "₹0.00 Lakhs");
    }

    #[test]
    fn formats_lakhs_with_thousands_separators() {
        assert_eq!(format_lakhs(123_456_789.0), "₹1,234.57 Lakhs");
        assert_eq!(format_lakhs(100_000_000_000.0), "₹1,000,000.00 Lakhs");
        assert_eq!(format_lakhs(-250_000.0), "₹-2.50 Lakhs");
    }

    #[test]
    fn csv_has_header_and_one_row_per_item() {
        let universe = ScoredUniverse::build(vec![
            Fund {
                name: "Growth, Direct".to_string(),
                risk_bucket: RiskBucket::HighRisk,
                returns_5yr: 18.0,
                sharpe: 1.1,
                standard_deviation: 15.0,
            },
            Fund {
                name: "Steady Income".to_string(),
                risk_bucket: RiskBucket::LowRisk,
                returns_5yr: 7.0,
                sharpe: 0.9,
                standard_deviation: 2.0,
            },
            Fund {
                name: "Flexi".to_string(),
                risk_bucket: RiskBucket::Moderate,
                returns_5yr: 12.0,
                sharpe: 1.3,
                standard_deviation: 9.0,
            },
        ])
        .unwrap();
        let snapshot = recommend(
            &universe,
            &RunParams {
                risk: RiskPreference::NoPreference,
                mode: InvestmentMode::Sip,
                amount: 5000.0,
                years: 10,
                compare: false,
            },
        )
        .unwrap();

        let csv = export_recommendations_csv(&snapshot).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 1 + snapshot.items.len());
        assert_eq!(
            lines[0],
            "Rank,Fund Name,Risk Level,Model Ranking Score,Confidence Level (%),\
             5-Year Annual Return (%),Expected SIP Value,Recommendation Rationale"
        );

        let mut rdr = csv::Reader::from_reader(csv.as_bytes());
        let rows: Vec<csv::StringRecord> = rdr.records().collect::<Result<_, _>>().unwrap();
        let growth = rows.iter().find(|r| &r[1] == "Growth, Direct").unwrap();
        assert_eq!(&growth[2], "High Risk");
        assert!(growth[6].starts_with('₹') && growth[6].ends_with(" Lakhs"));
        assert_eq!(&rows[0][0], "1");
    }

    #[test]
    fn empty_snapshot_exports_header_only() {
        let universe = ScoredUniverse::build(vec![
            Fund {
                name: "A".to_string(),
                risk_bucket: RiskBucket::LowRisk,
                returns_5yr: 7.0,
                sharpe: 0.9,
                standard_deviation: 2.0,
            },
            Fund {
                name: "B".to_string(),
                risk_bucket: RiskBucket::LowRisk,
                returns_5yr: 8.0,
                sharpe: 1.2,
                standard_deviation: 3.5,
            },
        ])
        .unwrap();
        let snapshot = recommend(
            &universe,
            &RunParams {
                risk: RiskPreference::High,
                mode: InvestmentMode::Sip,
                amount: 5000.0,
                years: 10,
                compare: false,
            },
        )
        .unwrap();

        let csv = export_recommendations_csv(&snapshot).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
