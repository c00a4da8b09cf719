use crate::domain::fund::{RiskBucket, ScoredFund};

/// A fund borrowed from the scored universe, tagged with its universe position.
///
/// The position is the deterministic tie-break for equal ranking scores.
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub index: usize,
    pub fund: &'a ScoredFund,
}

/// Funds whose bucket is in `buckets`, in universe order. Rows are borrowed
/// unchanged; nothing is rescored.
pub fn filter_by_buckets<'a>(funds: &'a [ScoredFund], buckets: &[RiskBucket]) -> Vec<Candidate<'a>> {
    funds
        .iter()
        .enumerate()
        .filter(|(_, f)| buckets.contains(&f.risk_bucket()))
        .map(|(index, fund)| Candidate { index, fund })
        .collect()
}
