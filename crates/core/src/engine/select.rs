use crate::domain::fund::{RiskBucket, RiskPreference, ScoredFund};
use crate::engine::filter::{filter_by_buckets, Candidate};
use std::cmp::Ordering;

pub const TOP_N: usize = 5;
pub const PER_GROUP: usize = 2;

/// Bucket groups used for balanced selection, in concatenation order.
pub const BALANCED_GROUPS: [&[RiskBucket]; 3] = [
    &[RiskBucket::LowRisk, RiskBucket::ModeratelyLow],
    &[RiskBucket::Moderate],
    &[RiskBucket::HighRisk],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    /// Top [`PER_GROUP`] from every group in [`BALANCED_GROUPS`], then the top [`TOP_N`].
    Balanced,
    /// Top [`TOP_N`] among funds in the given buckets.
    ByPreference(&'static [RiskBucket]),
}

impl From<RiskPreference> for SelectionMode {
    fn from(pref: RiskPreference) -> Self {
        match pref.buckets() {
            Some(buckets) => SelectionMode::ByPreference(buckets),
            None => SelectionMode::Balanced,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RankedFund<'a> {
    pub rank: u32,
    pub fund: &'a ScoredFund,
}

pub fn select<'a>(funds: &'a [ScoredFund], mode: SelectionMode) -> Vec<RankedFund<'a>> {
    let candidates = match mode {
        SelectionMode::ByPreference(buckets) => filter_by_buckets(funds, buckets),
        SelectionMode::Balanced => BALANCED_GROUPS
            .iter()
            .flat_map(|group| top_n(filter_by_buckets(funds, group), PER_GROUP))
            .collect(),
    };

    let candidates_len = candidates.len();
    let ranked: Vec<RankedFund<'a>> = top_n(candidates, TOP_N)
        .into_iter()
        .zip(1u32..)
        .map(|(c, rank)| RankedFund { rank, fund: c.fund })
        .collect();

    tracing::debug!(?mode, candidates_len, selected_len = ranked.len(), "selected funds");
    ranked
}

/// Sort by descending ranking score (ties by universe position) and keep `n`.
fn top_n(mut candidates: Vec<Candidate<'_>>, n: usize) -> Vec<Candidate<'_>> {
    candidates.sort_by(|a, b| {
        b.fund
            .ranking_score
            .partial_cmp(&a.fund.ranking_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.index.cmp(&b.index))
    });
    candidates.truncate(n);
    candidates
}
