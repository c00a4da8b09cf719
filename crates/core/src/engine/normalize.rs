//! Standard-score normalization over the full fund universe.

use crate::error::{EngineError, Result};

/// Relative tolerance under which a column's spread counts as zero.
const ZERO_VARIANCE_TOLERANCE: f64 = 1e-12;

/// `(value - mean) / std_dev` for every value, using the population standard
/// deviation (divisor `n`, not `n - 1`).
///
/// `column` names the metric in the error raised for a degenerate column; no
/// substitute score is ever produced. The check is tolerance-based, not an
/// exact zero test: a column whose standard deviation is at most
/// `1e-12 * max(1, max|v|)` is treated as constant, so columns with a
/// genuinely tiny spread (values around `1e-13`) are rejected too.
pub fn standard_scores(column: &'static str, values: &[f64]) -> Result<Vec<f64>> {
    if values.is_empty() {
        return Err(EngineError::EmptyUniverse);
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let std_dev = variance.sqrt();

    let scale = values.iter().fold(1.0_f64, |acc, v| acc.max(v.abs()));
    if !std_dev.is_finite() || std_dev <= ZERO_VARIANCE_TOLERANCE * scale {
        tracing::warn!(column, mean, std_dev, "zero-variance column; refusing to normalize");
        return Err(EngineError::DegenerateUniverse { column });
    }

    Ok(values.iter().map(|v| (v - mean) / std_dev).collect())
}
