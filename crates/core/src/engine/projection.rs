//! Closed-form growth projections.
//!
//! Both models extrapolate a single annual rate over the whole horizon. The
//! SIP model treats contributions as made at the start of each month
//! (annuity-due), and the formula is reproduced exactly rather than converted
//! to an ordinary annuity.

use serde::{Deserialize, Serialize};

const MONTHS_PER_YEAR: u32 = 12;

/// Future value of a fixed monthly contribution.
///
/// `monthly_rate = annual_rate_percent / 100 / 12`,
/// `fv = c * ((1 + r)^n - 1) / r * (1 + r)` with `n = years * 12`.
///
/// A zero rate makes the closed form divide by zero; that case returns its
/// limit `contribution * n` (no growth), and is logged.
pub fn future_value_sip(contribution: f64, annual_rate_percent: f64, years: u32) -> f64 {
    let monthly_rate = annual_rate_percent / 100.0 / f64::from(MONTHS_PER_YEAR);
    let n_periods = f64::from(years) * f64::from(MONTHS_PER_YEAR);

    if monthly_rate == 0.0 {
        tracing::debug!(contribution, years, "zero growth rate; SIP value is total contribution");
        return contribution * n_periods;
    }

    let growth = (1.0 + monthly_rate).powf(n_periods);
    contribution * (growth - 1.0) / monthly_rate * (1.0 + monthly_rate)
}

/// Future value of a single upfront investment compounded annually.
pub fn future_value_lumpsum(principal: f64, annual_rate_percent: f64, years: u32) -> f64 {
    principal * (1.0 + annual_rate_percent / 100.0).powf(f64::from(years))
}

/// Lump sum equal to the total nominal SIP contribution over the horizon, so
/// both projections compare the same invested amount.
pub fn equivalent_lumpsum(contribution: f64, years: u32) -> f64 {
    contribution * f64::from(MONTHS_PER_YEAR) * f64::from(years)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub sip: f64,
    pub lumpsum: f64,
}

/// Both projections for one fund's rate.
pub fn project(contribution: f64, annual_rate_percent: f64, years: u32) -> Projection {
    Projection {
        sip: future_value_sip(contribution, annual_rate_percent, years),
        lumpsum: future_value_lumpsum(
            equivalent_lumpsum(contribution, years),
            annual_rate_percent,
            years,
        ),
    }
}
