//! Rate conversions for the semi-annual compounding convention.
//!
//! Canadian mortgage rates are quoted as a nominal annual rate compounded
//! semi-annually. Payment math needs that rate expressed per payment period,
//! which goes through the effective annual rate.

/// Convert a quoted nominal annual rate (as a percentage, e.g. 5.0) into the
/// effective annual rate: (1 + r/2)^2 - 1.
pub fn effective_annual_rate(nominal_percent: f64) -> f64 {
    let nominal = nominal_percent / 100.0;
    (1.0 + nominal / 2.0).powi(2) - 1.0
}

/// Per-period rate for a payment frequency, derived from the effective
/// annual rate: (1 + ear)^(1/f) - 1.
pub fn periodic_rate(ear: f64, periods_per_year: u32) -> f64 {
    (1.0 + ear).powf(1.0 / periods_per_year as f64) - 1.0
}
