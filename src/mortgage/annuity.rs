//! Present-value-of-annuity math used to size the level payment.

/// Present value of a stream of $1 payments for `periods` periods at `rate`.
/// A zero rate degenerates to the period count (payment = principal / n).
pub fn annuity_factor(rate: f64, periods: u32) -> f64 {
    if rate == 0.0 {
        periods as f64
    } else {
        (1.0 - (1.0 + rate).powi(-(periods as i32))) / rate
    }
}

/// Constant payment that repays `principal` over `periods` periods at `rate`.
/// Caller guarantees `periods > 0`.
pub fn level_payment(principal: f64, rate: f64, periods: u32) -> f64 {
    principal / annuity_factor(rate, periods)
}
