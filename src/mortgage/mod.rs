//! Mortgage amortization engine.
//!
//! Rates are quoted as a nominal annual percentage compounded semi-annually.
//! The payment for each plan is sized over the amortization horizon; the
//! schedule only covers the (usually shorter) contractual term.

pub mod annuity;
pub mod plan;
pub mod rates;
pub mod schedule;

pub use plan::{build_plans, PaymentPlan, PlanKind};
pub use schedule::{Schedule, ScheduleRow};

use log::info;

use crate::error::{FinError, Result};

/// Round a money amount to cents.
pub(crate) fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Validated mortgage terms. Immutable once constructed; the effective
/// annual rate is derived at construction.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct MortgageTerms {
    nominal_percent: f64,
    amort_years: u32,
    term_years: u32,
    ear: f64,
}

impl MortgageTerms {
    /// Fails fast on out-of-domain values rather than producing a
    /// nonsensical schedule downstream.
    pub fn new(nominal_percent: f64, amort_years: u32, term_years: u32) -> Result<Self> {
        if !nominal_percent.is_finite() || nominal_percent < 0.0 {
            return Err(FinError::invalid_terms(format!(
                "nominal rate must be a non-negative percentage, got {nominal_percent}"
            )));
        }
        if amort_years == 0 {
            return Err(FinError::invalid_terms("amortization must be at least 1 year"));
        }
        if term_years == 0 {
            return Err(FinError::invalid_terms("term must be at least 1 year"));
        }
        Ok(Self {
            nominal_percent,
            amort_years,
            term_years,
            ear: rates::effective_annual_rate(nominal_percent),
        })
    }

    pub fn nominal_percent(&self) -> f64 {
        self.nominal_percent
    }

    pub fn amort_years(&self) -> u32 {
        self.amort_years
    }

    pub fn term_years(&self) -> u32 {
        self.term_years
    }

    pub fn effective_annual_rate(&self) -> f64 {
        self.ear
    }
}

/// All six plans with their schedules, built once per (terms, principal)
/// pair and read-only afterwards. One slot per plan, in fixed plan order.
#[derive(Clone, PartialEq, Debug)]
pub struct ScheduleSet {
    principal: f64,
    entries: [(PaymentPlan, Schedule); 6],
}

impl ScheduleSet {
    pub fn build(terms: &MortgageTerms, principal: f64) -> Self {
        let entries = build_plans(terms, principal).map(|plan| {
            let schedule = schedule::build(
                principal,
                plan.payment_amount,
                plan.periodic_rate,
                plan.term_periods,
            );
            (plan, schedule)
        });
        info!(
            "built {} schedules for principal {:.2}",
            PlanKind::ALL.len(),
            principal
        );
        Self { principal, entries }
    }

    pub fn principal(&self) -> f64 {
        self.principal
    }

    /// Plans and schedules in fixed output order.
    pub fn iter(&self) -> impl Iterator<Item = &(PaymentPlan, Schedule)> {
        self.entries.iter()
    }

    pub fn plan(&self, kind: PlanKind) -> &PaymentPlan {
        &self.entries[kind.ordinal()].0
    }

    pub fn schedule(&self, kind: PlanKind) -> &Schedule {
        &self.entries[kind.ordinal()].1
    }

    /// The six payment amounts rounded to cents, in fixed plan order.
    pub fn payments(&self) -> [f64; 6] {
        let mut out = [0.0; 6];
        for (slot, (plan, _)) in out.iter_mut().zip(self.entries.iter()) {
            *slot = plan.rounded_payment();
        }
        out
    }
}
