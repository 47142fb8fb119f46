//! The six supported payment plans and their derived payment amounts.

use std::fmt;

use log::info;

use super::{annuity, rates, round2, MortgageTerms};

/// The six payment plans, in the fixed order every output uses.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PlanKind {
    Monthly,
    SemiMonthly,
    BiWeekly,
    Weekly,
    RapidBiWeekly,
    RapidWeekly,
}

impl PlanKind {
    /// All plans in required output order.
    pub const ALL: [PlanKind; 6] = [
        PlanKind::Monthly,
        PlanKind::SemiMonthly,
        PlanKind::BiWeekly,
        PlanKind::Weekly,
        PlanKind::RapidBiWeekly,
        PlanKind::RapidWeekly,
    ];

    pub fn periods_per_year(self) -> u32 {
        match self {
            PlanKind::Monthly => 12,
            PlanKind::SemiMonthly => 24,
            PlanKind::BiWeekly | PlanKind::RapidBiWeekly => 26,
            PlanKind::Weekly | PlanKind::RapidWeekly => 52,
        }
    }

    pub fn is_rapid(self) -> bool {
        matches!(self, PlanKind::RapidBiWeekly | PlanKind::RapidWeekly)
    }

    /// Position in the fixed output order.
    pub fn ordinal(self) -> usize {
        match self {
            PlanKind::Monthly => 0,
            PlanKind::SemiMonthly => 1,
            PlanKind::BiWeekly => 2,
            PlanKind::Weekly => 3,
            PlanKind::RapidBiWeekly => 4,
            PlanKind::RapidWeekly => 5,
        }
    }
}

impl fmt::Display for PlanKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PlanKind::Monthly => "Monthly",
            PlanKind::SemiMonthly => "Semi-Monthly",
            PlanKind::BiWeekly => "Bi-Weekly",
            PlanKind::Weekly => "Weekly",
            PlanKind::RapidBiWeekly => "Rapid Bi-Weekly",
            PlanKind::RapidWeekly => "Rapid Weekly",
        };
        write!(f, "{}", name)
    }
}

/// Periodic rate, schedule length and level payment for one plan.
///
/// `payment_amount` is carried at full precision; schedules are built from
/// the raw value and rounding to cents happens only at presentation.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct PaymentPlan {
    pub kind: PlanKind,
    pub periodic_rate: f64,
    pub term_periods: u32,
    pub payment_amount: f64,
}

impl PaymentPlan {
    /// Payment amount rounded to cents for display and export.
    pub fn rounded_payment(&self) -> f64 {
        round2(self.payment_amount)
    }
}

impl fmt::Display for PaymentPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: payment ${:.2} ({} periods at rate {:.6})",
            self.kind,
            self.rounded_payment(),
            self.term_periods,
            self.periodic_rate
        )
    }
}

/// Derive all six payment plans for the given terms and principal.
///
/// The four base plans size the payment over the full amortization horizon
/// while the schedule length comes from the (shorter) term. The two rapid
/// plans reuse the monthly payment halved/quartered, by convention, rather
/// than re-pricing the annuity at the accelerated frequency.
pub fn build_plans(terms: &MortgageTerms, principal: f64) -> [PaymentPlan; 6] {
    let ear = terms.effective_annual_rate();

    let base = |kind: PlanKind| {
        let freq = kind.periods_per_year();
        let rate = rates::periodic_rate(ear, freq);
        let amort_periods = terms.amort_years() * freq;
        PaymentPlan {
            kind,
            periodic_rate: rate,
            term_periods: terms.term_years() * freq,
            payment_amount: annuity::level_payment(principal, rate, amort_periods),
        }
    };

    let monthly = base(PlanKind::Monthly);
    let semi_monthly = base(PlanKind::SemiMonthly);
    let bi_weekly = base(PlanKind::BiWeekly);
    let weekly = base(PlanKind::Weekly);

    let rapid_bi_weekly = PaymentPlan {
        kind: PlanKind::RapidBiWeekly,
        periodic_rate: bi_weekly.periodic_rate,
        term_periods: terms.term_years() * 26,
        payment_amount: monthly.payment_amount / 2.0,
    };
    let rapid_weekly = PaymentPlan {
        kind: PlanKind::RapidWeekly,
        periodic_rate: weekly.periodic_rate,
        term_periods: terms.term_years() * 52,
        payment_amount: monthly.payment_amount / 4.0,
    };

    info!(
        "plans built for principal {:.2}: monthly payment {:.2}",
        principal, monthly.payment_amount
    );

    [
        monthly,
        semi_monthly,
        bi_weekly,
        weekly,
        rapid_bi_weekly,
        rapid_weekly,
    ]
}
