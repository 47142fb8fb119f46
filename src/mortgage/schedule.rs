//! Period-by-period amortization schedule construction.

use std::fmt;

use log::trace;

use super::round2;

/// Balances below this are treated as fully repaid.
const BALANCE_EPSILON: f64 = 1e-8;

/// One payment period. Money fields are rounded to cents when the row is
/// materialized; the builder carries the unrounded balance between periods.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct ScheduleRow {
    pub period: u32,
    pub starting_balance: f64,
    pub interest: f64,
    pub payment: f64,
    pub ending_balance: f64,
}

impl fmt::Display for ScheduleRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "period {}, starting balance ${:.2}, interest ${:.2}, payment ${:.2}, ending balance ${:.2}",
            self.period, self.starting_balance, self.interest, self.payment, self.ending_balance
        )
    }
}

/// An ordered amortization table for a single payment plan.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Schedule {
    rows: Vec<ScheduleRow>,
}

impl Schedule {
    pub fn rows(&self) -> &[ScheduleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ending balance of the last row, or 0 for an empty schedule.
    pub fn final_balance(&self) -> f64 {
        self.rows.last().map_or(0.0, |row| row.ending_balance)
    }
}

/// Build the schedule for one plan.
///
/// Runs at most `term_periods` periods and stops early once the balance is
/// effectively zero. The last payment is capped at balance plus interest so
/// the balance can never go negative; a schedule shorter than the term is
/// the normal early-payoff outcome, not an error.
pub fn build(principal: f64, payment: f64, periodic_rate: f64, term_periods: u32) -> Schedule {
    let mut rows = Vec::with_capacity(term_periods as usize);
    let mut balance = principal;

    for period in 1..=term_periods {
        if balance <= BALANCE_EPSILON {
            break;
        }

        let interest = balance * periodic_rate;
        let actual_payment = payment.min(balance + interest);
        let ending = balance + interest - actual_payment;

        trace!(
            "period {}, balance {:.6}, interest {:.6}, payment {:.6}, ending {:.6}",
            period,
            balance,
            interest,
            actual_payment,
            ending
        );

        rows.push(ScheduleRow {
            period,
            starting_balance: round2(balance),
            interest: round2(interest),
            payment: round2(actual_payment),
            ending_balance: round2(ending),
        });

        // carry full precision into the next period
        balance = ending;
    }

    Schedule { rows }
}
