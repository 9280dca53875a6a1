//! Derives budget status (remaining, over, percent used) for a month or a
//! quarter, and resolves rollover credit for display.

use serde::Serialize;

use crate::calendar::Quarter;

use super::client::ClientBudget;

/// Months covered by one quarter budget.
pub const PERIODS_PER_QUARTER: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Granularity {
    Month,
    Quarter,
}

/// Budget position for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BudgetStatus {
    pub budget: f64,
    pub spent: f64,
    /// Absolute distance between budget and spend; read as "over" when
    /// `over` is set, "remaining" otherwise.
    pub remaining_or_over: f64,
    pub over: bool,
    pub progress_percent: u8,
}

impl BudgetStatus {
    pub fn compute(budget: f64, spent: f64) -> Self {
        let remaining = budget - spent;
        Self {
            budget,
            spent,
            remaining_or_over: remaining.abs(),
            over: spent > budget,
            progress_percent: progress_percent(budget, spent),
        }
    }

    /// Signed remainder: negative when over budget.
    pub fn remaining(&self) -> f64 {
        self.budget - self.spent
    }
}

/// Percent of `budget` consumed by `spent`, clamped to 0..=100 and rounded.
/// A zero (or negative) budget always reads 0%.
pub fn progress_percent(budget: f64, spent: f64) -> u8 {
    if budget <= 0.0 || !budget.is_finite() {
        return 0;
    }
    let ratio = spent / budget * 100.0;
    if ratio.is_nan() {
        return 0;
    }
    ratio.clamp(0.0, 100.0).round() as u8
}

pub fn period_budget(client: &ClientBudget, granularity: Granularity) -> f64 {
    match granularity {
        Granularity::Month => client.committed_monthly,
        Granularity::Quarter => client.committed_monthly * f64::from(PERIODS_PER_QUARTER),
    }
}

pub fn month_status(client: &ClientBudget, spent: f64) -> BudgetStatus {
    BudgetStatus::compute(period_budget(client, Granularity::Month), spent)
}

pub fn quarter_status(client: &ClientBudget, spent: f64) -> BudgetStatus {
    BudgetStatus::compute(period_budget(client, Granularity::Quarter), spent)
}

/// Unspent budget carried over from the preceding quarter. Display only: it
/// never feeds into month or quarter status.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Rollover {
    pub amount: f64,
    pub from_quarter: Quarter,
}

pub fn rollover_for(client: &ClientBudget) -> Option<Rollover> {
    (client.rollover_credit > 0.0).then(|| Rollover {
        amount: client.rollover_credit,
        from_quarter: client.quarter_label.previous(),
    })
}
