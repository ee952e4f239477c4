//! Work budgets that let long scans hand control back to the host loop.

use std::time::{Duration, Instant};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetLimit {
    Unlimited,
    /// Yield after this many units of work. Deterministic, so tests and headless hosts use it.
    Steps(u32),
    /// Yield once this much wall-clock time has elapsed since the budget was opened.
    WallClock(Duration),
}

/// Outcome of running one phase against a budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum PhaseStatus {
    Complete,
    Yielded,
}

pub(super) struct StepBudget {
    limit: BudgetLimit,
    spent: u32,
    opened_at: Instant,
}

impl StepBudget {
    pub(super) fn open(limit: BudgetLimit) -> Self {
        Self { limit, spent: 0, opened_at: Instant::now() }
    }

    pub(super) fn spent(&self) -> u32 {
        self.spent
    }

    /// Records one unit of work and reports whether the caller should yield now.
    pub(super) fn spend(&mut self) -> bool {
        self.spent = self.spent.saturating_add(1);
        match self.limit {
            BudgetLimit::Unlimited => false,
            BudgetLimit::Steps(limit) => self.spent >= limit,
            BudgetLimit::WallClock(limit) => self.opened_at.elapsed() >= limit,
        }
    }
}
