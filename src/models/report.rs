//! The derived financial report.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// An aggregate view over a user's ledger.
///
/// Reports are recomputed on every request and never persisted or cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    /// Sum of all of the user's income amounts.
    pub total_income: f64,
    /// Sum of all of the user's expense amounts.
    pub total_expenses: f64,
    /// Expense totals grouped by category label. Categories with no expenses
    /// are absent rather than present with zero.
    pub category_breakdown: BTreeMap<String, f64>,
    /// `total_income - total_expenses`.
    pub net_balance: f64,
}

impl Report {
    /// Build a report from the income total and the per-category expense
    /// totals. The expense total and net balance are derived from the inputs.
    pub fn new(total_income: f64, category_breakdown: BTreeMap<String, f64>) -> Self {
        let total_expenses: f64 = category_breakdown.values().sum();

        Self {
            total_income,
            total_expenses,
            category_breakdown,
            net_balance: total_income - total_expenses,
        }
    }
}
