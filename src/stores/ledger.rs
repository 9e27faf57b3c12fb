//! Defines the ledger store trait.

use crate::{
    Error,
    models::{Expense, Income, NewExpense, NewIncome},
};

/// Handles the recording of expense and income rows.
///
/// The ledger is append-only: there are no update or delete operations, and
/// no reads beyond what [report generation](crate::stores::ReportStore)
/// needs.
pub trait LedgerStore {
    /// Record an expense.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidUser] if the user ID does not refer to a
    /// registered user, or an [Error::SqlError] if an SQL related error
    /// occurred.
    fn create_expense(&mut self, new_expense: NewExpense) -> Result<Expense, Error>;

    /// Record an income.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidUser] if the user ID does not refer to a
    /// registered user, or an [Error::SqlError] if an SQL related error
    /// occurred.
    fn create_income(&mut self, new_income: NewIncome) -> Result<Income, Error>;
}
