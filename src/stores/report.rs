//! Defines the report store trait.

use crate::{
    Error,
    models::{Report, UserID},
};

/// Computes financial reports from the ledger.
pub trait ReportStore {
    /// Compute the income total, expense total and per-category expense
    /// breakdown for `user_id`.
    ///
    /// A user with no transactions gets a report of zeroes and an empty
    /// breakdown, not an error. The result only depends on the rows in the
    /// ledger, so calling this twice with no intervening writes returns
    /// identical reports.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if the underlying storage fails.
    /// Implementations must propagate storage faults rather than degrade to a
    /// zero-valued report.
    fn generate(&self, user_id: UserID) -> Result<Report, Error>;
}
