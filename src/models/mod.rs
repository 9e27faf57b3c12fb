//! The domain models for the account and ledger service.

mod password;
pub use password::PasswordHash;

mod report;
pub use report::Report;

mod transaction;
pub use transaction::{Expense, Income, NewExpense, NewIncome};

mod user;
pub use user::{NewUser, User, UserID};

/// An alias for the integer row IDs assigned by the database.
pub type DatabaseID = i64;
