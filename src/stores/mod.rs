//! Contains traits and implementations for objects that store the domain [models](crate::models).

mod ledger;
mod report;
mod user;

pub mod sqlite;

pub use ledger::LedgerStore;
pub use report::ReportStore;
pub use user::UserStore;
