//! Contains a convenience type alias and constructor for an [AppState] that
//! uses the SQLite backend.

pub mod ledger;
pub mod report;
pub mod user;

pub use ledger::SQLiteLedgerStore;
pub use report::SQLiteReportStore;
pub use user::SQLiteUserStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteUserStore, SQLiteLedgerStore, SQLiteReportStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the tables for the domain
/// models to the database.
pub fn create_app_state(db_connection: Connection, cookie_secret: &str) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));

    Ok(AppState::new(
        cookie_secret,
        SQLiteUserStore::new(connection.clone()),
        SQLiteLedgerStore::new(connection.clone()),
        SQLiteReportStore::new(connection),
    ))
}
