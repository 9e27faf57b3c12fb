//! Implements a SQLite backed ledger store.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::OffsetDateTime;

use crate::{
    Error,
    db::CreateTable,
    models::{Expense, Income, NewExpense, NewIncome},
    stores::LedgerStore,
};

/// Stores expense and income rows in a SQLite database.
///
/// Note that because ledger rows reference the [User](crate::models::User)
/// model, the user table must be set up in the database and foreign key
/// enforcement turned on (see [crate::db::initialize]).
#[derive(Debug, Clone)]
pub struct SQLiteLedgerStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteLedgerStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl LedgerStore for SQLiteLedgerStore {
    /// Insert a new expense row into the database.
    ///
    /// The row's date is set to the insertion instant.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidUser] if the user ID does not refer to a
    /// registered user, or an [Error::SqlError] if there is some other SQL
    /// error.
    fn create_expense(&mut self, new_expense: NewExpense) -> Result<Expense, Error> {
        let date = OffsetDateTime::now_utc();
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO expenses (user_id, category, amount, date) VALUES (?1, ?2, ?3, ?4)",
            (
                new_expense.user_id().as_i64(),
                new_expense.category(),
                new_expense.amount(),
                date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Expense::new(id, new_expense, date))
    }

    /// Insert a new income row into the database.
    ///
    /// The row's date is set to the insertion instant.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidUser] if the user ID does not refer to a
    /// registered user, or an [Error::SqlError] if there is some other SQL
    /// error.
    fn create_income(&mut self, new_income: NewIncome) -> Result<Income, Error> {
        let date = OffsetDateTime::now_utc();
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO income (user_id, source, amount, date) VALUES (?1, ?2, ?3, ?4)",
            (
                new_income.user_id().as_i64(),
                new_income.source(),
                new_income.amount(),
                date,
            ),
        )?;

        let id = connection.last_insert_rowid();

        Ok(Income::new(id, new_income, date))
    }
}

impl CreateTable for SQLiteLedgerStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS expenses (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    category TEXT NOT NULL,
                    amount REAL NOT NULL,
                    date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY(user_id) REFERENCES users(id)
                    )",
            (),
        )?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS income (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    source TEXT NOT NULL,
                    amount REAL NOT NULL,
                    date TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                    FOREIGN KEY(user_id) REFERENCES users(id)
                    )",
            (),
        )?;

        Ok(())
    }
}
