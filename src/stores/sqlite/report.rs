//! Implements a SQLite backed report store.

use std::{
    collections::BTreeMap,
    sync::{Arc, Mutex},
};

use rusqlite::Connection;

use crate::{
    Error,
    models::{Report, UserID},
    stores::ReportStore,
};

/// Computes financial reports from the ledger tables in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteReportStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteReportStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl ReportStore for SQLiteReportStore {
    /// Compute the report for `user_id` from the income and expense tables.
    ///
    /// The expense total is derived from the per-category sums, so the whole
    /// report is built from one income query and one expense query.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::SqlError] if there is an SQL error. Storage faults
    /// are never coerced into a zero-valued report.
    fn generate(&self, user_id: UserID) -> Result<Report, Error> {
        let connection = self.connection.lock().unwrap();

        let total_income: f64 = connection
            .prepare("SELECT COALESCE(SUM(amount), 0.0) FROM income WHERE user_id = :user_id")?
            .query_row(&[(":user_id", &user_id.as_i64())], |row| row.get(0))?;

        let category_breakdown: BTreeMap<String, f64> = connection
            .prepare(
                "SELECT category, SUM(amount) FROM expenses
                 WHERE user_id = :user_id
                 GROUP BY category",
            )?
            .query_map(&[(":user_id", &user_id.as_i64())], |row| {
                Ok((row.get(0)?, row.get(1)?))
            })?
            .collect::<Result<_, _>>()?;

        Ok(Report::new(total_income, category_breakdown))
    }
}

#[cfg(test)]
mod report_store_tests {
    use std::{
        collections::BTreeMap,
        sync::{Arc, Mutex},
    };

    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        db::initialize,
        models::{NewExpense, NewIncome, NewUser, PasswordHash, UserID},
        stores::{LedgerStore, ReportStore, UserStore},
        stores::sqlite::{SQLiteLedgerStore, SQLiteUserStore},
    };

    use super::SQLiteReportStore;

    fn get_stores() -> (SQLiteUserStore, SQLiteLedgerStore, SQLiteReportStore) {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        let connection = Arc::new(Mutex::new(connection));

        (
            SQLiteUserStore::new(connection.clone()),
            SQLiteLedgerStore::new(connection.clone()),
            SQLiteReportStore::new(connection),
        )
    }

    fn create_user(store: &mut SQLiteUserStore, email: &str) -> UserID {
        store
            .create(NewUser {
                email: email.to_owned(),
                username: None,
                password_hash: PasswordHash::new("averysafeandsecurepassword", 4).unwrap(),
                name: "Jane Doe".to_owned(),
                date_of_birth: date!(1990 - 04 - 12),
            })
            .unwrap()
            .id()
    }

    fn add_expense(store: &mut SQLiteLedgerStore, user_id: UserID, category: &str, amount: f64) {
        store
            .create_expense(NewExpense::new(user_id, category.to_owned(), amount).unwrap())
            .unwrap();
    }

    fn add_income(store: &mut SQLiteLedgerStore, user_id: UserID, source: &str, amount: f64) {
        store
            .create_income(NewIncome::new(user_id, source.to_owned(), amount).unwrap())
            .unwrap();
    }

    #[test]
    fn report_sums_income_and_expenses_by_category() {
        let (mut user_store, mut ledger_store, report_store) = get_stores();
        let user_id = create_user(&mut user_store, "foo@bar.baz");

        add_income(&mut ledger_store, user_id, "salary", 100.0);
        add_income(&mut ledger_store, user_id, "dividends", 50.0);
        add_expense(&mut ledger_store, user_id, "food", 30.0);
        add_expense(&mut ledger_store, user_id, "food", 20.0);
        add_expense(&mut ledger_store, user_id, "transport", 10.0);

        let report = report_store.generate(user_id).unwrap();

        assert_eq!(report.total_income, 150.0);
        assert_eq!(report.total_expenses, 60.0);
        assert_eq!(
            report.category_breakdown,
            BTreeMap::from([("food".to_owned(), 50.0), ("transport".to_owned(), 10.0)])
        );
        assert_eq!(report.net_balance, 90.0);
    }

    #[test]
    fn report_for_user_with_no_transactions_is_all_zeroes() {
        let (mut user_store, _, report_store) = get_stores();
        let user_id = create_user(&mut user_store, "foo@bar.baz");

        let report = report_store.generate(user_id).unwrap();

        assert_eq!(report.total_income, 0.0);
        assert_eq!(report.total_expenses, 0.0);
        assert!(report.category_breakdown.is_empty());
        assert_eq!(report.net_balance, 0.0);
    }

    #[test]
    fn report_is_idempotent() {
        let (mut user_store, mut ledger_store, report_store) = get_stores();
        let user_id = create_user(&mut user_store, "foo@bar.baz");

        add_income(&mut ledger_store, user_id, "salary", 100.0);
        add_expense(&mut ledger_store, user_id, "food", 30.0);

        let first = report_store.generate(user_id).unwrap();
        let second = report_store.generate(user_id).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn report_only_includes_rows_owned_by_the_user() {
        let (mut user_store, mut ledger_store, report_store) = get_stores();
        let user_id = create_user(&mut user_store, "foo@bar.baz");
        let other_user_id = create_user(&mut user_store, "someone@else.com");

        add_income(&mut ledger_store, user_id, "salary", 100.0);
        add_income(&mut ledger_store, other_user_id, "salary", 9000.0);
        add_expense(&mut ledger_store, other_user_id, "yachts", 8000.0);

        let report = report_store.generate(user_id).unwrap();

        assert_eq!(report.total_income, 100.0);
        assert_eq!(report.total_expenses, 0.0);
        assert!(report.category_breakdown.is_empty());
    }
}
