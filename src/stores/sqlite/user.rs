//! Implements a SQLite backed user store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row};
use time::{Date, OffsetDateTime};

use crate::{
    Error,
    db::{CreateTable, MapRow},
    models::{NewUser, PasswordHash, User, UserID},
    stores::UserStore,
};

/// Stores user records in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteUserStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteUserStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }
}

impl UserStore for SQLiteUserStore {
    /// Create and insert a new user into the database.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::DuplicateEmail] or [Error::DuplicateUsername] if a
    /// uniqueness constraint was violated, or an [Error::SqlError] if some
    /// other SQL related error occurred.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error> {
        let created_at = OffsetDateTime::now_utc();
        let connection = self.connection.lock().unwrap();

        connection.execute(
            "INSERT INTO users (email, username, password, name, date_of_birth, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            (
                &new_user.email,
                &new_user.username,
                new_user.password_hash.to_string(),
                &new_user.name,
                new_user.date_of_birth,
                created_at,
            ),
        )?;

        let id = UserID::new(connection.last_insert_rowid());

        Ok(User::new(
            id,
            new_user.email,
            new_user.username,
            new_user.password_hash,
            new_user.name,
            new_user.date_of_birth,
            created_at,
        ))
    }

    /// Get the user from the database that has the specified `id`.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if there is no user with the specified ID
    /// or an [Error::SqlError] if there are SQL related errors.
    fn get(&self, id: UserID) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, email, username, password, name, date_of_birth, created_at
                 FROM users WHERE id = :id",
            )?
            .query_row(&[(":id", &id.as_i64())], Self::map_row)
            .map_err(|e| e.into())
    }

    /// Get the user from the database that has the specified `email` address.
    ///
    /// # Panics
    ///
    /// Panics if the database lock is already acquired by the same thread or is poisoned.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if there is no user with the specified
    /// email or an [Error::SqlError] if there are SQL related errors.
    fn get_by_email(&self, email: &str) -> Result<User, Error> {
        self.connection
            .lock()
            .unwrap()
            .prepare(
                "SELECT id, email, username, password, name, date_of_birth, created_at
                 FROM users WHERE email = :email",
            )?
            .query_row(&[(":email", &email)], Self::map_row)
            .map_err(|e| e.into())
    }
}

impl CreateTable for SQLiteUserStore {
    fn create_table(connection: &Connection) -> Result<(), rusqlite::Error> {
        connection.execute(
            "CREATE TABLE IF NOT EXISTS users (
                    id INTEGER PRIMARY KEY,
                    email TEXT UNIQUE NOT NULL,
                    username TEXT UNIQUE,
                    password TEXT NOT NULL,
                    name TEXT NOT NULL,
                    date_of_birth TEXT NOT NULL,
                    created_at TEXT NOT NULL
                    )",
            (),
        )?;

        Ok(())
    }
}

impl MapRow for SQLiteUserStore {
    type ReturnType = User;

    fn map_row_with_offset(row: &Row, offset: usize) -> Result<Self::ReturnType, rusqlite::Error> {
        let id = UserID::new(row.get(offset)?);
        let email: String = row.get(offset + 1)?;
        let username: Option<String> = row.get(offset + 2)?;
        let raw_password_hash: String = row.get(offset + 3)?;
        let name: String = row.get(offset + 4)?;
        let date_of_birth: Date = row.get(offset + 5)?;
        let created_at: OffsetDateTime = row.get(offset + 6)?;

        Ok(User::new(
            id,
            email,
            username,
            PasswordHash::new_unchecked(&raw_password_hash),
            name,
            date_of_birth,
            created_at,
        ))
    }
}
