//! Defines the user store trait.

use crate::{
    Error,
    models::{NewUser, User, UserID},
};

/// Handles the creation and retrieval of user records.
pub trait UserStore {
    /// Create a new user.
    ///
    /// # Errors
    ///
    /// Returns an [Error::DuplicateEmail] if the email is taken, an
    /// [Error::DuplicateUsername] if the username is set and taken, or an
    /// [Error::SqlError] if an SQL related error occurred. On error no row is
    /// created.
    fn create(&mut self, new_user: NewUser) -> Result<User, Error>;

    /// Get a user by their ID.
    ///
    /// Returns [Error::NotFound] if no user with the given ID exists.
    fn get(&self, id: UserID) -> Result<User, Error>;

    /// Get a user by their email.
    ///
    /// Returns [Error::NotFound] if no user with the given email exists.
    fn get_by_email(&self, email: &str) -> Result<User, Error>;
}
