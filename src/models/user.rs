//! The user model: identity, credentials and profile details.

use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::models::PasswordHash;

/// Uniquely identifies a registered user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserID(i64);

impl UserID {
    /// Create a user ID from a database row ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying row ID.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

/// A registered user of the application.
///
/// Users are created once at registration and are never mutated or deleted.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    id: UserID,
    email: String,
    username: Option<String>,
    password_hash: PasswordHash,
    name: String,
    date_of_birth: Date,
    created_at: OffsetDateTime,
}

impl User {
    /// Create a user record.
    ///
    /// Note that this function does not insert the user into the application
    /// database, use [crate::stores::UserStore::create] for that.
    pub fn new(
        id: UserID,
        email: String,
        username: Option<String>,
        password_hash: PasswordHash,
        name: String,
        date_of_birth: Date,
        created_at: OffsetDateTime,
    ) -> Self {
        Self {
            id,
            email,
            username,
            password_hash,
            name,
            date_of_birth,
            created_at,
        }
    }

    /// The user's unique ID.
    pub fn id(&self) -> UserID {
        self.id
    }

    /// The email the user registered with.
    pub fn email(&self) -> &str {
        &self.email
    }

    /// The user's optional handle.
    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// The user's hashed password.
    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    /// The user's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The user's date of birth.
    pub fn date_of_birth(&self) -> Date {
        self.date_of_birth
    }

    /// The instant the user registered.
    pub fn created_at(&self) -> OffsetDateTime {
        self.created_at
    }
}

/// The data for creating a new user.
///
/// The password must be hashed before constructing this type, there is no way
/// to hand a plaintext password to a store.
pub struct NewUser {
    /// The email to register, must not be in use.
    pub email: String,
    /// An optional handle, must not be in use when set.
    pub username: Option<String>,
    /// The user's hashed password.
    pub password_hash: PasswordHash,
    /// The user's display name.
    pub name: String,
    /// The user's date of birth.
    pub date_of_birth: Date,
}
