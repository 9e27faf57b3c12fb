//! Implements the state shared by the REST server's route handlers.

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use sha2::{Digest, Sha512};
use time::Duration;

use crate::{
    auth_cookie::DEFAULT_COOKIE_DURATION,
    stores::{LedgerStore, ReportStore, UserStore},
};

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState<U, L, R>
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
    /// The store for registered [users](crate::models::User).
    pub user_store: U,
    /// The store for [expense](crate::models::Expense) and
    /// [income](crate::models::Income) rows.
    pub ledger_store: L,
    /// The store that computes [reports](crate::models::Report).
    pub report_store: R,
}

impl<U, L, R> AppState<U, L, R>
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(cookie_secret: &str, user_store: U, ledger_store: L, report_store: R) -> Self {
        Self {
            cookie_key: create_cookie_key(cookie_secret),
            cookie_duration: DEFAULT_COOKIE_DURATION,
            user_store,
            ledger_store,
            report_store,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl<U, L, R> FromRef<AppState<U, L, R>> for Key
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, L, R>) -> Self {
        state.cookie_key.clone()
    }
}

/// Create a signing key for cookies from a `secret` string.
pub fn create_cookie_key(secret: &str) -> Key {
    let hash = Sha512::digest(secret);

    Key::from(&hash)
}

/// The state needed for the auth middleware.
#[derive(Clone)]
pub struct AuthState {
    /// The key to be used for signing and encrypting private cookies.
    pub cookie_key: Key,
    /// The duration for which cookies used for authentication are valid.
    pub cookie_duration: Duration,
}

impl<U, L, R> FromRef<AppState<U, L, R>> for AuthState
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    fn from_ref(state: &AppState<U, L, R>) -> Self {
        Self {
            cookie_key: state.cookie_key.clone(),
            cookie_duration: state.cookie_duration,
        }
    }
}

// this impl tells `PrivateCookieJar` how to access the key from our state
impl FromRef<AuthState> for Key {
    fn from_ref(state: &AuthState) -> Self {
        state.cookie_key.clone()
    }
}
