//! Fintrack is a small personal finance tracker.
//!
//! Users register with an email and password, log in, record expense and
//! income transactions, and request an aggregated report of their finances.
//!
//! This library provides the account and ledger service (credential storage,
//! the ledger and report aggregation) and a thin JSON REST API over it. The
//! authenticated identity is carried by a private cookie and threaded into
//! each request by a middleware, so the server itself holds no session state.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

mod auth_cookie;
mod auth_middleware;
mod db;
mod endpoints;
mod log_in;
mod log_out;
pub mod models;
mod register_user;
mod report;
mod routes;
mod state;
pub mod stores;
mod transaction;

pub use db::initialize as initialize_db;
pub use routes::build_router;
pub use state::AppState;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user provided an email and password combination that did not match
    /// a registered user. Whether the email or the password was wrong is
    /// deliberately not revealed.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// An operation that requires a logged in user was attempted without a
    /// valid auth cookie.
    #[error("this operation requires a logged in user")]
    NotAuthenticated,

    /// A string that should contain a calendar date could not be parsed.
    ///
    /// Callers should pass in the string that caused the error.
    #[error("could not parse \"{0}\" as a calendar date")]
    InvalidDate(String),

    /// A transaction was given a zero or negative amount.
    #[error("{0} is not a valid amount for a transaction")]
    InvalidAmount(f64),

    /// The email used to create a user is already in use. The client should
    /// try again with a different email address.
    #[error("the email is already in use")]
    DuplicateEmail,

    /// The username used to create a user is already in use. The client
    /// should try again with a different username.
    #[error("the username is already in use")]
    DuplicateUsername,

    /// A ledger row was given a user ID that does not refer to a registered
    /// user.
    #[error("the user ID does not refer to a registered user")]
    InvalidUser,

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server.
    /// When communicating with the application client this error should be
    /// replaced with a general error type indicating an internal server error.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            // Code 787 occurs when a FOREIGN KEY constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(_)) if sql_error.extended_code == 787 => {
                Error::InvalidUser
            }
            // Code 2067 occurs when a UNIQUE constraint failed.
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("users.email") =>
            {
                Error::DuplicateEmail
            }
            rusqlite::Error::SqliteFailure(sql_error, Some(ref desc))
                if sql_error.extended_code == 2067 && desc.contains("users.username") =>
            {
                Error::DuplicateUsername
            }
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "invalid email or password".to_owned(),
            ),
            Error::NotAuthenticated => (StatusCode::UNAUTHORIZED, "not logged in".to_owned()),
            Error::InvalidDate(date) => (
                StatusCode::BAD_REQUEST,
                format!("could not parse \"{date}\" as a date, use the format YYYY-MM-DD"),
            ),
            Error::InvalidAmount(amount) => (
                StatusCode::BAD_REQUEST,
                format!("amount must be greater than zero, got {amount}"),
            ),
            Error::DuplicateEmail => (StatusCode::CONFLICT, "the email is already in use".to_owned()),
            Error::DuplicateUsername => (
                StatusCode::CONFLICT,
                "the username is already in use".to_owned(),
            ),
            Error::NotFound => (
                StatusCode::NOT_FOUND,
                "the requested resource could not be found".to_owned(),
            ),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("request failed with an unexpected error: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_owned(),
                )
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::Error;

    #[test]
    fn duplicate_email_maps_to_conflict() {
        let response = Error::DuplicateEmail.into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn sql_error_maps_to_internal_server_error() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn missing_rows_map_to_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
