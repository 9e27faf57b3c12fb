//! The route handler for logging in.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;
use serde::Deserialize;
use serde_json::json;

use crate::{
    Error,
    auth_cookie::set_auth_cookie,
    models::UserID,
    state::AppState,
    stores::{LedgerStore, ReportStore, UserStore},
};

/// The credentials sent to the log-in endpoint.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The email address the account was registered with.
    ///
    /// Clients may also send this field as `identifier`.
    #[serde(alias = "identifier")]
    pub email: String,
    /// The plaintext password to check against the stored hash.
    pub password: String,
}

/// Handler for log-in requests.
///
/// On success the response carries the auth cookie that the
/// [auth middleware](crate::auth_middleware) checks on protected routes.
///
/// # Errors
///
/// Responds with `401 Unauthorized` if the email is unknown or the password
/// does not match. Both cases produce the same response so that the endpoint
/// does not reveal which email addresses are registered.
pub async fn log_in<U, L, R>(
    State(state): State<AppState<U, L, R>>,
    jar: PrivateCookieJar,
    Json(credentials): Json<Credentials>,
) -> Response
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    match verify_credentials(&state.user_store, &credentials) {
        Ok(user_id) => {
            tracing::info!("user {} logged in", user_id.as_i64());

            let jar = set_auth_cookie(jar, user_id, state.cookie_duration);

            (jar, Json(json!({ "message": "login successful" }))).into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Look up the user by email and check the password against the stored hash.
fn verify_credentials(store: &impl UserStore, credentials: &Credentials) -> Result<UserID, Error> {
    let user = store.get_by_email(&credentials.email).map_err(|error| match error {
        Error::NotFound => Error::InvalidCredentials,
        error => error,
    })?;

    match user.password_hash().verify(&credentials.password) {
        Ok(true) => Ok(user.id()),
        Ok(false) => Err(Error::InvalidCredentials),
        Err(error) => Err(Error::HashingError(error.to_string())),
    }
}
