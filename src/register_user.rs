//! The route handler for creating a new user account.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    Error,
    models::{NewUser, PasswordHash, User},
    state::AppState,
    stores::{LedgerStore, ReportStore, UserStore},
};

/// The data sent to the register endpoint.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    /// The email address to register, must not be in use.
    pub email: String,
    /// The plaintext password. It is hashed before it reaches the user store.
    pub password: String,
    /// The user's display name.
    pub name: String,
    /// The user's date of birth in `YYYY-MM-DD` format.
    pub date_of_birth: String,
    /// An optional handle, must not be in use when set.
    pub username: Option<String>,
}

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Handler for user registration.
///
/// # Errors
///
/// Responds with `400 Bad Request` if the date of birth cannot be parsed,
/// `409 Conflict` if the email or username is already in use, and
/// `500 Internal Server Error` for storage or hashing failures.
pub async fn register_user<U, L, R>(
    State(mut state): State<AppState<U, L, R>>,
    Json(form): Json<RegisterForm>,
) -> Response
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    match create_user(&mut state.user_store, form) {
        Ok(user) => {
            tracing::info!("registered user {}", user.id().as_i64());

            (
                StatusCode::CREATED,
                Json(json!({ "message": "registration successful" })),
            )
                .into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Validate the registration form, hash the password and create the user.
///
/// The plaintext password is dropped as soon as it has been hashed, before
/// the store is touched.
fn create_user(store: &mut impl UserStore, form: RegisterForm) -> Result<User, Error> {
    let date_of_birth = Date::parse(&form.date_of_birth, DATE_FORMAT)
        .map_err(|_| Error::InvalidDate(form.date_of_birth.clone()))?;

    let password_hash = PasswordHash::new(&form.password, PasswordHash::DEFAULT_COST)?;

    store.create(NewUser {
        email: form.email,
        username: form.username,
        password_hash,
        name: form.name,
        date_of_birth,
    })
}
