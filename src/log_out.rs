//! The route handler for logging out.

use axum::{Json, response::{IntoResponse, Response}};
use axum_extra::extract::PrivateCookieJar;
use serde_json::json;

use crate::auth_cookie::invalidate_auth_cookie;

/// Handler for log-out requests.
///
/// Invalidates the auth cookie so later requests to protected routes are
/// rejected. Logging out while not logged in is not an error.
pub async fn log_out(jar: PrivateCookieJar) -> Response {
    let jar = invalidate_auth_cookie(jar);

    (jar, Json(json!({ "message": "logged out" }))).into_response()
}
