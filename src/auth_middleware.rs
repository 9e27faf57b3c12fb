//! Middleware that threads the authenticated identity into each request.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use axum_extra::extract::PrivateCookieJar;

use crate::{
    auth_cookie::{get_user_id_from_auth_cookie, set_auth_cookie},
    state::AuthState,
};

/// Middleware function that checks for a valid auth cookie.
///
/// If the cookie is valid, the user ID it holds is placed into the request
/// and the request is executed normally, with the cookie expiry pushed out by
/// the configured duration. Otherwise the request is rejected with
/// `401 Unauthorized` before any route handler runs.
///
/// **Note**: Route handlers can use the function argument
/// `Extension(user_id): Extension<UserID>` to receive the user ID.
pub async fn auth_guard(
    State(state): State<AuthState>,
    jar: PrivateCookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    match get_user_id_from_auth_cookie(&jar) {
        Ok(user_id) => {
            request.extensions_mut().insert(user_id);

            let jar = set_auth_cookie(jar, user_id, state.cookie_duration);
            let response = next.run(request).await;

            (jar, response).into_response()
        }
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod auth_guard_tests {
    use axum::{
        Extension, Router,
        extract::FromRef,
        http::StatusCode,
        middleware,
        routing::{get, post},
    };
    use axum_extra::extract::cookie::Cookie;
    use axum_test::TestServer;
    use rusqlite::Connection;
    use serde_json::json;
    use time::macros::date;

    use crate::{
        auth_cookie::COOKIE_USER_ID,
        endpoints,
        log_in::log_in,
        models::{NewUser, PasswordHash, UserID},
        state::AuthState,
        stores::{UserStore, sqlite::SQLAppState, sqlite::create_app_state},
    };

    use super::auth_guard;

    fn get_test_app_state() -> SQLAppState {
        let connection = Connection::open_in_memory().expect("Could not open database in memory.");
        let mut state =
            create_app_state(connection, "foobar").expect("Could not create app state.");

        state
            .user_store
            .create(NewUser {
                email: "foo@bar.baz".to_owned(),
                username: None,
                password_hash: PasswordHash::new("averysafeandsecurepassword", 4).unwrap(),
                name: "Jane Doe".to_owned(),
                date_of_birth: date!(1990 - 04 - 12),
            })
            .unwrap();

        state
    }

    async fn test_handler(Extension(user_id): Extension<UserID>) -> String {
        format!("Hello, user {}!", user_id.as_i64())
    }

    fn get_test_server(state: SQLAppState) -> TestServer {
        let app = Router::new()
            .route("/protected", get(test_handler))
            .route_layer(middleware::from_fn_with_state(
                AuthState::from_ref(&state),
                auth_guard,
            ))
            .route(endpoints::LOG_IN, post(log_in))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    #[tokio::test]
    async fn request_with_valid_cookie_reaches_the_handler() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .json(&json!({
                "email": "foo@bar.baz",
                "password": "averysafeandsecurepassword",
            }))
            .await;

        response.assert_status_ok();
        let auth_cookie = response.cookie(COOKIE_USER_ID);

        let response = server.get("/protected").add_cookie(auth_cookie).await;

        response.assert_status_ok();
        response.assert_text("Hello, user 1!");
    }

    #[tokio::test]
    async fn request_without_cookie_is_unauthorized() {
        let server = get_test_server(get_test_app_state());

        let response = server.get("/protected").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn request_with_garbage_cookie_is_unauthorized() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .get("/protected")
            .add_cookie(Cookie::new(COOKIE_USER_ID, "not-a-valid-private-cookie"))
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }
}
