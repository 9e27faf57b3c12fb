//! The route handler for the financial report.

use axum::{
    Extension, Json,
    extract::State,
    response::{IntoResponse, Response},
};

use crate::{
    models::UserID,
    state::AppState,
    stores::{LedgerStore, ReportStore, UserStore},
};

/// Handler for fetching the financial report of the logged in user.
///
/// The report is computed from the ledger on every request, it is never
/// cached.
///
/// # Errors
///
/// Responds with `500 Internal Server Error` if the report cannot be
/// computed. A storage failure is never passed off as an empty report.
pub async fn get_report<U, L, R>(
    State(state): State<AppState<U, L, R>>,
    Extension(user_id): Extension<UserID>,
) -> Response
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    match state.report_store.generate(user_id) {
        Ok(report) => Json(report).into_response(),
        Err(error) => error.into_response(),
    }
}

#[cfg(test)]
mod report_tests {
    use axum::{
        Router,
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
        AppState, Error,
        auth_cookie::COOKIE_USER_ID,
        auth_middleware::auth_guard,
        endpoints,
        log_in::log_in,
        models::{NewUser, PasswordHash, Report, UserID},
        state::AuthState,
        stores::{
            ReportStore, UserStore,
            sqlite::{SQLAppState, SQLiteLedgerStore, SQLiteUserStore, create_app_state},
        },
        transaction::{create_expense, create_income},
    };

    use super::get_report;

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

    fn get_test_server(state: SQLAppState) -> TestServer {
        let app = Router::new()
            .route(endpoints::EXPENSES, post(create_expense))
            .route(endpoints::INCOME, post(create_income))
            .route(endpoints::REPORT, get(get_report))
            .route_layer(middleware::from_fn_with_state(
                AuthState::from_ref(&state),
                auth_guard,
            ))
            .route(endpoints::LOG_IN, post(log_in))
            .with_state(state);

        TestServer::new(app).expect("Could not create test server.")
    }

    async fn log_in_test_user(server: &TestServer) -> Cookie<'static> {
        let response = server
            .post(endpoints::LOG_IN)
            .content_type("application/json")
            .json(&json!({
                "email": "foo@bar.baz",
                "password": "averysafeandsecurepassword",
            }))
            .await;

        response.assert_status_ok();

        response.cookie(COOKIE_USER_ID)
    }

    #[tokio::test]
    async fn get_report_fails_when_not_logged_in() {
        let server = get_test_server(get_test_app_state());

        server
            .get(endpoints::REPORT)
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn get_report_returns_zeros_for_empty_ledger() {
        let server = get_test_server(get_test_app_state());
        let auth_cookie = log_in_test_user(&server).await;

        let response = server.get(endpoints::REPORT).add_cookie(auth_cookie).await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "total_income": 0.0,
            "total_expenses": 0.0,
            "category_breakdown": {},
            "net_balance": 0.0,
        }));
    }

    #[tokio::test]
    async fn get_report_aggregates_the_ledger() {
        let server = get_test_server(get_test_app_state());
        let auth_cookie = log_in_test_user(&server).await;

        for (source, amount) in [("salary", 100.0), ("side gig", 50.0)] {
            server
                .post(endpoints::INCOME)
                .add_cookie(auth_cookie.clone())
                .content_type("application/json")
                .json(&json!({ "source": source, "amount": amount }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        for (category, amount) in [("food", 30.0), ("food", 20.0), ("transport", 10.0)] {
            server
                .post(endpoints::EXPENSES)
                .add_cookie(auth_cookie.clone())
                .content_type("application/json")
                .json(&json!({ "category": category, "amount": amount }))
                .await
                .assert_status(StatusCode::CREATED);
        }

        let response = server.get(endpoints::REPORT).add_cookie(auth_cookie).await;

        response.assert_status_ok();

        let report: Report = response.json();
        assert_eq!(report.total_income, 150.0);
        assert_eq!(report.total_expenses, 60.0);
        assert_eq!(report.category_breakdown["food"], 50.0);
        assert_eq!(report.category_breakdown["transport"], 10.0);
        assert_eq!(report.net_balance, 90.0);
    }

    /// A report store whose backing storage always fails.
    #[derive(Clone)]
    struct FailingReportStore;

    impl ReportStore for FailingReportStore {
        fn generate(&self, _user_id: UserID) -> Result<Report, Error> {
            Err(Error::SqlError(rusqlite::Error::InvalidQuery))
        }
    }

    #[tokio::test]
    async fn get_report_storage_failure_is_an_error_not_an_empty_report() {
        let connection = Connection::open_in_memory().unwrap();
        crate::db::initialize(&connection).unwrap();

        let connection = std::sync::Arc::new(std::sync::Mutex::new(connection));
        let mut state = AppState::new(
            "foobar",
            SQLiteUserStore::new(connection.clone()),
            SQLiteLedgerStore::new(connection),
            FailingReportStore,
        );

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

        let app = Router::new()
            .route(endpoints::REPORT, get(get_report))
            .route_layer(middleware::from_fn_with_state(
                AuthState::from_ref(&state),
                auth_guard,
            ))
            .route(endpoints::LOG_IN, post(log_in))
            .with_state(state);

        let server = TestServer::new(app).expect("Could not create test server.");
        let auth_cookie = log_in_test_user(&server).await;

        let response = server.get(endpoints::REPORT).add_cookie(auth_cookie).await;

        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
