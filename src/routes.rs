//! Assembles the REST API routes into the application router.

use axum::{
    Json, Router,
    extract::FromRef,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use serde_json::json;

use crate::{
    auth_middleware::auth_guard,
    endpoints,
    log_in::log_in,
    log_out::log_out,
    register_user::register_user,
    report::get_report,
    state::{AppState, AuthState},
    stores::{LedgerStore, ReportStore, UserStore},
    transaction::{create_expense, create_income},
};

/// Return a router with all the app's routes.
///
/// Routes that read or write a user's ledger are behind the
/// [auth middleware](crate::auth_middleware), everything else is reachable
/// without logging in.
pub fn build_router<U, L, R>(state: AppState<U, L, R>) -> Router
where
    U: UserStore + Clone + Send + Sync + 'static,
    L: LedgerStore + Clone + Send + Sync + 'static,
    R: ReportStore + Clone + Send + Sync + 'static,
{
    let unprotected_routes = Router::new()
        .route(endpoints::COFFEE, get(get_coffee))
        .route(endpoints::REGISTER, post(register_user))
        .route(endpoints::LOG_IN, post(log_in))
        .route(endpoints::LOG_OUT, post(log_out));

    let protected_routes = Router::new()
        .route(endpoints::EXPENSES, post(create_expense))
        .route(endpoints::INCOME, post(create_income))
        .route(endpoints::REPORT, get(get_report))
        .layer(middleware::from_fn_with_state(
            AuthState::from_ref(&state),
            auth_guard,
        ));

    protected_routes
        .merge(unprotected_routes)
        .fallback(get_404_not_found)
        .with_state(state)
}

/// Attempt to get a cup of coffee from the server.
async fn get_coffee() -> Response {
    (StatusCode::IM_A_TEAPOT, Json(json!({ "error": "I'm a teapot" }))).into_response()
}

async fn get_404_not_found() -> Response {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "not found" }))).into_response()
}
