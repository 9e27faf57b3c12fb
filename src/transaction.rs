//! The route handlers for recording expenses and income.

use axum::{
    Extension, Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{NewExpense, NewIncome, UserID},
    state::AppState,
    stores::{LedgerStore, ReportStore, UserStore},
};

/// The data sent to the expenses endpoint.
#[derive(Debug, Deserialize)]
pub struct ExpenseForm {
    /// The category to file the expense under, e.g. "food".
    pub category: String,
    /// The amount spent, must be greater than zero.
    pub amount: f64,
}

/// The data sent to the income endpoint.
#[derive(Debug, Deserialize)]
pub struct IncomeForm {
    /// Where the money came from, e.g. "salary".
    pub source: String,
    /// The amount received, must be greater than zero.
    pub amount: f64,
}

/// Handler for recording an expense for the logged in user.
///
/// # Errors
///
/// Responds with `400 Bad Request` if the amount is not greater than zero and
/// `500 Internal Server Error` for storage failures.
pub async fn create_expense<U, L, R>(
    State(mut state): State<AppState<U, L, R>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<ExpenseForm>,
) -> Response
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    let result = NewExpense::new(user_id, form.category, form.amount)
        .and_then(|new_expense| state.ledger_store.create_expense(new_expense));

    match result {
        Ok(expense) => {
            tracing::info!(
                "user {} recorded an expense of {} under {}",
                user_id.as_i64(),
                expense.amount(),
                expense.category()
            );

            (
                StatusCode::CREATED,
                Json(json!({ "message": "expense recorded" })),
            )
                .into_response()
        }
        Err(error) => error.into_response(),
    }
}

/// Handler for recording an income for the logged in user.
///
/// # Errors
///
/// Responds with `400 Bad Request` if the amount is not greater than zero and
/// `500 Internal Server Error` for storage failures.
pub async fn create_income<U, L, R>(
    State(mut state): State<AppState<U, L, R>>,
    Extension(user_id): Extension<UserID>,
    Json(form): Json<IncomeForm>,
) -> Response
where
    U: UserStore + Send + Sync,
    L: LedgerStore + Send + Sync,
    R: ReportStore + Send + Sync,
{
    let result = NewIncome::new(user_id, form.source, form.amount)
        .and_then(|new_income| state.ledger_store.create_income(new_income));

    match result {
        Ok(income) => {
            tracing::info!(
                "user {} recorded an income of {} from {}",
                user_id.as_i64(),
                income.amount(),
                income.source()
            );

            (
                StatusCode::CREATED,
                Json(json!({ "message": "income recorded" })),
            )
                .into_response()
        }
        Err(error) => error.into_response(),
    }
}
