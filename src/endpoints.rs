//! Defines the endpoint paths of the REST API.

/// Create a new user account.
pub const REGISTER: &str = "/api/register";
/// Log in and receive the auth cookie.
pub const LOG_IN: &str = "/api/log-in";
/// Log out and invalidate the auth cookie.
pub const LOG_OUT: &str = "/api/log-out";
/// Record an expense for the logged in user.
pub const EXPENSES: &str = "/api/expenses";
/// Record an income for the logged in user.
pub const INCOME: &str = "/api/income";
/// Get the financial report for the logged in user.
pub const REPORT: &str = "/api/report";
/// Ask the server for a cup of coffee.
pub const COFFEE: &str = "/coffee";
