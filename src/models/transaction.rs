//! The expense and income models.
//!
//! Ledger rows are append-only: once recorded they are never updated or
//! deleted. The `New*` types carry the classification label and the amount as
//! separate named fields so the two cannot be transposed at a call site.

use time::OffsetDateTime;

use crate::{
    Error,
    models::{DatabaseID, UserID},
};

/// Money spent by a user, labelled with a category.
#[derive(Debug, Clone, PartialEq)]
pub struct Expense {
    id: DatabaseID,
    user_id: UserID,
    category: String,
    amount: f64,
    date: OffsetDateTime,
}

impl Expense {
    /// Create an expense record from the data in `new_expense` and the
    /// insertion instant `date`.
    ///
    /// Note that this function does not insert the expense into the
    /// application database, use [crate::stores::LedgerStore::create_expense]
    /// for that.
    pub fn new(id: DatabaseID, new_expense: NewExpense, date: OffsetDateTime) -> Self {
        Self {
            id,
            user_id: new_expense.user_id,
            category: new_expense.category,
            amount: new_expense.amount,
            date,
        }
    }

    /// The row ID of the expense.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The user that owns the expense.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The label the expense is grouped by in reports.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The amount of money spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The instant the expense was recorded.
    pub fn date(&self) -> OffsetDateTime {
        self.date
    }
}

/// The data for recording a new expense.
#[derive(Debug, Clone, PartialEq)]
pub struct NewExpense {
    user_id: UserID,
    category: String,
    amount: f64,
}

impl NewExpense {
    /// Create the data for a new expense and validate `amount`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if `amount` is not greater than zero.
    pub fn new(user_id: UserID, category: String, amount: f64) -> Result<Self, Error> {
        validate_amount(amount)?;

        Ok(Self {
            user_id,
            category,
            amount,
        })
    }

    /// The user that will own the expense.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// The label the expense is grouped by in reports.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// The amount of money spent.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

/// Money earned by a user, labelled with its source.
#[derive(Debug, Clone, PartialEq)]
pub struct Income {
    id: DatabaseID,
    user_id: UserID,
    source: String,
    amount: f64,
    date: OffsetDateTime,
}

impl Income {
    /// Create an income record from the data in `new_income` and the
    /// insertion instant `date`.
    ///
    /// Note that this function does not insert the income into the
    /// application database, use [crate::stores::LedgerStore::create_income]
    /// for that.
    pub fn new(id: DatabaseID, new_income: NewIncome, date: OffsetDateTime) -> Self {
        Self {
            id,
            user_id: new_income.user_id,
            source: new_income.source,
            amount: new_income.amount,
            date,
        }
    }

    /// The row ID of the income.
    pub fn id(&self) -> DatabaseID {
        self.id
    }

    /// The user that owns the income.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// Where the money came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The amount of money earned.
    pub fn amount(&self) -> f64 {
        self.amount
    }

    /// The instant the income was recorded.
    pub fn date(&self) -> OffsetDateTime {
        self.date
    }
}

/// The data for recording a new income.
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncome {
    user_id: UserID,
    source: String,
    amount: f64,
}

impl NewIncome {
    /// Create the data for a new income and validate `amount`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::InvalidAmount] if `amount` is not greater than zero.
    pub fn new(user_id: UserID, source: String, amount: f64) -> Result<Self, Error> {
        validate_amount(amount)?;

        Ok(Self {
            user_id,
            source,
            amount,
        })
    }

    /// The user that will own the income.
    pub fn user_id(&self) -> UserID {
        self.user_id
    }

    /// Where the money came from.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// The amount of money earned.
    pub fn amount(&self) -> f64 {
        self.amount
    }
}

fn validate_amount(amount: f64) -> Result<(), Error> {
    if amount > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidAmount(amount))
    }
}
