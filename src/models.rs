use serde::{Deserialize, Serialize};
use std::fmt;
use time::{Date, OffsetDateTime};

use crate::constants::{CURRENCY_LABEL, MSG_EMPTY_RANGE};

/// Store-assigned record identifier. Only the storage backends know what the
/// text inside means.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct ExpenseId(String);

impl ExpenseId {
    pub(crate) fn new(raw: impl Into<String>) -> Self {
        ExpenseId(raw.into())
    }

    /// Turns a selection coming from the shell into an id. Blank input means
    /// nothing was selected.
    pub fn from_selection(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(ExpenseId(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExpenseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ExpenseRecord {
    pub id: ExpenseId,
    pub description: String,
    pub amount: f64,
    pub category: String,
    #[serde(with = "time::serde::timestamp")]
    pub created_at: OffsetDateTime,
    pub month: u8,
    pub year: i32,
}

impl fmt::Display for ExpenseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `{:?}` keeps the trailing `.0` on whole amounts
        write!(
            f,
            "{} - {} {:?} - {} ({}/{})",
            self.description, CURRENCY_LABEL, self.amount, self.category, self.month, self.year
        )
    }
}

/// Records created inside `[start, end]` and the sum of their amounts.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeSummary {
    pub start: Date,
    pub end: Date,
    pub records: Vec<ExpenseRecord>,
    pub total: f64,
}

impl RangeSummary {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl fmt::Display for RangeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            f.write_str(MSG_EMPTY_RANGE)
        } else {
            write!(
                f,
                "Total Expense from {} to {} is {} {:.2}",
                self.start, self.end, CURRENCY_LABEL, self.total
            )
        }
    }
}

#[derive(Deserialize, Debug)]
pub struct CreateExpensePayload {
    pub description: String,
    pub amount: String,
    pub category: String,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct CreateExpenseResponse {
    pub id: ExpenseId,
}

#[derive(Deserialize, Debug)]
pub struct SummaryQuery {
    pub start: String,
    pub end: String,
}

#[derive(Serialize, Debug)]
pub struct SummaryResponse {
    pub start: String,
    pub end: String,
    pub records: Vec<ExpenseRecord>,
    pub total: f64,
    pub message: String,
}

impl From<RangeSummary> for SummaryResponse {
    fn from(summary: RangeSummary) -> Self {
        let message = summary.to_string();
        SummaryResponse {
            start: summary.start.to_string(),
            end: summary.end.to_string(),
            records: summary.records,
            total: summary.total,
            message,
        }
    }
}
