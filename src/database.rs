use libsql::{Builder, Connection};
use std::{path::Path, sync::Arc};
use time::{Date, OffsetDateTime, UtcOffset};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::{SharedClock, SystemClock};
use crate::constants::DATABASE_FILE_NAME;
use crate::error::{ExpenseError, Result};
use crate::models::{ExpenseId, ExpenseRecord};
use crate::store::{RecordStore, day_bounds};

const CREATE_EXPENSES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS expenses (
    id           TEXT    PRIMARY KEY NOT NULL,
    description  TEXT    NOT NULL,
    amount       REAL    NOT NULL,
    category     TEXT    NOT NULL,
    created_at   INTEGER NOT NULL,
    month        INTEGER NOT NULL,
    year         INTEGER NOT NULL
);
"#;

const CREATE_CREATED_AT_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_expenses_created_at ON expenses (created_at)";

const SELECT_COLUMNS: &str =
    "SELECT id, description, amount, category, created_at, month, year FROM expenses";

/// Embedded relational store backed by a local libsql database file
/// (`<data_dir>/expenses.db`).
pub struct LibsqlStore {
    conn: RwLock<Option<Connection>>,
    clock: SharedClock,
}

impl LibsqlStore {
    pub async fn open(data_dir: &str) -> Result<Self> {
        Self::open_with_clock(data_dir, Arc::new(SystemClock::default())).await
    }

    pub async fn open_with_clock(data_dir: &str, clock: SharedClock) -> Result<Self> {
        let conn = connect(data_dir)
            .await
            .map_err(|e| ExpenseError::Connection(e.to_string()))?;
        tracing::info!(data_dir, "opened libsql expense store");

        Ok(LibsqlStore {
            conn: RwLock::new(Some(conn)),
            clock,
        })
    }
}

async fn connect(data_dir: &str) -> anyhow::Result<Connection> {
    tokio::fs::create_dir_all(data_dir).await?;
    let path = Path::new(data_dir).join(DATABASE_FILE_NAME);
    let db = Builder::new_local(path).build().await?;
    let conn = db.connect()?;

    conn.execute(CREATE_EXPENSES_TABLE, ()).await?;
    conn.execute(CREATE_CREATED_AT_INDEX, ()).await?;
    Ok(conn)
}

/// Decodes one `SELECT_COLUMNS` row. `created_at` is stored as unix seconds
/// and comes back expressed at `offset`.
pub fn extract_record_from_row(row: libsql::Row, offset: UtcOffset) -> Result<ExpenseRecord> {
    let column_error = |field: &str, e: libsql::Error| {
        ExpenseError::Storage(format!("Failed to get expense {}: {}", field, e))
    };

    let id: String = row.get(0).map_err(|e| column_error("id", e))?;
    let description: String = row.get(1).map_err(|e| column_error("description", e))?;
    let amount: f64 = row.get(2).map_err(|e| column_error("amount", e))?;
    let category: String = row.get(3).map_err(|e| column_error("category", e))?;
    let timestamp: i64 = row.get(4).map_err(|e| column_error("created_at", e))?;
    let month: i64 = row.get(5).map_err(|e| column_error("month", e))?;
    let year: i64 = row.get(6).map_err(|e| column_error("year", e))?;

    let created_at = OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| {
            ExpenseError::Storage(format!("Invalid expense created_at {}: {}", timestamp, e))
        })?
        .to_offset(offset);
    let month = u8::try_from(month)
        .map_err(|_| ExpenseError::Storage(format!("Invalid expense month: {}", month)))?;
    let year = i32::try_from(year)
        .map_err(|_| ExpenseError::Storage(format!("Invalid expense year: {}", year)))?;

    Ok(ExpenseRecord {
        id: ExpenseId::new(id),
        description,
        amount,
        category,
        created_at,
        month,
        year,
    })
}

async fn collect_records(mut rows: libsql::Rows, offset: UtcOffset) -> Result<Vec<ExpenseRecord>> {
    let mut records = Vec::new();
    while let Some(row) = rows.next().await? {
        records.push(extract_record_from_row(row, offset)?);
    }
    Ok(records)
}

impl RecordStore for LibsqlStore {
    async fn insert(&self, description: &str, amount: f64, category: &str) -> Result<ExpenseId> {
        let guard = self.conn.write().await;
        let conn = guard.as_ref().ok_or(ExpenseError::Closed)?;

        let id = Uuid::new_v4().to_string();
        let created_at = self.clock.now();
        let month = u8::from(created_at.month());

        conn.execute(
            "INSERT INTO expenses (id, description, amount, category, created_at, month, year) VALUES (?, ?, ?, ?, ?, ?, ?)",
            (
                id.as_str(),
                description,
                amount,
                category,
                created_at.unix_timestamp(),
                i64::from(month),
                i64::from(created_at.year()),
            ),
        )
        .await
        .map_err(|e| ExpenseError::Storage(format!("Failed to create expense: {}", e)))?;

        tracing::debug!(%id, "inserted expense");
        Ok(ExpenseId::new(id))
    }

    async fn delete_by_id(&self, id: &ExpenseId) -> Result<()> {
        let guard = self.conn.write().await;
        let conn = guard.as_ref().ok_or(ExpenseError::Closed)?;

        let affected = conn
            .execute("DELETE FROM expenses WHERE id = ?", [id.as_str()])
            .await
            .map_err(|e| ExpenseError::Storage(format!("Failed to delete expense: {}", e)))?;

        tracing::debug!(%id, affected, "deleted expense");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>> {
        let guard = self.conn.read().await;
        let conn = guard.as_ref().ok_or(ExpenseError::Closed)?;

        let rows = conn
            .query(&format!("{} ORDER BY rowid ASC", SELECT_COLUMNS), ())
            .await
            .map_err(|e| ExpenseError::Storage(format!("Failed to query expenses: {}", e)))?;
        collect_records(rows, self.clock.offset()).await
    }

    async fn list_in_range(&self, start: Date, end: Date) -> Result<Vec<ExpenseRecord>> {
        let guard = self.conn.read().await;
        let conn = guard.as_ref().ok_or(ExpenseError::Closed)?;

        let (lo, hi) = day_bounds(start, end, self.clock.offset());
        let rows = conn
            .query(
                &format!(
                    "{} WHERE created_at BETWEEN ? AND ? ORDER BY rowid ASC",
                    SELECT_COLUMNS
                ),
                (lo.unix_timestamp(), hi.unix_timestamp()),
            )
            .await
            .map_err(|e| ExpenseError::Storage(format!("Failed to query expenses: {}", e)))?;
        collect_records(rows, self.clock.offset()).await
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self.conn.write().await;
        if guard.take().is_some() {
            tracing::info!("closed libsql expense store");
        }
        Ok(())
    }
}
