use std::sync::Arc;
use time::Date;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::clock::{SharedClock, SystemClock};
use crate::error::{ExpenseError, Result};
use crate::models::{ExpenseId, ExpenseRecord};
use crate::store::{RecordStore, day_bounds};

/// Process-local store. Records live only as long as the store does; useful
/// for throwaway sessions and tests.
pub struct MemoryStore {
    records: RwLock<Option<Vec<ExpenseRecord>>>,
    clock: SharedClock,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock::default()))
    }

    pub fn with_clock(clock: SharedClock) -> Self {
        MemoryStore {
            records: RwLock::new(Some(Vec::new())),
            clock,
        }
    }
}

impl RecordStore for MemoryStore {
    async fn insert(&self, description: &str, amount: f64, category: &str) -> Result<ExpenseId> {
        let mut guard = self.records.write().await;
        let records = guard.as_mut().ok_or(ExpenseError::Closed)?;

        let id = ExpenseId::new(Uuid::new_v4().to_string());
        // Whole seconds, matching what the libsql backend persists
        let created_at = self
            .clock
            .now()
            .replace_nanosecond(0)
            .map_err(|e| ExpenseError::Storage(e.to_string()))?;
        records.push(ExpenseRecord {
            id: id.clone(),
            description: description.to_string(),
            amount,
            category: category.to_string(),
            created_at,
            month: u8::from(created_at.month()),
            year: created_at.year(),
        });

        tracing::debug!(%id, "inserted expense");
        Ok(id)
    }

    async fn delete_by_id(&self, id: &ExpenseId) -> Result<()> {
        let mut guard = self.records.write().await;
        let records = guard.as_mut().ok_or(ExpenseError::Closed)?;

        let before = records.len();
        records.retain(|record| &record.id != id);
        tracing::debug!(%id, affected = before - records.len(), "deleted expense");
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<ExpenseRecord>> {
        let guard = self.records.read().await;
        let records = guard.as_ref().ok_or(ExpenseError::Closed)?;
        Ok(records.clone())
    }

    async fn list_in_range(&self, start: Date, end: Date) -> Result<Vec<ExpenseRecord>> {
        let guard = self.records.read().await;
        let records = guard.as_ref().ok_or(ExpenseError::Closed)?;

        let (lo, hi) = day_bounds(start, end, self.clock.offset());
        Ok(records
            .iter()
            .filter(|record| record.created_at >= lo && record.created_at <= hi)
            .cloned()
            .collect())
    }

    async fn close(&self) -> Result<()> {
        let mut guard = self.records.write().await;
        if guard.take().is_some() {
            tracing::info!("closed in-memory expense store");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use time::macros::{date, datetime};
    use tokio_test::{assert_err, assert_ok, block_on};

    #[test]
    fn range_filter_uses_clock_instant() {
        let clock = ManualClock::new(datetime!(2026-10-02 08:00 UTC));
        let store = MemoryStore::with_clock(Arc::new(clock.clone()));

        block_on(async {
            assert_ok!(store.insert("Train", 17.25, "Transport").await);
            clock.set(datetime!(2026-10-04 08:00 UTC));
            assert_ok!(store.insert("Concert", 60.0, "Entertainment").await);

            let day = date!(2026 - 10 - 02);
            let records = assert_ok!(store.list_in_range(day, day).await);
            assert_eq!(records.len(), 1);
            assert_eq!(records[0].description, "Train");
        });
    }

    #[test]
    fn closed_store_rejects_reads() {
        let store = MemoryStore::new();
        block_on(async {
            assert_ok!(store.close().await);
            assert_err!(store.list_all().await);
        });
    }
}
