use time::Date;

use crate::error::{Result, ValidationError};
use crate::models::{ExpenseId, ExpenseRecord, RangeSummary};
use crate::store::RecordStore;
use crate::utils::{parse_amount, validate_description};

/// Validation and orchestration in front of a [`RecordStore`]. Holds no state
/// of its own beyond the store handle.
pub struct ExpenseService<S> {
    store: S,
}

impl<S: RecordStore> ExpenseService<S> {
    pub fn new(store: S) -> Self {
        ExpenseService { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn add_expense(
        &self,
        description: &str,
        amount_text: &str,
        category: &str,
    ) -> Result<ExpenseId> {
        validate_description(description)?;
        let amount = parse_amount(amount_text)?;

        let id = self.store.insert(description, amount, category).await?;
        tracing::info!(%id, amount, category, "expense added");
        Ok(id)
    }

    pub async fn delete_expense(&self, selection: Option<&ExpenseId>) -> Result<()> {
        let id = selection.ok_or(ValidationError::NoSelection)?;
        self.store.delete_by_id(id).await?;
        tracing::info!(%id, "expense deleted");
        Ok(())
    }

    pub async fn list_all_expenses(&self) -> Result<Vec<ExpenseRecord>> {
        self.store.list_all().await
    }

    pub async fn summarize_range(&self, start: Date, end: Date) -> Result<RangeSummary> {
        let records = self.store.list_in_range(start, end).await?;
        let total: f64 = records.iter().map(|record| record.amount).sum();
        tracing::debug!(%start, %end, count = records.len(), total, "summarized range");

        Ok(RangeSummary {
            start,
            end,
            records,
            total,
        })
    }

    pub async fn close(&self) -> Result<()> {
        self.store.close().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ExpenseError;
    use crate::memory::MemoryStore;

    fn service() -> ExpenseService<MemoryStore> {
        ExpenseService::new(MemoryStore::new())
    }

    #[tokio::test]
    async fn blank_description_never_reaches_store() {
        let service = service();
        let err = service.add_expense("  ", "10", "Food").await.unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::Validation(ValidationError::EmptyDescription)
        ));
        assert!(service.list_all_expenses().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn description_checked_before_amount() {
        let err = service().add_expense("", "abc", "Food").await.unwrap_err();
        assert!(matches!(
            err,
            ExpenseError::Validation(ValidationError::EmptyDescription)
        ));
    }

    #[tokio::test]
    async fn delete_without_selection_is_rejected() {
        let err = service().delete_expense(None).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "No item selected to delete!");
    }

    #[tokio::test]
    async fn empty_summary_totals_zero() {
        let service = service();
        let today = time::OffsetDateTime::now_utc().date();
        let summary = service.summarize_range(today, today).await.unwrap();
        assert!(summary.is_empty());
        assert_eq!(summary.total, 0.0);
    }
}
