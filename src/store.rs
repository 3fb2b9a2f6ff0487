use std::future::Future;
use time::{Date, OffsetDateTime, UtcOffset, macros::time};

use crate::error::Result;
use crate::models::{ExpenseId, ExpenseRecord};

/// Persistence capability shared by every storage backend.
///
/// Records are listed in insertion order. Once `close` has been called every
/// other operation fails with [`ExpenseError::Closed`](crate::error::ExpenseError::Closed).
pub trait RecordStore: Send + Sync + 'static {
    /// Persists a new record stamped with the store clock's current instant
    /// and returns its freshly assigned id.
    fn insert(
        &self,
        description: &str,
        amount: f64,
        category: &str,
    ) -> impl Future<Output = Result<ExpenseId>> + Send;

    /// Removes the record if present. An unknown id is not an error.
    fn delete_by_id(&self, id: &ExpenseId) -> impl Future<Output = Result<()>> + Send;

    fn list_all(&self) -> impl Future<Output = Result<Vec<ExpenseRecord>>> + Send;

    /// Records created between the start of `start` and the end of `end`,
    /// both inclusive, with days read in the store clock's offset.
    fn list_in_range(
        &self,
        start: Date,
        end: Date,
    ) -> impl Future<Output = Result<Vec<ExpenseRecord>>> + Send;

    /// Releases the underlying storage. Calling it again is a no-op.
    fn close(&self) -> impl Future<Output = Result<()>> + Send;
}

/// First and last instant covered by the day range `[start, end]` when days
/// are read at `offset`.
pub fn day_bounds(start: Date, end: Date, offset: UtcOffset) -> (OffsetDateTime, OffsetDateTime) {
    (
        start.midnight().assume_offset(offset),
        end.with_time(time!(23:59:59.999_999_999)).assume_offset(offset),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::{date, datetime, offset};

    #[test]
    fn bounds_cover_whole_days() {
        let (lo, hi) = day_bounds(date!(2026 - 10 - 01), date!(2026 - 10 - 03), UtcOffset::UTC);
        assert_eq!(lo, datetime!(2026-10-01 0:00 UTC));
        assert_eq!(hi.unix_timestamp(), datetime!(2026-10-03 23:59:59 UTC).unix_timestamp());
        assert!(hi < datetime!(2026-10-04 0:00 UTC));
    }

    #[test]
    fn single_day_bounds() {
        let day = date!(2024 - 02 - 29);
        let (lo, hi) = day_bounds(day, day, UtcOffset::UTC);
        assert_eq!(lo.date(), day);
        assert_eq!(hi.date(), day);
    }

    #[test]
    fn bounds_follow_offset() {
        let day = date!(2026 - 11 - 01);
        let (lo, hi) = day_bounds(day, day, offset!(+9));
        assert_eq!(lo, datetime!(2026-10-31 15:00 UTC));
        assert_eq!(hi.unix_timestamp(), datetime!(2026-11-01 14:59:59 UTC).unix_timestamp());
    }
}
