#![allow(dead_code, unused_macros)]

use finance_tracker::clock::ManualClock;
use finance_tracker::database::LibsqlStore;
use finance_tracker::expenses::ExpenseService;
use finance_tracker::memory::MemoryStore;
use finance_tracker::store::RecordStore;
use std::sync::Arc;
use tempfile::{TempDir, tempdir};
use time::{OffsetDateTime, macros::datetime};

// Oct 18, 2026 12:00:00 UTC
pub const TEST_START: OffsetDateTime = datetime!(2026-10-18 12:00 UTC);

pub async fn setup_libsql_store() -> (LibsqlStore, ManualClock, TempDir) {
    let temp_dir = tempdir().expect("Failed to create temporary directory");
    let data_path = temp_dir
        .path()
        .to_str()
        .expect("Failed to convert path to string")
        .to_string();

    let clock = ManualClock::new(TEST_START);
    let store = LibsqlStore::open_with_clock(&data_path, Arc::new(clock.clone()))
        .await
        .unwrap_or_else(|e| panic!("Failed to open expense store at {}: {}", data_path, e));

    (store, clock, temp_dir)
}

pub fn setup_memory_store() -> (MemoryStore, ManualClock) {
    let clock = ManualClock::new(TEST_START);
    let store = MemoryStore::with_clock(Arc::new(clock.clone()));
    (store, clock)
}

pub async fn record_count<S: RecordStore>(service: &ExpenseService<S>) -> usize {
    service
        .list_all_expenses()
        .await
        .expect("Failed to list expenses")
        .len()
}

/// Adds an expense as if it had been entered at `at`.
pub async fn add_expense_at<S: RecordStore>(
    service: &ExpenseService<S>,
    clock: &ManualClock,
    at: OffsetDateTime,
    description: &str,
    amount: &str,
    category: &str,
) -> finance_tracker::models::ExpenseId {
    clock.set(at);
    service
        .add_expense(description, amount, category)
        .await
        .unwrap_or_else(|e| panic!("Failed to add expense '{}': {}", description, e))
}

/// Generates one `#[tokio::test]` per backend for every listed generic test
/// function `async fn(ExpenseService<S>, ManualClock)`.
macro_rules! backend_tests {
    ($($name:ident),* $(,)?) => {
        mod libsql_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let (store, clock, _temp_dir) = crate::common::setup_libsql_store().await;
                    super::$name(finance_tracker::expenses::ExpenseService::new(store), clock).await;
                }
            )*
        }

        mod memory_backend {
            $(
                #[tokio::test]
                async fn $name() {
                    let (store, clock) = crate::common::setup_memory_store();
                    super::$name(finance_tracker::expenses::ExpenseService::new(store), clock).await;
                }
            )*
        }
    };
}
