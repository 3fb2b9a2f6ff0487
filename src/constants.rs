// Server configuration
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: &str = "3000";
pub const DEFAULT_DATA_PATH: &str = "data";
pub const DEFAULT_STORE_BACKEND: &str = "sqlite";
pub const DEFAULT_UTC_OFFSET: &str = "+00:00";
pub const DEFAULT_LOG_FILTER: &str = "info";

// Storage
pub const DATABASE_FILE_NAME: &str = "expenses.db";

// Presentation
pub const CURRENCY_LABEL: &str = "Rs";
pub const CATEGORY_SUGGESTIONS: [&str; 4] = ["Food", "Transport", "Entertainment", "Other"];

// Messages
pub const MSG_EMPTY_RANGE: &str = "No expenses found for the selected date range.";
