pub mod clock;
pub mod config;
pub mod constants;
pub mod database;
pub mod error;
pub mod expenses;
pub mod handlers;
pub mod memory;
pub mod models;
pub mod store;
pub mod utils;
