//! Storage gateway: SQLite pool handle, embedded migrations, configuration
//! and first-run demo data.

pub mod app_config;
pub mod database;
pub mod seed;

pub use app_config::Config;
pub use database::Db;
