//! SQLite persistence for merchants, affiliates and orders.
//!
//! This module provides:
//! - Database initialization and migrations
//! - The `Store` capability trait consumed by the core services
//! - The `Repository` SQLite implementation

pub mod migrations;
pub mod repo;
pub mod store;

pub use migrations::init_db;
pub use repo::Repository;
pub use store::{RegisterOutcome, Store, StoreError};
