//! Storage module for the entry database.

pub mod database;
pub mod entry_store;
pub mod schema;

pub use database::{Database, DatabaseError};
pub use entry_store::{EntryStore, StoreError};
