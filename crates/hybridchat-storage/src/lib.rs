//! HybridChat Storage Layer
//!
//! SQLite-based persistence for host-side state that the hosted web
//! application asks the native shell to keep, organised as named
//! preference files holding string values.

mod database;
mod error;
mod migrations;
mod preferences;

pub use database::Database;
pub use error::StorageError;
pub use preferences::{KeyValueStore, Preferences};

pub type Result<T> = std::result::Result<T, StorageError>;
