//! Ledger store for readoku
//!
//! Async store traits with a PostgreSQL backend (sqlx) and an in-process
//! backend, unified behind the enum-dispatched [`StorageBackend`].

mod backend;
pub mod error;
mod memory;
mod pg_migrations;
mod pg_storage;
#[cfg(test)]
mod tests;
pub mod traits;

pub use backend::StorageBackend;
pub use error::StorageError;
pub use memory::MemoryStorage;
pub use pg_storage::PgStorage;
