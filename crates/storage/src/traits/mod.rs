//! Storage backend trait abstraction
//!
//! Defines the async domain traits the service layer consumes. Implemented by
//! `PgStorage`, `MemoryStorage` and the dispatching `StorageBackend`.

pub mod quota;
pub mod reading;
pub mod story;

pub use quota::{QuotaStore, UserStore};
pub use reading::ReadingStore;
pub use story::StoryStore;
