//! Service layer for readoku
//!
//! Quota tracking, the reading ledger and statistics between the HTTP
//! handlers and storage/llm. Every operation takes `now` explicitly.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(clippy::missing_errors_doc, reason = "Errors are self-explanatory from Result types")]
#![allow(missing_debug_implementations, reason = "Internal types")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::min_ident_chars, reason = "Short error vars are idiomatic")]

mod error;
mod quota_service;
mod reading_service;
mod stats_service;
mod story_service;

#[cfg(test)]
mod tests;

pub use error::ServiceError;
pub use quota_service::{GenerationPermit, QuotaService};
pub use reading_service::ReadingService;
pub use stats_service::StatsService;
pub use story_service::StoryService;
