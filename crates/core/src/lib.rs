//! Core types for readoku
//!
//! Domain types, the reference clock and the pure arithmetic shared by the
//! quota tracker, the reading ledger and the statistics engine. No I/O.

mod clock;
mod config;
mod constants;
mod env_config;
mod error;
mod ids;
mod ledger;
mod pagination;
mod quota;
mod stats;
mod story;

pub use clock::*;
pub use config::*;
pub use constants::*;
pub use error::*;
pub use ids::*;
pub use ledger::*;
pub use pagination::*;
pub use quota::*;
pub use stats::*;
pub use story::*;
