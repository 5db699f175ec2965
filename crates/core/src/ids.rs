//! Row identifiers.
//!
//! All three are `BIGSERIAL` keys in the store. Wrapping them keeps a user id
//! from being passed where a story id is expected (the argument order of the
//! ownership filters is easy to swap).

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub i64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoryId(pub i64);

/// Auto-incrementing id of a reading event; doubles as the tie-break when two
/// events share a `read_at`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReadingEventId(pub i64);

macro_rules! id_display {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<i64> for $ty {
            fn from(v: i64) -> Self {
                Self(v)
            }
        }
    )*};
}

id_display!(UserId, StoryId, ReadingEventId);
