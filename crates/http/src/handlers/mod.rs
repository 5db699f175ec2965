#![allow(clippy::single_call_fn, reason = "HTTP handlers are called once from router")]

pub mod reading;
pub mod stats;
pub mod stories;
