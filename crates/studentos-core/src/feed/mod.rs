//! Best-effort external contest feeds.
//!
//! Callers treat every [`FeedError`](crate::error::FeedError) as
//! non-fatal: log it and keep showing the stored contests.

pub mod codeforces;

pub use codeforces::{CodeforcesClient, CodeforcesProfile};
