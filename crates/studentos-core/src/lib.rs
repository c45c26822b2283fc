//! # StudentOS Core Library
//!
//! The data and logic behind the StudentOS student dashboard: courses and
//! attendance, tasks, habits, events, competitive-programming contests and
//! the weekly timetable. Every operation is available through the
//! standalone `studentos` CLI, which is a thin layer over this crate.
//!
//! ## Architecture
//!
//! - **Metrics**: pure functions over plain records (attendance
//!   projections, workload score, backlog nags, conflicts, streaks)
//! - **Store**: owns every collection, applies add/update/delete, and
//!   writes a full snapshot after each mutation once hydrated
//! - **Storage**: JSON snapshot in a key/value blob store (SQLite on disk)
//!   with date revival on load, plus TOML configuration
//! - **Reminders**: a tick-driven scheduler; the caller invokes `tick()`
//!   on an interval
//! - **Feed**: best-effort Codeforces contest and profile client
//!
//! ## Key Components
//!
//! - [`DataStore`]: the domain store
//! - [`Persistence`]: snapshot save/load that never fails the caller
//! - [`ReminderScheduler`]: at-most-once reminders per process
//! - [`Config`]: application configuration management

pub mod calendar;
pub mod error;
pub mod feed;
pub mod metrics;
pub mod model;
pub mod reminders;
pub mod storage;
pub mod store;

pub use error::{ConfigError, CoreError, FeedError, Result, StorageError, ValidationError};
pub use feed::{CodeforcesClient, CodeforcesProfile};
pub use reminders::{Reminder, ReminderKind, ReminderScheduler, ToastSink};
pub use storage::{BlobStore, Config, MemoryBlobStore, Persistence, SqliteBlobStore};
pub use store::{DataStore, Patch, StoreState};
