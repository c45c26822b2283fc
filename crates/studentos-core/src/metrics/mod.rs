//! Pure derived metrics over the store's collections.
//!
//! Nothing here holds state; every function takes plain records and, where
//! time matters, an explicit "now".

pub mod attendance;
pub mod backlog;
pub mod streak;
pub mod upcoming;
pub mod workload;

pub use attendance::{
    attendance_percentage, average_attendance, classes_needed, classes_skippable, course_percentage,
    MAX_SIMULATED_CLASSES,
};
pub use backlog::{backlog_message, backlog_tasks, days_overdue, panic_mode_advice};
pub use streak::{
    activity_level, consistency_grid, derive_streak_logs, streak_from_dates, GridCell, DERIVED_LOG_DAYS, GRID_DAYS,
};
pub use upcoming::{
    date_label, detect_conflicts, schedule_items, upcoming_items, Conflict, ConflictKind, UpcomingItem,
    DEFAULT_UPCOMING_LIMIT,
};
pub use workload::{brain_bandwidth, BrainBandwidth, LoadBreakdown, MAX_LOAD};
