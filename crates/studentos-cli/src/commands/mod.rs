pub mod config;
pub mod contest;
pub mod course;
pub mod dashboard;
pub mod data;
pub mod event;
pub mod habit;
pub mod notify;
pub mod remind;
pub mod settings;
pub mod task;
pub mod timetable;
