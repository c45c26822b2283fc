//! Course management and attendance commands.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;
use studentos_core::metrics::{average_attendance, classes_needed, classes_skippable, course_percentage};
use studentos_core::model::{Course, CourseDraft, CourseType, DEFAULT_MIN_ATTENDANCE};
use studentos_core::Config;

use crate::context::{open_store, parse_choice, parse_when, print_json, CliResult};

#[derive(Subcommand)]
pub enum CourseAction {
    /// Add a course
    Add {
        /// Course name
        name: String,
        /// Course code (e.g. "CS301")
        code: String,
        #[arg(long)]
        instructor: Option<String>,
        #[arg(long)]
        credits: Option<u32>,
        /// Minimum attendance percentage
        #[arg(long, default_value_t = DEFAULT_MIN_ATTENDANCE)]
        min_attendance: u32,
        /// core or elective
        #[arg(long = "type", value_parser = |s: &str| parse_choice::<CourseType>("type", s))]
        course_type: Option<CourseType>,
        #[arg(long)]
        color: Option<String>,
        /// Reminder shown on the course card
        #[arg(long)]
        dont_forget: Option<String>,
    },
    /// List courses
    List,
    /// Record one class for a course
    Attend {
        /// Course ID
        id: String,
        /// Mark the class as missed
        #[arg(long)]
        absent: bool,
        /// Class date (defaults to now)
        #[arg(long, value_parser = parse_when)]
        date: Option<DateTime<Utc>>,
    },
    /// Attendance percentage and skip/need projections
    Stats {
        /// Only this course
        id: Option<String>,
    },
    /// Replace all courses with the drafts in a JSON file
    Onboard {
        /// JSON array of courses ({"name", "code", ...})
        file: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CourseStats<'a> {
    id: &'a str,
    code: &'a str,
    name: &'a str,
    attended: u32,
    total: u32,
    percentage: u32,
    min_attendance: u32,
    can_skip: u32,
    must_attend: u32,
}

impl<'a> From<&'a Course> for CourseStats<'a> {
    fn from(course: &'a Course) -> Self {
        Self {
            id: &course.id,
            code: &course.code,
            name: &course.name,
            attended: course.attended(),
            total: course.total(),
            percentage: course_percentage(course),
            min_attendance: course.min_attendance,
            can_skip: classes_skippable(course),
            must_attend: classes_needed(course),
        }
    }
}

pub fn run(action: CourseAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        CourseAction::Add {
            name,
            code,
            instructor,
            credits,
            min_attendance,
            course_type,
            color,
            dont_forget,
        } => {
            let draft = CourseDraft {
                instructor,
                credits,
                min_attendance,
                course_type,
                color,
                dont_forget,
                ..CourseDraft::new(name, code)
            };
            let course = store.add_course(draft);
            print_json(&course)?;
        }
        CourseAction::List => print_json(store.courses())?,
        CourseAction::Attend { id, absent, date } => {
            let date = date.unwrap_or_else(Utc::now);
            if !store.record_attendance(&id, date, !absent) {
                return Err(format!("Course not found: {id}").into());
            }
            let course = store
                .courses()
                .iter()
                .find(|c| c.id == id)
                .ok_or_else(|| format!("Course not found: {id}"))?;
            print_json(&CourseStats::from(course))?;
        }
        CourseAction::Stats { id } => match id {
            Some(id) => {
                let course = store
                    .courses()
                    .iter()
                    .find(|c| c.id == id)
                    .ok_or_else(|| format!("Course not found: {id}"))?;
                print_json(&CourseStats::from(course))?;
            }
            None => {
                let courses: Vec<CourseStats> = store.courses().iter().map(CourseStats::from).collect();
                print_json(&serde_json::json!({
                    "average": average_attendance(store.courses()),
                    "courses": courses,
                }))?;
            }
        },
        CourseAction::Onboard { file } => {
            let text = std::fs::read_to_string(&file)?;
            let drafts: Vec<CourseDraft> = serde_json::from_str(&text)?;
            let courses = store.onboard_courses(drafts);
            print_json(&courses)?;
        }
    }
    Ok(())
}
