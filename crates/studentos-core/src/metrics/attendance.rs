//! Attendance percentage and the skip/need projections.
//!
//! Both projections are greedy one-class-at-a-time simulations over the
//! rounded percentage, so they agree exactly with what the course card
//! shows after each simulated class.

use crate::model::Course;

/// Upper bound on simulated classes. Reached only when the threshold is 0
/// (every absence is fine) or above 100 (unreachable).
pub const MAX_SIMULATED_CLASSES: u32 = 10_000;

/// `round(100 * attended / total)`, or 0 when nothing is recorded.
pub fn attendance_percentage(attended: u32, total: u32) -> u32 {
    if total == 0 {
        return 0;
    }
    let ratio = f64::from(attended) / f64::from(total);
    (ratio * 100.0).round() as u32
}

/// Percentage for a course's recorded log.
pub fn course_percentage(course: &Course) -> u32 {
    attendance_percentage(course.attended(), course.total())
}

/// How many consecutive absences keep the course at or above its threshold.
pub fn classes_skippable(course: &Course) -> u32 {
    let attended = course.attended();
    let mut total = course.total();
    if attendance_percentage(attended, total) < course.min_attendance {
        return 0;
    }

    let mut skippable = 0;
    while skippable < MAX_SIMULATED_CLASSES {
        if attendance_percentage(attended, total + 1) < course.min_attendance {
            break;
        }
        skippable += 1;
        total += 1;
    }
    skippable
}

/// How many consecutive presences bring the course back to its threshold.
pub fn classes_needed(course: &Course) -> u32 {
    let mut attended = course.attended();
    let mut total = course.total();
    if attendance_percentage(attended, total) >= course.min_attendance {
        return 0;
    }

    let mut needed = 0;
    while needed < MAX_SIMULATED_CLASSES {
        attended += 1;
        total += 1;
        needed += 1;
        if attendance_percentage(attended, total) >= course.min_attendance {
            break;
        }
    }
    needed
}

/// Present / total across every course, as a percentage.
pub fn average_attendance(courses: &[Course]) -> u32 {
    let (attended, total) = courses
        .iter()
        .fold((0u32, 0u32), |(a, t), c| (a.saturating_add(c.attended()), t.saturating_add(c.total())));
    attendance_percentage(attended, total)
}
