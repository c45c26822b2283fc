//! Backlog burner: overdue tasks and the escalating nag ladder.

use chrono::{DateTime, Utc};

use crate::calendar::floor_days_between;
use crate::model::{BacklogTone, Task};

/// Whole days since `due`, floored. Negative while the task is not yet due.
pub fn days_overdue(due: &DateTime<Utc>, now: &DateTime<Utc>) -> i64 {
    floor_days_between(due, now)
}

/// Incomplete tasks due before `now`, oldest first.
pub fn backlog_tasks<'a>(tasks: &'a [Task], now: &DateTime<Utc>) -> Vec<&'a Task> {
    let mut backlog: Vec<&Task> = tasks.iter().filter(|t| t.is_overdue(now)).collect();
    backlog.sort_by_key(|t| t.due_date);
    backlog
}

/// Overdue bucket thresholds, longest first.
const BUCKETS: [i64; 4] = [30, 14, 7, 3];

fn bucket_index(days_overdue: i64) -> usize {
    BUCKETS
        .iter()
        .position(|&threshold| days_overdue >= threshold)
        .unwrap_or(BUCKETS.len())
}

/// Fixed message for the tone and overdue bucket (30, 14, 7, 3, else 1).
pub fn backlog_message(days_overdue: i64, tone: BacklogTone) -> &'static str {
    let ladder: [&'static str; 5] = match tone {
        BacklogTone::Gentle => [
            "A month has gone by. I believe in you - you can finish this! ✨",
            "Two weeks is quite a while. Let's tackle this together! 💪",
            "A week has passed. It's okay, just try to wrap this up soon! 🌟",
            "This has been pending for 3 days. Maybe give it some attention? 🙂",
            "Hey, this task is a day overdue. No worries, you've got this! 💙",
        ],
        BacklogTone::Firm => [
            "1 month overdue. This is unacceptable. Complete it today.",
            "2 weeks overdue. This is getting serious. Take action.",
            "1 week overdue. Stop procrastinating and finish this.",
            "3 days overdue. This needs your attention now.",
            "Task overdue by 1 day. Time to get moving. ⏰",
        ],
        BacklogTone::Savage => [
            "A MONTH?! Bro where is your assistant, you clearly don't know what to do with your day. 🔥💀",
            "2 weeks... I have no words. This is embarrassing. 🤦",
            "A WHOLE WEEK? At this point just delete it fam. 💀",
            "3 days and counting. Are you allergic to productivity? 🙄",
            "Bruh, it's been a day. What are you even doing? 😤",
        ],
    };
    ladder[bucket_index(days_overdue)]
}

fn one_decimal(value: f64) -> String {
    format!("{:.1}", (value * 10.0).round() / 10.0)
}

/// Study plan for the days left before an exam.
pub fn panic_mode_advice(days_until_exam: i64, chapters_remaining: u32) -> String {
    if days_until_exam <= 1 {
        return format!(
            "🚨 PANIC MODE ACTIVATED! {days_until_exam} day left, {chapters_remaining} chapters. \
             Focus on: 1) Important formulas/concepts 2) Past year questions 3) Quick revision notes. \
             Skip details, go for breadth over depth!"
        );
    }

    let per_day = f64::from(chapters_remaining) / days_until_exam as f64;
    let rate = one_decimal(per_day);
    if per_day > 3.0 {
        format!(
            "⚠️ High pressure! You need to cover {rate} chapters/day. Strategy: 1) Skim read first \
             2) Focus on examples 3) Make quick notes 4) Practice key problems only."
        )
    } else if per_day > 1.5 {
        format!(
            "📚 Moderate pace needed. {rate} chapters/day. Plan: 1) Read thoroughly \
             2) Solve important problems 3) Make revision notes 4) Take short breaks."
        )
    } else {
        format!(
            "✅ You're in good shape! {rate} chapters/day is manageable. Recommended: \
             1) Deep understanding 2) Solve all problems 3) Make detailed notes 4) Revise twice."
        )
    }
}
