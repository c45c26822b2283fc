//! Task management commands for CLI.

use chrono::{DateTime, Utc};
use clap::Subcommand;
use serde::Serialize;
use serde_json::{Map, Value};
use studentos_core::metrics::{backlog_message, backlog_tasks, days_overdue};
use studentos_core::model::{Priority, Task, TaskCategory, TaskDraft, TaskType};
use studentos_core::{Config, DataStore, Patch};

use crate::context::{open_store, parse_assignment, parse_choice, parse_when, print_json, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Add a task
    Add {
        /// Task title
        title: String,
        /// assignment, quiz, exam, upsolve, chore or todo
        #[arg(long = "type", default_value = "todo", value_parser = |s: &str| parse_choice::<TaskType>("type", s))]
        task_type: TaskType,
        /// low, medium, high or critical
        #[arg(long, default_value = "medium", value_parser = |s: &str| parse_choice::<Priority>("priority", s))]
        priority: Priority,
        /// academic, career, life or other
        #[arg(long, value_parser = |s: &str| parse_choice::<TaskCategory>("category", s))]
        category: Option<TaskCategory>,
        /// Due date (RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD)
        #[arg(long, value_parser = parse_when)]
        due: Option<DateTime<Utc>>,
        /// Estimated hours of work
        #[arg(long)]
        hours: Option<f64>,
        #[arg(long)]
        description: Option<String>,
        /// Course this task belongs to
        #[arg(long)]
        course_id: Option<String>,
    },
    /// List tasks
    List {
        /// Include completed tasks
        #[arg(long)]
        all: bool,
        /// Filter by category
        #[arg(long, value_parser = |s: &str| parse_choice::<TaskCategory>("category", s))]
        category: Option<TaskCategory>,
    },
    /// Patch task fields by wire name (e.g. --set priority=high --set estimatedHours=3)
    Update {
        /// Task ID
        id: String,
        /// field=value, value read as JSON when possible; null clears a field
        #[arg(long = "set", value_parser = parse_assignment, required = true)]
        fields: Vec<(String, Value)>,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
        /// Mark it incomplete again
        #[arg(long)]
        undo: bool,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: String,
    },
    /// Overdue tasks with the backlog burner message
    Backlog,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct BacklogEntry<'a> {
    task: &'a Task,
    days_overdue: i64,
    message: &'static str,
}

fn print_task(store: &DataStore, id: &str) -> CliResult {
    let task = store
        .tasks()
        .iter()
        .find(|t| t.id == id)
        .ok_or_else(|| format!("Task not found: {id}"))?;
    print_json(task)
}

pub fn run(action: TaskAction, config: &Config) -> CliResult {
    let mut store = open_store(config)?;

    match action {
        TaskAction::Add {
            title,
            task_type,
            priority,
            category,
            due,
            hours,
            description,
            course_id,
        } => {
            let draft = TaskDraft {
                category: category.unwrap_or_default(),
                due_date: due,
                estimated_hours: hours,
                description,
                course_id,
                ..TaskDraft::new(title, task_type, priority)
            };
            let task = store.add_task(draft);
            print_json(&task)?;
        }
        TaskAction::List { all, category } => {
            let tasks: Vec<&Task> = store
                .tasks()
                .iter()
                .filter(|t| all || !t.completed)
                .filter(|t| category.map_or(true, |c| t.category == c))
                .collect();
            print_json(&tasks)?;
        }
        TaskAction::Update { id, fields } => {
            let map: Map<String, Value> = fields.into_iter().collect();
            let patch = Patch::from_json(&Value::Object(map).to_string())?;
            if !store.update_task(&id, &patch)? {
                return Err(format!("Task not found: {id}").into());
            }
            print_task(&store, &id)?;
        }
        TaskAction::Complete { id, undo } => {
            if !store.update_task(&id, &Patch::new().set("completed", !undo))? {
                return Err(format!("Task not found: {id}").into());
            }
            print_task(&store, &id)?;
        }
        TaskAction::Delete { id } => {
            if !store.delete_task(&id) {
                return Err(format!("Task not found: {id}").into());
            }
            println!("Task deleted: {id}");
        }
        TaskAction::Backlog => {
            let now = Utc::now();
            let tone = store.settings().backlog_burner_tone;
            let entries: Vec<BacklogEntry> = backlog_tasks(store.tasks(), &now)
                .into_iter()
                .filter_map(|task| {
                    let days = days_overdue(&task.due_date?, &now);
                    Some(BacklogEntry {
                        task,
                        days_overdue: days,
                        message: backlog_message(days, tone),
                    })
                })
                .collect();
            print_json(&entries)?;
        }
    }
    Ok(())
}
