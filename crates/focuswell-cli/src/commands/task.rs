//! Task planner commands.

use chrono::{NaiveDate, NaiveTime};
use clap::Subcommand;
use focuswell_core::planner::NewTask;
use focuswell_core::storage::PlannerDb;

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Add {
        /// Task title
        title: String,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<NaiveDate>,
        /// Due time (HH:MM)
        #[arg(long)]
        due_time: Option<String>,
    },
    /// List tasks
    List {
        /// Only tasks due on this date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "after")]
        date: Option<NaiveDate>,
        /// Only dated tasks strictly after this date (YYYY-MM-DD)
        #[arg(long)]
        after: Option<NaiveDate>,
        /// Maximum number of rows for --after
        #[arg(long, default_value = "50")]
        limit: u32,
        /// Hide completed tasks (full listing only)
        #[arg(long)]
        pending: bool,
    },
    /// Mark a task done
    Done {
        /// Task ID
        id: i64,
        /// Reopen the task instead
        #[arg(long)]
        undo: bool,
    },
    /// Set a task's due time
    SetTime {
        /// Task ID
        id: i64,
        /// Due time (HH:MM)
        time: String,
    },
    /// Clear a task's due time
    ClearTime {
        /// Task ID
        id: i64,
    },
    /// Delete a task
    Delete {
        /// Task ID
        id: i64,
    },
}

fn parse_time(raw: &str) -> Result<NaiveTime, Box<dyn std::error::Error>> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| format!("invalid time '{raw}', expected HH:MM").into())
}

pub fn run(action: TaskAction) -> Result<(), Box<dyn std::error::Error>> {
    let db = PlannerDb::open()?;

    match action {
        TaskAction::Add {
            title,
            due_date,
            due_time,
        } => {
            let mut task = NewTask::new(title);
            task.due_date = due_date;
            task.due_time = due_time.as_deref().map(parse_time).transpose()?;

            let id = db.create_task(&task)?;
            println!("Task created: {id}");
            if let Some(task) = db.get_task(id)? {
                println!("{}", serde_json::to_string_pretty(&task)?);
            }
        }
        TaskAction::List {
            date,
            after,
            limit,
            pending,
        } => {
            let tasks = if let Some(date) = date {
                db.list_by_date(date)?
            } else if let Some(after) = after {
                db.list_after_date(after, limit)?
            } else {
                db.list_all(!pending)?
            };
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Done { id, undo } => {
            if db.set_done(id, !undo)? {
                println!("Task {id} {}", if undo { "reopened" } else { "done" });
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::SetTime { id, time } => {
            let time = parse_time(&time)?;
            if db.set_due_time(id, Some(time))? {
                println!("Task {id} due at {}", time.format("%H:%M"));
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::ClearTime { id } => {
            if db.set_due_time(id, None)? {
                println!("Task {id} due time cleared");
            } else {
                println!("Task not found: {id}");
            }
        }
        TaskAction::Delete { id } => {
            if db.delete_task(id)? {
                println!("Task {id} deleted");
            } else {
                println!("Task not found: {id}");
            }
        }
    }

    Ok(())
}
