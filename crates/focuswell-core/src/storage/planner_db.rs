//! SQLite-backed storage for the task planner.
//!
//! Dates are stored as TEXT: due dates as 'YYYY-MM-DD', due times as
//! 'HH:MM', timestamps as RFC3339. Missing values are stored as NULL,
//! never as empty strings; the list orderings depend on that.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::{data_dir, migrations};
use crate::error::{CoreError, DatabaseError, ValidationError};
use crate::planner::{NewTask, Task};

const DATE_FORMAT: &str = "%Y-%m-%d";
const TIME_FORMAT: &str = "%H:%M";

const TASK_COLUMNS: &str = "id, title, done, created_at, updated_at, due_date, due_time";

// === Helper Functions ===

/// Parse a timestamp from an RFC3339 string with fallback to now.
fn parse_datetime_fallback(dt_str: &str) -> DateTime<Utc> {
    DateTime::parse_from_rfc3339(dt_str)
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|_| Utc::now())
}

/// Parse an optional timestamp; malformed values read as absent.
fn parse_optional_datetime(raw: Option<String>) -> Option<DateTime<Utc>> {
    raw.as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_due_date(raw: Option<String>) -> Option<NaiveDate> {
    raw.as_deref()
        .and_then(|s| NaiveDate::parse_from_str(s, DATE_FORMAT).ok())
}

fn parse_due_time(raw: Option<String>) -> Option<NaiveTime> {
    raw.as_deref()
        .and_then(|s| NaiveTime::parse_from_str(s, TIME_FORMAT).ok())
}

fn format_due_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn format_due_time(time: NaiveTime) -> String {
    time.format(TIME_FORMAT).to_string()
}

/// Build a Task from a database row (column order of TASK_COLUMNS).
fn row_to_task(row: &rusqlite::Row) -> Result<Task, rusqlite::Error> {
    let created_at_str: String = row.get(3)?;
    let updated_at_str: Option<String> = row.get(4)?;
    let due_date_str: Option<String> = row.get(5)?;
    let due_time_str: Option<String> = row.get(6)?;

    Ok(Task {
        id: row.get(0)?,
        title: row.get(1)?,
        done: row.get(2)?,
        created_at: parse_datetime_fallback(&created_at_str),
        updated_at: parse_optional_datetime(updated_at_str),
        due_date: parse_due_date(due_date_str),
        due_time: parse_due_time(due_time_str),
    })
}

/// SQLite database for planner tasks and host checkpoints.
pub struct PlannerDb {
    conn: Connection,
}

impl PlannerDb {
    /// Open the planner database at `<data dir>/focuswell.db`.
    ///
    /// Creates the file and applies pending migrations.
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or migrated.
    pub fn open() -> Result<Self, CoreError> {
        let path = data_dir()?.join("focuswell.db");
        let conn = Connection::open(&path).map_err(|e| DatabaseError::OpenFailed {
            path: path.clone(),
            source: e,
        })?;
        log::debug!("opened planner database at {}", path.display());
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_memory() -> Result<Self, CoreError> {
        let conn = Connection::open_in_memory().map_err(|e| DatabaseError::OpenFailed {
            path: ":memory:".into(),
            source: e,
        })?;
        let db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&self) -> Result<(), CoreError> {
        migrations::migrate(&self.conn)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Insert a task and return its id.
    ///
    /// # Errors
    /// Returns a validation error when the trimmed title is empty.
    pub fn create_task(&self, task: &NewTask) -> Result<i64, CoreError> {
        let title = task.title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyField("title".into()).into());
        }

        self.conn.execute(
            "INSERT INTO tasks (title, done, created_at, due_date, due_time)
             VALUES (?1, 0, ?2, ?3, ?4)",
            params![
                title,
                Utc::now().to_rfc3339(),
                task.due_date.map(format_due_date),
                task.due_time.map(format_due_time),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Fetch a single task by id.
    pub fn get_task(&self, id: i64) -> Result<Option<Task>, rusqlite::Error> {
        self.conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                row_to_task,
            )
            .optional()
    }

    /// Tasks due on the given day. Timed tasks come first in time
    /// order, untimed tasks last, ties broken by newest id.
    pub fn list_by_date(&self, date: NaiveDate) -> Result<Vec<Task>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE due_date = ?1
             ORDER BY (due_time IS NULL), due_time ASC, id DESC"
        ))?;
        let tasks = stmt
            .query_map(params![format_due_date(date)], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Dated tasks strictly after the given day, soonest first.
    pub fn list_after_date(&self, date: NaiveDate, limit: u32) -> Result<Vec<Task>, rusqlite::Error> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks
             WHERE due_date IS NOT NULL AND due_date > ?1
             ORDER BY due_date ASC, (due_time IS NULL), due_time ASC, id DESC
             LIMIT ?2"
        ))?;
        let tasks = stmt
            .query_map(params![format_due_date(date), limit], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// All tasks, dated ones first in chronological order, undated
    /// last. Pass false to hide completed tasks.
    pub fn list_all(&self, include_done: bool) -> Result<Vec<Task>, rusqlite::Error> {
        let sql = if include_done {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 ORDER BY (due_date IS NULL), due_date ASC,
                          (due_time IS NULL), due_time ASC, id DESC"
            )
        } else {
            format!(
                "SELECT {TASK_COLUMNS} FROM tasks
                 WHERE done = 0
                 ORDER BY (due_date IS NULL), due_date ASC,
                          (due_time IS NULL), due_time ASC, id DESC"
            )
        };
        let mut stmt = self.conn.prepare(&sql)?;
        let tasks = stmt
            .query_map([], row_to_task)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(tasks)
    }

    /// Mark a task done or not done. Returns false when no task has
    /// the given id.
    pub fn set_done(&self, id: i64, done: bool) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "UPDATE tasks SET done = ?1, updated_at = ?2 WHERE id = ?3",
            params![done, Utc::now().to_rfc3339(), id],
        )?;
        Ok(changed > 0)
    }

    /// Set or clear a task's due time. Returns false when no task has
    /// the given id.
    pub fn set_due_time(&self, id: i64, due_time: Option<NaiveTime>) -> Result<bool, rusqlite::Error> {
        let changed = self.conn.execute(
            "UPDATE tasks SET due_time = ?1, updated_at = ?2 WHERE id = ?3",
            params![due_time.map(format_due_time), Utc::now().to_rfc3339(), id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a task. Returns false when no task has the given id.
    pub fn delete_task(&self, id: i64) -> Result<bool, rusqlite::Error> {
        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Get a value from the kv store.
    pub fn kv_get(&self, key: &str) -> Result<Option<String>, rusqlite::Error> {
        let mut stmt = self.conn.prepare("SELECT value FROM kv WHERE key = ?1")?;
        let result = stmt.query_row(params![key], |row| row.get::<_, String>(0));
        match result {
            Ok(v) => Ok(Some(v)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Set a value in the kv store.
    pub fn kv_set(&self, key: &str, value: &str) -> Result<(), rusqlite::Error> {
        self.conn.execute(
            "INSERT OR REPLACE INTO kv (key, value) VALUES (?1, ?2)",
            params![key, value],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
    }

    fn time(s: &str) -> NaiveTime {
        NaiveTime::parse_from_str(s, TIME_FORMAT).unwrap()
    }

    #[test]
    fn create_and_get_roundtrip() {
        let db = PlannerDb::open_memory().unwrap();
        let mut new_task = NewTask::new("  write report  ");
        new_task.due_date = Some(date("2025-03-10"));
        new_task.due_time = Some(time("08:30"));

        let id = db.create_task(&new_task).unwrap();
        let task = db.get_task(id).unwrap().unwrap();

        assert_eq!(task.title, "write report");
        assert!(!task.done);
        assert_eq!(task.due_date, Some(date("2025-03-10")));
        assert_eq!(task.due_time, Some(time("08:30")));
        assert_eq!(task.updated_at, None);
    }

    #[test]
    fn blank_title_is_rejected() {
        let db = PlannerDb::open_memory().unwrap();
        let result = db.create_task(&NewTask::new("   "));
        assert!(result.is_err());
        assert!(db.list_all(true).unwrap().is_empty());
    }

    #[test]
    fn mutations_stamp_updated_at_and_report_misses() {
        let db = PlannerDb::open_memory().unwrap();
        let id = db.create_task(&NewTask::new("stretch")).unwrap();

        assert!(db.set_done(id, true).unwrap());
        let task = db.get_task(id).unwrap().unwrap();
        assert!(task.done);
        assert!(task.updated_at.is_some());

        assert!(!db.set_done(id + 1, true).unwrap());
        assert!(!db.delete_task(id + 1).unwrap());
        assert!(db.delete_task(id).unwrap());
        assert_eq!(db.get_task(id).unwrap(), None);
    }

    #[test]
    fn due_time_can_be_set_and_cleared() {
        let db = PlannerDb::open_memory().unwrap();
        let mut new_task = NewTask::new("call dentist");
        new_task.due_date = Some(date("2025-03-11"));
        let id = db.create_task(&new_task).unwrap();

        assert!(db.set_due_time(id, Some(time("14:45"))).unwrap());
        assert_eq!(
            db.get_task(id).unwrap().unwrap().due_time,
            Some(time("14:45"))
        );

        assert!(db.set_due_time(id, None).unwrap());
        assert_eq!(db.get_task(id).unwrap().unwrap().due_time, None);
    }

    #[test]
    fn kv_roundtrip_and_overwrite() {
        let db = PlannerDb::open_memory().unwrap();
        assert_eq!(db.kv_get("engine").unwrap(), None);

        db.kv_set("engine", "{\"phase\":\"work\"}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().as_deref(), Some("{\"phase\":\"work\"}"));

        db.kv_set("engine", "{\"phase\":\"break\"}").unwrap();
        assert_eq!(db.kv_get("engine").unwrap().as_deref(), Some("{\"phase\":\"break\"}"));
    }
}
