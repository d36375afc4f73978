//! Ordering contract for planner task listings.
//!
//! Within a day, timed tasks come first in time order and untimed tasks
//! trail; ties fall to the newest id. Across days the full listing is
//! chronological with undated tasks last, and the after-date listing is
//! strictly exclusive.

use chrono::{NaiveDate, NaiveTime};
use focuswell_core::planner::NewTask;
use focuswell_core::storage::PlannerDb;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn time(s: &str) -> NaiveTime {
    NaiveTime::parse_from_str(s, "%H:%M").unwrap()
}

fn add(db: &PlannerDb, title: &str, due_date: Option<&str>, due_time: Option<&str>) -> i64 {
    let mut task = NewTask::new(title);
    task.due_date = due_date.map(date);
    task.due_time = due_time.map(time);
    db.create_task(&task).unwrap()
}

fn titles(tasks: &[focuswell_core::planner::Task]) -> Vec<&str> {
    tasks.iter().map(|t| t.title.as_str()).collect()
}

#[test]
fn timed_tasks_precede_untimed_within_a_day() {
    let db = PlannerDb::open_memory().unwrap();
    add(&db, "untimed", Some("2025-03-10"), None);
    add(&db, "late", Some("2025-03-10"), Some("09:00"));
    add(&db, "early", Some("2025-03-10"), Some("08:30"));

    let tasks = db.list_by_date(date("2025-03-10")).unwrap();
    assert_eq!(titles(&tasks), vec!["early", "late", "untimed"]);
}

#[test]
fn equal_slots_fall_to_the_newest_id() {
    let db = PlannerDb::open_memory().unwrap();
    let first = add(&db, "first", Some("2025-03-10"), Some("09:00"));
    let second = add(&db, "second", Some("2025-03-10"), Some("09:00"));
    let third = add(&db, "third", Some("2025-03-10"), None);
    let fourth = add(&db, "fourth", Some("2025-03-10"), None);

    let ids: Vec<i64> = db
        .list_by_date(date("2025-03-10"))
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec![second, first, fourth, third]);
}

#[test]
fn day_listing_ignores_other_days_and_undated_tasks() {
    let db = PlannerDb::open_memory().unwrap();
    add(&db, "today", Some("2025-03-10"), None);
    add(&db, "tomorrow", Some("2025-03-11"), None);
    add(&db, "someday", None, None);

    let tasks = db.list_by_date(date("2025-03-10")).unwrap();
    assert_eq!(titles(&tasks), vec!["today"]);
}

#[test]
fn after_date_is_strictly_exclusive_and_limited() {
    let db = PlannerDb::open_memory().unwrap();
    add(&db, "on the pivot", Some("2025-03-10"), None);
    add(&db, "someday", None, None);
    add(&db, "plus two", Some("2025-03-12"), None);
    add(&db, "plus one late", Some("2025-03-11"), Some("16:00"));
    add(&db, "plus one early", Some("2025-03-11"), Some("07:15"));
    add(&db, "plus three", Some("2025-03-13"), None);

    let tasks = db.list_after_date(date("2025-03-10"), 3).unwrap();
    assert_eq!(
        titles(&tasks),
        vec!["plus one early", "plus one late", "plus two"]
    );

    // A large limit only ever adds later days, never the pivot itself.
    let tasks = db.list_after_date(date("2025-03-10"), 100).unwrap();
    assert_eq!(
        titles(&tasks),
        vec!["plus one early", "plus one late", "plus two", "plus three"]
    );
}

#[test]
fn full_listing_puts_undated_tasks_last() {
    let db = PlannerDb::open_memory().unwrap();
    add(&db, "someday", None, None);
    add(&db, "wednesday", Some("2025-03-12"), None);
    add(&db, "monday timed", Some("2025-03-10"), Some("10:00"));
    add(&db, "monday untimed", Some("2025-03-10"), None);

    let tasks = db.list_all(true).unwrap();
    assert_eq!(
        titles(&tasks),
        vec!["monday timed", "monday untimed", "wednesday", "someday"]
    );
}

#[test]
fn full_listing_can_hide_completed_tasks() {
    let db = PlannerDb::open_memory().unwrap();
    let finished = add(&db, "finished", Some("2025-03-10"), None);
    add(&db, "open", Some("2025-03-11"), None);
    db.set_done(finished, true).unwrap();

    assert_eq!(titles(&db.list_all(false).unwrap()), vec!["open"]);
    assert_eq!(
        titles(&db.list_all(true).unwrap()),
        vec!["finished", "open"]
    );

    // Reopening brings it back into the pending view.
    db.set_done(finished, false).unwrap();
    assert_eq!(
        titles(&db.list_all(false).unwrap()),
        vec!["finished", "open"]
    );
}
