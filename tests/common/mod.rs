#![allow(dead_code)]

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use tempfile::TempDir;
use vitalstats::db::Database;
use vitalstats::models::goal::{Goal, GoalType};
use vitalstats::models::record::{
    DietEntry, ExerciseEntry, ExerciseKind, HealthRecord, Intensity, Meal, SleepEntry,
    SleepQuality, WeightEntry,
};

pub const OWNER: &str = "local";

/// Create a temporary database for testing.
pub fn setup_db() -> (TempDir, Database) {
    let dir = TempDir::new().unwrap();
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).unwrap();
    (dir, db)
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Noon on the given day, used as the reference "now".
pub fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
    date(y, m, d).and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap())
}

pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, min, 0).unwrap()
}

pub fn diet(calories: f64, on: NaiveDate) -> HealthRecord {
    DietEntry::new(
        OWNER.to_string(),
        Meal::Lunch,
        "rice".to_string(),
        calories,
        on,
        "12:00".to_string(),
    )
    .into()
}

pub fn exercise(minutes: f64, on: NaiveDate) -> HealthRecord {
    ExerciseEntry::new(
        OWNER.to_string(),
        ExerciseKind::Running,
        minutes,
        Intensity::Medium,
        on,
        "07:00".to_string(),
    )
    .into()
}

/// Sleep of `hours` ending at 07:00 on `on`.
pub fn sleep(hours: f64, on: NaiveDate) -> HealthRecord {
    let wake = on.and_hms_opt(7, 0, 0).unwrap();
    let bed = wake - chrono::Duration::minutes((hours * 60.0) as i64);
    SleepEntry::new(OWNER.to_string(), bed, wake, SleepQuality::Good, on).into()
}

pub fn weight(kg: f64, on: NaiveDate) -> HealthRecord {
    WeightEntry::new(OWNER.to_string(), kg, on, "08:00".to_string()).into()
}

/// A UTC instant for a local wall-clock time.
pub fn local_instant(wall: NaiveDateTime) -> chrono::DateTime<Utc> {
    Local
        .from_local_datetime(&wall)
        .earliest()
        .unwrap()
        .with_timezone(&Utc)
}

/// A goal created at local midnight on `created` with the given deadline.
pub fn goal(goal_type: GoalType, target: f64, created: NaiveDate, deadline: NaiveDate) -> Goal {
    let mut g = Goal::new(
        OWNER.to_string(),
        goal_type,
        target,
        deadline,
        String::new(),
    );
    g.created_at = Some(local_instant(created.and_hms_opt(0, 0, 0).unwrap()));
    g
}
