use anyhow::Result;
use chrono::NaiveDate;
use serde::Serialize;

use super::period::DateRange;
use crate::db::Database;
use crate::models::record::{HealthRecord, RecordKind};

const RECENT_DIET: u32 = 3;
const RECENT_EXERCISE: u32 = 2;
const RECENT_LIMIT: usize = 5;

#[derive(Debug, Serialize)]
pub struct DashboardData {
    pub date: NaiveDate,
    pub calories: f64,
    pub exercise_minutes: f64,
    /// Hours from the last sleep record logged for today, one decimal.
    pub sleep_hours: f64,
    pub weight_kg: Option<f64>,
    pub recent_activities: Vec<Activity>,
}

#[derive(Debug, Serialize)]
pub struct Activity {
    pub title: String,
    pub time: String,
    #[serde(rename = "type")]
    pub kind: RecordKind,
}

/// Today's totals plus the most recent diet and exercise activity.
pub fn compute(db: &Database, owner_id: &str, today: NaiveDate) -> Result<DashboardData> {
    let day = DateRange::new(today, today);
    let diet = db.find_in_range(RecordKind::Diet, owner_id, &day)?;
    let exercise = db.find_in_range(RecordKind::Exercise, owner_id, &day)?;
    let sleep = db.find_in_range(RecordKind::Sleep, owner_id, &day)?;
    let weight = db.latest_weight(owner_id)?;

    let calories = diet.iter().map(HealthRecord::value).sum();
    let exercise_minutes = exercise.iter().map(HealthRecord::value).sum();
    let sleep_hours = sleep
        .last()
        .map(|r| (r.value() * 10.0).round() / 10.0)
        .unwrap_or(0.0);

    let mut recent_activities: Vec<Activity> = db
        .recent_records(RecordKind::Diet, owner_id, RECENT_DIET)?
        .into_iter()
        .chain(db.recent_records(RecordKind::Exercise, owner_id, RECENT_EXERCISE)?)
        .filter_map(activity)
        .collect();
    // "YYYY-MM-DD HH:MM" sorts chronologically as text
    recent_activities.sort_by(|a, b| b.time.cmp(&a.time));
    recent_activities.truncate(RECENT_LIMIT);

    Ok(DashboardData {
        date: today,
        calories,
        exercise_minutes,
        sleep_hours,
        weight_kg: weight.map(|w| w.weight_kg),
        recent_activities,
    })
}

fn activity(record: HealthRecord) -> Option<Activity> {
    match record {
        HealthRecord::Diet(e) => Some(Activity {
            title: format!("{} - {} kcal", e.food, e.calories),
            time: format!("{} {}", e.date, e.time),
            kind: RecordKind::Diet,
        }),
        HealthRecord::Exercise(e) => Some(Activity {
            title: format!("{} - {} min", e.kind, e.duration_minutes),
            time: format!("{} {}", e.date, e.time),
            kind: RecordKind::Exercise,
        }),
        _ => None,
    }
}
