use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime};

use super::period::DateRange;
use crate::models::goal::{Goal, GoalType};
use crate::models::record::HealthRecord;

/// Days of history used for goals that carry no creation time.
const DEFAULT_WINDOW_DAYS: i64 = 30;

/// Whether the goal's deadline day has started before `now`.
pub fn deadline_passed(goal: &Goal, now: NaiveDateTime) -> bool {
    goal.deadline.and_time(NaiveTime::MIN) < now
}

/// Dates whose records count toward a goal: from its local creation day (or
/// the last 30 days) up to the deadline or today, whichever comes first.
pub fn window(goal: &Goal, now: NaiveDateTime) -> DateRange {
    let today = now.date();
    let start = goal
        .created_at
        .map(|c| c.with_timezone(&Local).date_naive())
        .unwrap_or_else(|| today - Duration::days(DEFAULT_WINDOW_DAYS));
    let end = if deadline_passed(goal, now) {
        goal.deadline
    } else {
        today
    };
    DateRange::new(start, end)
}

/// Completion percentage of `goal` in `0..=100`.
///
/// Only records of the goal's kind and owner dated inside [`window`] count.
/// Anything that prevents a meaningful figure (no data, non-positive target,
/// non-finite values) yields 0.
pub fn progress(goal: &Goal, records: &[HealthRecord], now: NaiveDateTime) -> u8 {
    if !goal.target.is_finite() || goal.target <= 0.0 {
        return 0;
    }
    let range = window(goal, now);
    let kind = goal.goal_type.record_kind();
    let mut values: Vec<(NaiveDate, f64)> = records
        .iter()
        .filter(|r| r.kind() == kind && r.owner_id() == goal.owner_id)
        .filter(|r| range.contains(r.date()))
        .map(|r| (r.date(), r.value()))
        .filter(|(_, v)| v.is_finite())
        .collect();

    let ratio = match goal.goal_type {
        GoalType::Weight => {
            values.sort_by_key(|(date, _)| *date);
            weight_ratio(&values, goal.target)
        }
        GoalType::Calories | GoalType::Exercise => {
            let sum: f64 = values.iter().map(|(_, v)| v).sum();
            Some(sum / goal.target)
        }
        GoalType::Sleep => {
            if values.is_empty() {
                None
            } else {
                let mean = values.iter().map(|(_, v)| v).sum::<f64>() / values.len() as f64;
                Some(mean / goal.target)
            }
        }
    };

    let Some(ratio) = ratio.filter(|r| r.is_finite()) else {
        return 0;
    };
    let pct = (ratio * 100.0).round().clamp(0.0, 100.0);
    if deadline_passed(goal, now) && pct >= 100.0 {
        return 100;
    }
    pct as u8
}

/// Share of the distance from the first in-window weight to the target that
/// the latest weight has covered. `values` must be in date order.
fn weight_ratio(values: &[(NaiveDate, f64)], target: f64) -> Option<f64> {
    let (_, first) = *values.first()?;
    let (_, latest) = *values.last()?;
    let target_change = (target - first).abs();
    if target_change < f64::EPSILON {
        return None;
    }
    Some((latest - first).abs() / target_change)
}
