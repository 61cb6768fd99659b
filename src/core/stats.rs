use anyhow::Result;
use chrono::NaiveDateTime;
use serde::Serialize;

use super::aggregate::{self, AggregateResult, MetricKind};
use super::bucket::Bucketizer;
use super::period::{self, DateRange, Period};
use crate::db::Database;
use crate::models::record::HealthRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Statistics {
    pub period: Period,
    pub range: DateRange,
    pub calories: AggregateResult,
    pub exercise: AggregateResult,
    pub sleep: AggregateResult,
}

/// Build period statistics from already-fetched records.
///
/// Pure: the same records and `now` always give the same result.
pub fn summarize(
    period: Period,
    now: NaiveDateTime,
    diet: &[HealthRecord],
    exercise: &[HealthRecord],
    sleep: &[HealthRecord],
) -> Statistics {
    let range = period::resolve(period, now);
    let bucketizer = Bucketizer::new(period, range);
    Statistics {
        period,
        range,
        calories: aggregate::aggregate(diet, &bucketizer, MetricKind::Calories),
        exercise: aggregate::aggregate(exercise, &bucketizer, MetricKind::Exercise),
        sleep: aggregate::aggregate(sleep, &bucketizer, MetricKind::Sleep),
    }
}

/// Fetch one owner's records for the period and summarize them.
pub fn compute(
    db: &Database,
    owner_id: &str,
    period: Period,
    now: NaiveDateTime,
) -> Result<Statistics> {
    let range = period::resolve(period, now);
    let fetch = |metric: MetricKind| db.find_in_range(metric.record_kind(), owner_id, &range);

    let diet = fetch(MetricKind::Calories)?;
    let exercise = fetch(MetricKind::Exercise)?;
    let sleep = fetch(MetricKind::Sleep)?;
    tracing::debug!(
        owner_id,
        %period,
        start = %range.start,
        end = %range.end,
        diet = diet.len(),
        exercise = exercise.len(),
        sleep = sleep.len(),
        "fetched records for statistics"
    );

    Ok(summarize(period, now, &diet, &exercise, &sleep))
}
