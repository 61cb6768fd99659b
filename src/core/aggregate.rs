use serde::Serialize;

use super::bucket::Bucketizer;
use crate::models::record::{HealthRecord, RecordKind};

/// Metric charted by the statistics view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Sum of diet calories.
    Calories,
    /// Sum of exercise minutes.
    Exercise,
    /// Derived sleep hours, averaged rather than summed.
    Sleep,
}

impl MetricKind {
    pub fn record_kind(&self) -> RecordKind {
        match self {
            Self::Calories => RecordKind::Diet,
            Self::Exercise => RecordKind::Exercise,
            Self::Sleep => RecordKind::Sleep,
        }
    }

    /// Numeric payload of `record` for this metric, or `None` when the record
    /// is of another kind or carries an unusable value.
    fn extract(&self, record: &HealthRecord) -> Option<f64> {
        if record.kind() != self.record_kind() {
            return None;
        }
        let value = record.value();
        if !value.is_finite() || value < 0.0 {
            tracing::warn!(
                id = record.id(),
                kind = %record.kind(),
                value,
                "dropping record with malformed value"
            );
            return None;
        }
        Some(value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateResult {
    /// Absent for sleep, which only reports averages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<f64>,
    pub average: f64,
    pub count: usize,
    pub series: Vec<SeriesPoint>,
}

/// Reduce `records` into per-bucket values for one metric.
///
/// Records of other kinds, records with malformed values and records that
/// fall outside every bucket are skipped. Only bucketed records count
/// toward `total`, `average` and `count`, so the series always sums to the
/// total for calories and exercise. For a week this means records on the
/// oldest date of the resolved range (eight dates, seven buckets) are
/// fetched but not counted.
///
/// Sleep day buckets keep the value of the last record seen for that day, so
/// the result depends on the order of `records`. Callers pass records in
/// store insertion order.
pub fn aggregate(
    records: &[HealthRecord],
    bucketizer: &Bucketizer,
    metric: MetricKind,
) -> AggregateResult {
    let assigned: Vec<(usize, f64)> = records
        .iter()
        .filter_map(|r| {
            let value = metric.extract(r)?;
            let slot = bucketizer.assign(r.date())?;
            Some((slot, value))
        })
        .collect();

    let result = match metric {
        MetricKind::Calories | MetricKind::Exercise => summed(&assigned, bucketizer),
        MetricKind::Sleep => sleep(&assigned, bucketizer),
    };
    tracing::debug!(
        metric = ?metric,
        input = records.len(),
        counted = result.count,
        buckets = result.series.len(),
        "aggregated metric"
    );
    result
}

fn summed(assigned: &[(usize, f64)], bucketizer: &Bucketizer) -> AggregateResult {
    let mut values = vec![0.0; bucketizer.len()];
    for &(slot, value) in assigned {
        values[slot] += value;
    }
    let total: f64 = assigned.iter().map(|(_, v)| v).sum();
    let count = assigned.len();

    AggregateResult {
        total: Some(total),
        average: mean(total, count),
        count,
        series: series(bucketizer, values),
    }
}

fn sleep(assigned: &[(usize, f64)], bucketizer: &Bucketizer) -> AggregateResult {
    let mut values = vec![0.0; bucketizer.len()];
    if bucketizer.is_daily() {
        // last record for a day wins
        for &(slot, hours) in assigned {
            values[slot] = hours;
        }
    } else {
        let mut sums = vec![(0.0, 0usize); bucketizer.len()];
        for &(slot, hours) in assigned {
            sums[slot].0 += hours;
            sums[slot].1 += 1;
        }
        for (value, (sum, n)) in values.iter_mut().zip(sums) {
            *value = mean(sum, n);
        }
    }
    let total: f64 = assigned.iter().map(|(_, v)| v).sum();
    let count = assigned.len();

    AggregateResult {
        total: None,
        average: mean(total, count),
        count,
        series: series(bucketizer, values),
    }
}

fn series(bucketizer: &Bucketizer, values: Vec<f64>) -> Vec<SeriesPoint> {
    bucketizer
        .buckets()
        .iter()
        .zip(values)
        .map(|(b, value)| SeriesPoint {
            label: b.label.clone(),
            value,
        })
        .collect()
}

fn mean(sum: f64, count: usize) -> f64 {
    if count == 0 { 0.0 } else { sum / count as f64 }
}
