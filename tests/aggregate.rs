mod common;

use common::{date, diet, exercise, noon, sleep, weight};
use vitalstats::core::aggregate::{self, MetricKind};
use vitalstats::core::bucket::Bucketizer;
use vitalstats::core::period::{self, DateRange, Period};
use vitalstats::core::stats;
use vitalstats::models::record::{DietEntry, HealthRecord, Meal};

fn march_days(from: u32, to: u32) -> Bucketizer {
    Bucketizer::new(
        Period::Month,
        DateRange::new(date(2024, 3, from), date(2024, 3, to)),
    )
}

fn values(result: &aggregate::AggregateResult) -> Vec<f64> {
    result.series.iter().map(|p| p.value).collect()
}

// ── sums ────────────────────────────────────────────────────────────────────

#[test]
fn test_calories_are_summed_per_day() {
    let b = march_days(1, 3);
    let records = vec![
        diet(500.0, date(2024, 3, 1)),
        diet(700.0, date(2024, 3, 1)),
        diet(300.0, date(2024, 3, 3)),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Calories);

    assert_eq!(values(&r), [1200.0, 0.0, 300.0]);
    assert_eq!(r.total, Some(1500.0));
    assert_eq!(r.count, 3);
    assert_eq!(r.average, 500.0);
}

#[test]
fn test_series_sums_to_total() {
    let b = march_days(1, 10);
    let records: Vec<HealthRecord> = (1..=10)
        .map(|d| exercise(d as f64 * 7.5, date(2024, 3, d)))
        .collect();
    let r = aggregate::aggregate(&records, &b, MetricKind::Exercise);

    let series_sum: f64 = r.series.iter().map(|p| p.value).sum();
    assert!((series_sum - r.total.unwrap()).abs() < 1e-9);
}

#[test]
fn test_average_is_per_record_not_per_bucket() {
    let b = march_days(1, 5);
    let records = vec![
        exercise(30.0, date(2024, 3, 2)),
        exercise(60.0, date(2024, 3, 2)),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Exercise);
    assert_eq!(r.average, 45.0);
    assert_eq!(r.count, 2);
}

#[test]
fn test_series_length_matches_buckets() {
    for p in [Period::Week, Period::Month, Period::Quarter, Period::Year] {
        let b = Bucketizer::new(p, period::resolve(p, noon(2024, 6, 12)));
        let r = aggregate::aggregate(&[], &b, MetricKind::Calories);
        assert_eq!(r.series.len(), b.len(), "{}", p);
    }
}

// ── filtering ───────────────────────────────────────────────────────────────

#[test]
fn test_empty_input_gives_zeros() {
    let b = march_days(1, 7);
    for metric in [MetricKind::Calories, MetricKind::Exercise, MetricKind::Sleep] {
        let r = aggregate::aggregate(&[], &b, metric);
        assert_eq!(r.count, 0);
        assert_eq!(r.average, 0.0);
        assert!(r.series.iter().all(|p| p.value == 0.0));
    }
}

#[test]
fn test_records_outside_buckets_are_ignored() {
    let b = march_days(10, 12);
    let records = vec![
        diet(400.0, date(2024, 3, 9)),
        diet(250.0, date(2024, 3, 11)),
        diet(900.0, date(2024, 3, 13)),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Calories);
    assert_eq!(r.total, Some(250.0));
    assert_eq!(r.count, 1);
}

#[test]
fn test_records_of_other_kinds_are_ignored() {
    let b = march_days(1, 3);
    let records = vec![
        diet(400.0, date(2024, 3, 1)),
        weight(80.0, date(2024, 3, 1)),
        exercise(20.0, date(2024, 3, 2)),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Calories);
    assert_eq!(r.total, Some(400.0));
    assert_eq!(r.count, 1);
}

#[test]
fn test_malformed_values_are_dropped() {
    let b = march_days(1, 3);
    let mut bad = DietEntry::new(
        common::OWNER.to_string(),
        Meal::Snack,
        "mystery".to_string(),
        f64::NAN,
        date(2024, 3, 2),
        "15:00".to_string(),
    );
    let records = vec![
        diet(300.0, date(2024, 3, 1)),
        HealthRecord::Diet(bad.clone()),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Calories);
    assert_eq!(r.total, Some(300.0));
    assert_eq!(r.count, 1);

    bad.calories = -50.0;
    let r = aggregate::aggregate(&[HealthRecord::Diet(bad)], &b, MetricKind::Calories);
    assert_eq!(r.count, 0);
}

// ── sleep ───────────────────────────────────────────────────────────────────

#[test]
fn test_sleep_has_no_total() {
    let b = march_days(1, 3);
    let r = aggregate::aggregate(&[sleep(8.0, date(2024, 3, 1))], &b, MetricKind::Sleep);
    assert_eq!(r.total, None);
    assert_eq!(r.average, 8.0);
}

#[test]
fn test_sleep_day_bucket_keeps_last_record() {
    let b = march_days(1, 2);
    let records = vec![sleep(6.0, date(2024, 3, 1)), sleep(8.0, date(2024, 3, 1))];
    let r = aggregate::aggregate(&records, &b, MetricKind::Sleep);

    assert_eq!(values(&r), [8.0, 0.0]);
    // the overall average still counts every record
    assert_eq!(r.average, 7.0);
    assert_eq!(r.count, 2);
}

#[test]
fn test_sleep_month_bucket_is_mean() {
    let b = Bucketizer::new(Period::Year, period::resolve(Period::Year, noon(2024, 3, 15)));
    let records = vec![
        sleep(6.0, date(2024, 1, 3)),
        sleep(8.0, date(2024, 1, 20)),
        sleep(7.0, date(2024, 3, 1)),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Sleep);

    assert_eq!(r.series.len(), 12);
    assert_eq!(r.series[0].value, 7.0);
    assert_eq!(r.series[1].value, 0.0);
    assert_eq!(r.series[2].value, 7.0);
}

#[test]
fn test_sleep_average_is_mean_of_counted_records() {
    let b = march_days(1, 7);
    let records = vec![
        sleep(7.5, date(2024, 3, 1)),
        sleep(6.5, date(2024, 3, 2)),
        sleep(9.0, date(2024, 3, 3)),
    ];
    let r = aggregate::aggregate(&records, &b, MetricKind::Sleep);
    let expected = (7.5 + 6.5 + 9.0) / 3.0;
    assert!((r.average - expected).abs() < 1e-9);
}

// ── summarize ───────────────────────────────────────────────────────────────

#[test]
fn test_summarize_is_deterministic() {
    let now = noon(2024, 3, 15);
    let diet_records = vec![diet(500.0, date(2024, 3, 14)), diet(600.0, date(2024, 3, 15))];
    let exercise_records = vec![exercise(30.0, date(2024, 3, 12))];
    let sleep_records = vec![sleep(7.0, date(2024, 3, 13))];

    let a = stats::summarize(Period::Week, now, &diet_records, &exercise_records, &sleep_records);
    let b = stats::summarize(Period::Week, now, &diet_records, &exercise_records, &sleep_records);
    assert_eq!(a, b);
    assert_eq!(a.calories.total, Some(1100.0));
    assert_eq!(a.exercise.total, Some(30.0));
    assert_eq!(a.sleep.average, 7.0);
    assert_eq!(a.calories.series.len(), 7);
}

#[test]
fn test_summarize_week_ignores_oldest_resolved_day() {
    let now = noon(2024, 3, 15);
    // 2024-03-08 is inside the resolved range but outside the seven buckets
    let diet_records = vec![diet(999.0, date(2024, 3, 8)), diet(100.0, date(2024, 3, 9))];
    let s = stats::summarize(Period::Week, now, &diet_records, &[], &[]);
    assert_eq!(s.calories.total, Some(100.0));
    assert_eq!(s.calories.series[0].value, 100.0);
}

#[test]
fn test_two_meals_on_new_year() {
    let b = Bucketizer::new(
        Period::Month,
        period::resolve(Period::Month, noon(2024, 1, 5)),
    );
    let records = vec![diet(300.0, date(2024, 1, 1)), diet(200.0, date(2024, 1, 1))];
    let r = aggregate::aggregate(&records, &b, MetricKind::Calories);

    assert_eq!(r.series[0].label, "Jan 1");
    assert_eq!(r.series[0].value, 500.0);
    assert_eq!(r.total, Some(500.0));
    assert_eq!(r.average, 250.0);
    assert_eq!(r.count, 2);
}

#[test]
fn test_later_sleep_record_replaces_earlier_one() {
    let b = march_days(1, 1);
    let records = vec![sleep(6.0, date(2024, 3, 1)), sleep(7.5, date(2024, 3, 1))];
    let r = aggregate::aggregate(&records, &b, MetricKind::Sleep);
    assert_eq!(r.series[0].value, 7.5);
}
