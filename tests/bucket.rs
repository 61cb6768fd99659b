mod common;

use common::{date, noon};
use vitalstats::core::bucket::{self, BucketKey, Bucketizer};
use vitalstats::core::period::{self, DateRange, Period};

fn labels(period: Period, range: DateRange) -> Vec<String> {
    bucket::buckets_for(period, range)
        .into_iter()
        .map(|b| b.label)
        .collect()
}

#[test]
fn test_week_has_exactly_seven_day_buckets() {
    let range = period::resolve(Period::Week, noon(2024, 3, 15));
    let b = Bucketizer::new(Period::Week, range);
    assert_eq!(b.len(), 7);
    assert!(b.is_daily());
    // the oldest day of the resolved range is dropped
    assert_eq!(b.buckets()[0].key, BucketKey::Day(date(2024, 3, 9)));
    assert_eq!(b.buckets()[6].key, BucketKey::Day(date(2024, 3, 15)));
    assert_eq!(b.assign(date(2024, 3, 8)), None);
}

#[test]
fn test_day_labels_use_short_month_and_day() {
    let range = DateRange::new(date(2024, 3, 1), date(2024, 3, 3));
    assert_eq!(labels(Period::Month, range), ["Mar 1", "Mar 2", "Mar 3"]);
}

#[test]
fn test_month_has_one_bucket_per_elapsed_day() {
    let range = period::resolve(Period::Month, noon(2024, 2, 29));
    let b = Bucketizer::new(Period::Month, range);
    assert_eq!(b.len(), 29);
    assert_eq!(b.assign(date(2024, 2, 1)), Some(0));
    assert_eq!(b.assign(date(2024, 2, 29)), Some(28));
    assert_eq!(b.assign(date(2024, 3, 1)), None);
}

#[test]
fn test_quarter_buckets_are_months() {
    let range = period::resolve(Period::Quarter, noon(2024, 8, 20));
    assert_eq!(labels(Period::Quarter, range), ["May", "Jun", "Jul", "Aug"]);
}

#[test]
fn test_quarter_in_february_has_two_buckets() {
    let range = period::resolve(Period::Quarter, noon(2024, 2, 10));
    let b = Bucketizer::new(Period::Quarter, range);
    assert_eq!(b.len(), 2);
    assert!(!b.is_daily());
    assert_eq!(b.buckets()[0].key, BucketKey::Month(0));
    assert_eq!(b.buckets()[1].key, BucketKey::Month(1));
}

#[test]
fn test_quarter_range_from_previous_year_starts_in_january() {
    let range = DateRange::new(date(2023, 11, 1), date(2024, 2, 10));
    assert_eq!(labels(Period::Quarter, range), ["Jan", "Feb"]);
}

#[test]
fn test_year_always_has_twelve_buckets() {
    let range = period::resolve(Period::Year, noon(2024, 3, 15));
    let b = Bucketizer::new(Period::Year, range);
    assert_eq!(b.len(), 12);
    assert_eq!(b.buckets()[0].label, "Jan");
    assert_eq!(b.buckets()[11].label, "Dec");
    assert_eq!(b.assign(date(2024, 12, 31)), Some(11));
}

#[test]
fn test_monthly_assign_ignores_other_years() {
    let range = period::resolve(Period::Year, noon(2024, 3, 15));
    let b = Bucketizer::new(Period::Year, range);
    assert_eq!(b.assign(date(2023, 3, 15)), None);
    assert_eq!(b.assign(date(2024, 3, 15)), Some(2));
}

#[test]
fn test_bucket_labels_are_unique_and_ordered() {
    for p in [Period::Week, Period::Month, Period::Quarter, Period::Year] {
        let range = period::resolve(p, noon(2024, 9, 30));
        let buckets = bucket::buckets_for(p, range);
        for pair in buckets.windows(2) {
            assert_ne!(pair[0].label, pair[1].label);
            match (pair[0].key, pair[1].key) {
                (BucketKey::Day(a), BucketKey::Day(b)) => assert!(a < b),
                (BucketKey::Month(a), BucketKey::Month(b)) => assert!(a < b),
                _ => panic!("mixed bucket granularity for {}", p),
            }
        }
    }
}
