use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;

use super::period::{DateRange, Period};

pub const MONTH_LABELS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Number of day buckets shown for a week, regardless of how many days the
/// resolved range spans.
const WEEK_DAYS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "granularity", content = "key", rename_all = "snake_case")]
pub enum BucketKey {
    Day(NaiveDate),
    /// Zero-based month of the current year.
    Month(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Bucket {
    pub label: String,
    pub key: BucketKey,
}

enum BucketIndex {
    Days(BTreeMap<NaiveDate, usize>),
    Months {
        year: i32,
        slots: [Option<usize>; 12],
    },
}

/// Ordered buckets for one period plus the lookup that places a record date
/// into one of them.
pub struct Bucketizer {
    buckets: Vec<Bucket>,
    index: BucketIndex,
}

impl Bucketizer {
    pub fn new(period: Period, range: DateRange) -> Self {
        match period {
            Period::Week | Period::Month => {
                let mut days: Vec<NaiveDate> = range.days().collect();
                if period == Period::Week && days.len() > WEEK_DAYS {
                    let excess = days.len() - WEEK_DAYS;
                    days.drain(..excess);
                }
                Self::daily(days)
            }
            Period::Quarter => {
                let year = range.end.year();
                // A range that starts in an earlier year still charts from January.
                let first = if range.start.year() == year {
                    range.start.month0()
                } else {
                    0
                };
                Self::monthly(year, first..=range.end.month0())
            }
            Period::Year => Self::monthly(range.end.year(), 0..=11),
        }
    }

    fn daily(days: Vec<NaiveDate>) -> Self {
        let mut lookup = BTreeMap::new();
        let buckets = days
            .into_iter()
            .enumerate()
            .map(|(i, date)| {
                lookup.insert(date, i);
                Bucket {
                    label: date.format("%b %-d").to_string(),
                    key: BucketKey::Day(date),
                }
            })
            .collect();
        Self {
            buckets,
            index: BucketIndex::Days(lookup),
        }
    }

    fn monthly(year: i32, months: std::ops::RangeInclusive<u32>) -> Self {
        let mut slots = [None; 12];
        let buckets = months
            .enumerate()
            .map(|(i, month0)| {
                slots[month0 as usize] = Some(i);
                Bucket {
                    label: MONTH_LABELS[month0 as usize].to_string(),
                    key: BucketKey::Month(month0),
                }
            })
            .collect();
        Self {
            buckets,
            index: BucketIndex::Months { year, slots },
        }
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn into_buckets(self) -> Vec<Bucket> {
        self.buckets
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    pub fn is_daily(&self) -> bool {
        matches!(self.index, BucketIndex::Days(_))
    }

    /// Position of the bucket holding `date`, or `None` when the date falls
    /// outside every bucket.
    pub fn assign(&self, date: NaiveDate) -> Option<usize> {
        match &self.index {
            BucketIndex::Days(lookup) => lookup.get(&date).copied(),
            BucketIndex::Months { year, slots } => {
                if date.year() != *year {
                    return None;
                }
                slots[date.month0() as usize]
            }
        }
    }
}

/// Ordered buckets for `period` over `range`.
pub fn buckets_for(period: Period, range: DateRange) -> Vec<Bucket> {
    Bucketizer::new(period, range).into_buckets()
}
