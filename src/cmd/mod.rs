pub mod completions;
pub mod config;
pub mod dashboard;
pub mod goal;
pub mod init;
pub mod log;
pub mod show;
pub mod stats;

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

/// The instant commands treat as "now": noon on `--date` when given,
/// otherwise the local wall clock.
pub fn reference_now(date: Option<NaiveDate>) -> NaiveDateTime {
    match date {
        Some(d) => d.and_time(NaiveTime::from_hms_opt(12, 0, 0).unwrap_or(NaiveTime::MIN)),
        None => Local::now().naive_local(),
    }
}
