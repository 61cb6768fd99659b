use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Named reporting window for statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Week,
    #[default]
    Month,
    Quarter,
    Year,
}

impl Period {
    /// Parse a user-supplied keyword. Unknown or missing keywords fall back
    /// to [`Period::Month`] instead of failing.
    pub fn parse_or_default(input: Option<&str>) -> Self {
        match input.map(str::parse::<Period>) {
            Some(Ok(p)) => p,
            Some(Err(_)) => {
                tracing::debug!(input = ?input, "unknown period keyword, using month");
                Self::default()
            }
            None => Self::default(),
        }
    }

    /// Whether this period is charted per day (`true`) or per month.
    pub fn is_daily(&self) -> bool {
        matches!(self, Self::Week | Self::Month)
    }
}

impl std::fmt::Display for Period {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Quarter => write!(f, "quarter"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for Period {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "week" => Ok(Self::Week),
            "month" => Ok(Self::Month),
            "quarter" => Ok(Self::Quarter),
            "year" => Ok(Self::Year),
            _ => anyhow::bail!("invalid period: {} (expected week/month/quarter/year)", s),
        }
    }
}

/// Calendar-date span with both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Every calendar day from `start` to `end`, ascending. Empty when the
    /// range is inverted.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.start.iter_days().take_while(move |d| *d <= self.end)
    }
}

/// Resolve a period to its date range relative to `now`.
pub fn resolve(period: Period, now: NaiveDateTime) -> DateRange {
    let today = now.date();
    let start = match period {
        Period::Week => (now - Duration::days(7)).date(),
        Period::Month => month_start(today, today.month0()),
        Period::Quarter => month_start(today, quarter_start_month(today.month0())),
        Period::Year => month_start(today, 0),
    };
    DateRange::new(start, today)
}

/// Zero-based first month of the quarter window ending at `month0`.
///
/// The window covers the current month and the three before it but is
/// clamped to January: it never reaches into the previous year, so requests
/// in January through March get a shorter quarter.
pub fn quarter_start_month(month0: u32) -> u32 {
    month0.saturating_sub(3)
}

fn month_start(today: NaiveDate, month0: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(today.year(), month0 + 1, 1).unwrap_or(today)
}
