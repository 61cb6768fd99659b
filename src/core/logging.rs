use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;
use serde_json::Value;

use crate::db::Database;
use crate::models::record::{
    DietEntry, ExerciseEntry, HealthRecord, RecordKind, SleepEntry, WeightEntry,
};

const MAX_NOTES_LEN: usize = 500;
const MAX_FOOD_LEN: usize = 200;
const MAX_CALORIES: f64 = 10_000.0;
const MAX_DURATION_MINUTES: f64 = 1440.0;

pub struct DietLog<'a> {
    pub meal: &'a str,
    pub food: &'a str,
    pub calories: f64,
    pub date: Option<NaiveDate>,
    pub time: Option<&'a str>,
}

pub struct ExerciseLog<'a> {
    pub kind: &'a str,
    pub duration_minutes: f64,
    pub intensity: &'a str,
    pub date: Option<NaiveDate>,
    pub time: Option<&'a str>,
}

pub struct SleepLog<'a> {
    pub bedtime: &'a str,
    pub waketime: &'a str,
    pub quality: &'a str,
    pub notes: Option<&'a str>,
    /// Defaults to the wake-up day.
    pub date: Option<NaiveDate>,
}

pub struct WeightLog<'a> {
    pub weight_kg: f64,
    pub date: Option<NaiveDate>,
    pub time: Option<&'a str>,
}

/// Validate and store a diet entry. `now` supplies the default date and time.
pub fn log_diet(
    db: &Database,
    owner_id: &str,
    entry: DietLog<'_>,
    now: NaiveDateTime,
) -> Result<DietEntry> {
    let e = build_diet(owner_id, entry, now)?;
    db.insert_record(&HealthRecord::Diet(e.clone()))?;
    tracing::debug!(id = %e.id, calories = e.calories, date = %e.date, "logged diet entry");
    Ok(e)
}

pub fn log_exercise(
    db: &Database,
    owner_id: &str,
    entry: ExerciseLog<'_>,
    now: NaiveDateTime,
) -> Result<ExerciseEntry> {
    let e = build_exercise(owner_id, entry, now)?;
    db.insert_record(&HealthRecord::Exercise(e.clone()))?;
    tracing::debug!(id = %e.id, minutes = e.duration_minutes, date = %e.date, "logged exercise entry");
    Ok(e)
}

pub fn log_sleep(db: &Database, owner_id: &str, entry: SleepLog<'_>) -> Result<SleepEntry> {
    let e = build_sleep(owner_id, entry)?;
    db.insert_record(&HealthRecord::Sleep(e.clone()))?;
    tracing::debug!(id = %e.id, hours = e.duration_hours(), date = %e.date, "logged sleep entry");
    Ok(e)
}

pub fn log_weight(
    db: &Database,
    owner_id: &str,
    entry: WeightLog<'_>,
    now: NaiveDateTime,
) -> Result<WeightEntry> {
    let e = build_weight(owner_id, entry, now)?;
    db.insert_record(&HealthRecord::Weight(e.clone()))?;
    tracing::debug!(id = %e.id, weight_kg = e.weight_kg, date = %e.date, "logged weight entry");
    Ok(e)
}

/// Log a JSON array of entries, each tagged with `"kind"`. Every entry is
/// validated before any of them is stored.
pub fn log_batch(
    db: &Database,
    owner_id: &str,
    batch_json: &str,
    now: NaiveDateTime,
) -> Result<Vec<HealthRecord>> {
    let entries: Vec<Value> = serde_json::from_str(batch_json)?;
    let mut records = Vec::with_capacity(entries.len());

    for (i, entry) in entries.iter().enumerate() {
        let record = build_from_json(owner_id, entry, now)
            .with_context(|| format!("batch entry {}", i))?;
        records.push(record);
    }
    for record in &records {
        db.insert_record(record)?;
    }
    tracing::debug!(count = records.len(), "logged batch");
    Ok(records)
}

/// Fields to change on a stored record; `None` leaves a field untouched.
/// Setting a field that the record's kind does not have is an error.
#[derive(Default)]
pub struct RecordPatch<'a> {
    pub meal: Option<&'a str>,
    pub food: Option<&'a str>,
    pub calories: Option<f64>,
    pub exercise_kind: Option<&'a str>,
    pub duration_minutes: Option<f64>,
    pub intensity: Option<&'a str>,
    pub bedtime: Option<&'a str>,
    pub waketime: Option<&'a str>,
    pub quality: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub weight_kg: Option<f64>,
    pub date: Option<NaiveDate>,
    pub time: Option<&'a str>,
}

impl RecordPatch<'_> {
    /// Names of the set fields that `kind` records do not carry.
    fn foreign_fields(&self, kind: RecordKind) -> Vec<&'static str> {
        let fields: [(&'static str, bool, &[RecordKind]); 12] = [
            ("meal", self.meal.is_some(), &[RecordKind::Diet]),
            ("food", self.food.is_some(), &[RecordKind::Diet]),
            ("calories", self.calories.is_some(), &[RecordKind::Diet]),
            ("type", self.exercise_kind.is_some(), &[RecordKind::Exercise]),
            ("duration", self.duration_minutes.is_some(), &[RecordKind::Exercise]),
            ("intensity", self.intensity.is_some(), &[RecordKind::Exercise]),
            ("bedtime", self.bedtime.is_some(), &[RecordKind::Sleep]),
            ("waketime", self.waketime.is_some(), &[RecordKind::Sleep]),
            ("quality", self.quality.is_some(), &[RecordKind::Sleep]),
            ("notes", self.notes.is_some(), &[RecordKind::Sleep]),
            ("weight", self.weight_kg.is_some(), &[RecordKind::Weight]),
            (
                "time",
                self.time.is_some(),
                &[RecordKind::Diet, RecordKind::Exercise, RecordKind::Weight],
            ),
        ];
        fields
            .into_iter()
            .filter(|(_, set, kinds)| *set && !kinds.contains(&kind))
            .map(|(name, _, _)| name)
            .collect()
    }
}

/// Apply `patch` to a stored record, re-validate the whole record and save
/// it. Fails when the record does not exist.
pub fn update_record(
    db: &Database,
    owner_id: &str,
    kind: RecordKind,
    id: &str,
    patch: RecordPatch<'_>,
) -> Result<HealthRecord> {
    let foreign = patch.foreign_fields(kind);
    if !foreign.is_empty() {
        anyhow::bail!("{} records have no field(s): {}", kind, foreign.join(", "));
    }
    let Some(mut record) = db.get_record(kind, owner_id, id)? else {
        anyhow::bail!("{} record not found: {}", kind, id);
    };

    match &mut record {
        HealthRecord::Diet(e) => {
            if let Some(m) = patch.meal {
                e.meal = m.parse()?;
            }
            if let Some(f) = patch.food {
                e.food = f.trim().to_string();
            }
            if let Some(c) = patch.calories {
                e.calories = c;
            }
            if let Some(t) = patch.time {
                e.time = t.to_string();
            }
            if let Some(d) = patch.date {
                e.date = d;
            }
            check_diet(e)?;
        }
        HealthRecord::Exercise(e) => {
            if let Some(k) = patch.exercise_kind {
                e.kind = k.parse()?;
            }
            if let Some(m) = patch.duration_minutes {
                e.duration_minutes = m;
            }
            if let Some(i) = patch.intensity {
                e.intensity = i.parse()?;
            }
            if let Some(t) = patch.time {
                e.time = t.to_string();
            }
            if let Some(d) = patch.date {
                e.date = d;
            }
            check_exercise(e)?;
        }
        HealthRecord::Sleep(e) => {
            if let Some(b) = patch.bedtime {
                e.bedtime = parse_bedtime(b)?;
            }
            if let Some(w) = patch.waketime {
                e.waketime = parse_waketime(w)?;
            }
            if let Some(q) = patch.quality {
                e.quality = q.parse()?;
            }
            if let Some(n) = patch.notes {
                e.notes = n.trim().to_string();
            }
            if let Some(d) = patch.date {
                e.date = d;
            }
            check_sleep(e)?;
        }
        HealthRecord::Weight(e) => {
            if let Some(w) = patch.weight_kg {
                e.weight_kg = w;
            }
            if let Some(t) = patch.time {
                e.time = t.to_string();
            }
            if let Some(d) = patch.date {
                e.date = d;
            }
            check_weight(e)?;
        }
    }

    if !db.update_record(&record)? {
        anyhow::bail!("{} record not found: {}", kind, id);
    }
    tracing::debug!(%kind, id, "record updated");
    Ok(record)
}

fn build_from_json(owner_id: &str, entry: &Value, now: NaiveDateTime) -> Result<HealthRecord> {
    let kind = entry["kind"]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("missing 'kind' in batch entry"))?;
    let date = entry["date"]
        .as_str()
        .map(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d"))
        .transpose()
        .map_err(|_| anyhow::anyhow!("date must be in YYYY-MM-DD format"))?;
    let time = entry["time"].as_str();

    let record = match kind {
        "diet" => HealthRecord::Diet(build_diet(
            owner_id,
            DietLog {
                meal: required_str(entry, "meal")?,
                food: required_str(entry, "food")?,
                calories: required_f64(entry, "calories")?,
                date,
                time,
            },
            now,
        )?),
        "exercise" => HealthRecord::Exercise(build_exercise(
            owner_id,
            ExerciseLog {
                kind: required_str(entry, "type")?,
                duration_minutes: required_f64(entry, "duration")?,
                intensity: required_str(entry, "intensity")?,
                date,
                time,
            },
            now,
        )?),
        "sleep" => HealthRecord::Sleep(build_sleep(
            owner_id,
            SleepLog {
                bedtime: required_str(entry, "bedtime")?,
                waketime: required_str(entry, "waketime")?,
                quality: required_str(entry, "quality")?,
                notes: entry["notes"].as_str(),
                date,
            },
        )?),
        "weight" => HealthRecord::Weight(build_weight(
            owner_id,
            WeightLog {
                weight_kg: required_f64(entry, "weight")?,
                date,
                time,
            },
            now,
        )?),
        other => anyhow::bail!(
            "invalid record kind: {} (expected diet/exercise/sleep/weight)",
            other
        ),
    };
    Ok(record)
}

fn required_str<'a>(entry: &'a Value, key: &str) -> Result<&'a str> {
    entry[key]
        .as_str()
        .ok_or_else(|| anyhow::anyhow!("missing '{}' in batch entry", key))
}

fn required_f64(entry: &Value, key: &str) -> Result<f64> {
    entry[key]
        .as_f64()
        .ok_or_else(|| anyhow::anyhow!("missing '{}' in batch entry", key))
}

fn build_diet(owner_id: &str, entry: DietLog<'_>, now: NaiveDateTime) -> Result<DietEntry> {
    let e = DietEntry::new(
        owner_id.to_string(),
        entry.meal.parse()?,
        entry.food.trim().to_string(),
        entry.calories,
        entry.date.unwrap_or(now.date()),
        resolve_time(entry.time, now)?,
    );
    check_diet(&e)?;
    Ok(e)
}

fn build_exercise(
    owner_id: &str,
    entry: ExerciseLog<'_>,
    now: NaiveDateTime,
) -> Result<ExerciseEntry> {
    let e = ExerciseEntry::new(
        owner_id.to_string(),
        entry.kind.parse()?,
        entry.duration_minutes,
        entry.intensity.parse()?,
        entry.date.unwrap_or(now.date()),
        resolve_time(entry.time, now)?,
    );
    check_exercise(&e)?;
    Ok(e)
}

fn build_sleep(owner_id: &str, entry: SleepLog<'_>) -> Result<SleepEntry> {
    let bedtime = parse_bedtime(entry.bedtime)?;
    let waketime = parse_waketime(entry.waketime)?;
    let mut e = SleepEntry::new(
        owner_id.to_string(),
        bedtime,
        waketime,
        entry.quality.parse()?,
        entry.date.unwrap_or(waketime.date()),
    );
    e.notes = entry.notes.unwrap_or("").trim().to_string();
    check_sleep(&e)?;
    Ok(e)
}

fn build_weight(owner_id: &str, entry: WeightLog<'_>, now: NaiveDateTime) -> Result<WeightEntry> {
    let e = WeightEntry::new(
        owner_id.to_string(),
        entry.weight_kg,
        entry.date.unwrap_or(now.date()),
        resolve_time(entry.time, now)?,
    );
    check_weight(&e)?;
    Ok(e)
}

fn check_diet(e: &DietEntry) -> Result<()> {
    if e.food.is_empty() {
        anyhow::bail!("food is required");
    }
    if e.food.chars().count() > MAX_FOOD_LEN {
        anyhow::bail!("food name too long (max {} characters)", MAX_FOOD_LEN);
    }
    if !e.calories.is_finite() || !(0.0..=MAX_CALORIES).contains(&e.calories) {
        anyhow::bail!("calories must be between 0 and {}", MAX_CALORIES);
    }
    check_time(&e.time)
}

fn check_exercise(e: &ExerciseEntry) -> Result<()> {
    if !e.duration_minutes.is_finite()
        || !(1.0..=MAX_DURATION_MINUTES).contains(&e.duration_minutes)
    {
        anyhow::bail!(
            "duration must be between 1 and {} minutes",
            MAX_DURATION_MINUTES
        );
    }
    check_time(&e.time)
}

fn check_sleep(e: &SleepEntry) -> Result<()> {
    if e.waketime <= e.bedtime {
        anyhow::bail!("waketime must be after bedtime");
    }
    if e.notes.chars().count() > MAX_NOTES_LEN {
        anyhow::bail!("notes too long (max {} characters)", MAX_NOTES_LEN);
    }
    Ok(())
}

fn check_weight(e: &WeightEntry) -> Result<()> {
    if !e.weight_kg.is_finite() || e.weight_kg < 0.0 {
        anyhow::bail!("weight must be a non-negative number");
    }
    check_time(&e.time)
}

fn parse_bedtime(s: &str) -> Result<NaiveDateTime> {
    parse_instant(s).context("bedtime must be a valid date")
}

fn parse_waketime(s: &str) -> Result<NaiveDateTime> {
    parse_instant(s).context("waketime must be a valid date")
}

/// Validate an `HH:MM` time of day, defaulting to the time of `now`.
fn resolve_time(time: Option<&str>, now: NaiveDateTime) -> Result<String> {
    match time {
        Some(t) => {
            check_time(t)?;
            Ok(t.to_string())
        }
        None => Ok(now.format("%H:%M").to_string()),
    }
}

fn check_time(t: &str) -> Result<()> {
    let re = Regex::new(r"^([01]\d|2[0-3]):[0-5]\d$")?;
    if !re.is_match(t) {
        anyhow::bail!("time must be in HH:MM format: {}", t);
    }
    Ok(())
}

/// Parse a local date-time such as `2024-03-01T23:15`, `2024-03-01 23:15`
/// or the same with seconds.
pub fn parse_instant(s: &str) -> Result<NaiveDateTime> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
    ];
    let s = s.trim();
    FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "invalid date-time '{}' (expected YYYY-MM-DDTHH:MM[:SS])",
                s
            )
        })
}
