use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use vitalstats::core::logging::{self, DietLog, ExerciseLog, RecordPatch, SleepLog, WeightLog};
use vitalstats::db::Database;
use vitalstats::models::{HealthRecord, RecordKind};
use vitalstats::models::config::Config;
use vitalstats::output;
use vitalstats::output::human;

fn open() -> Result<(Config, Database)> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    Ok((config, db))
}

fn print_logged(record: HealthRecord, human_flag: bool) -> Result<()> {
    if human_flag {
        println!("Logged: {}", human::format_record(&record));
    } else {
        let out = output::success("log", json!({ "entry": record }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_diet(
    meal: &str,
    food: &str,
    calories: f64,
    time: Option<&str>,
    date: Option<NaiveDate>,
    now: NaiveDateTime,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let e = logging::log_diet(
        &db,
        &config.owner,
        DietLog {
            meal,
            food,
            calories,
            date,
            time,
        },
        now,
    )?;
    print_logged(e.into(), human_flag)
}

pub fn run_exercise(
    kind: &str,
    duration_minutes: f64,
    intensity: &str,
    time: Option<&str>,
    date: Option<NaiveDate>,
    now: NaiveDateTime,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let e = logging::log_exercise(
        &db,
        &config.owner,
        ExerciseLog {
            kind,
            duration_minutes,
            intensity,
            date,
            time,
        },
        now,
    )?;
    print_logged(e.into(), human_flag)
}

pub fn run_sleep(
    bedtime: &str,
    waketime: &str,
    quality: &str,
    notes: Option<&str>,
    date: Option<NaiveDate>,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let e = logging::log_sleep(
        &db,
        &config.owner,
        SleepLog {
            bedtime,
            waketime,
            quality,
            notes,
            date,
        },
    )?;
    print_logged(e.into(), human_flag)
}

pub fn run_weight(
    weight_kg: f64,
    time: Option<&str>,
    date: Option<NaiveDate>,
    now: NaiveDateTime,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let e = logging::log_weight(
        &db,
        &config.owner,
        WeightLog {
            weight_kg,
            date,
            time,
        },
        now,
    )?;
    print_logged(e.into(), human_flag)
}

pub fn run_batch(batch_json: &str, now: NaiveDateTime, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let records = logging::log_batch(&db, &config.owner, batch_json, now)?;

    if human_flag {
        println!("Logged {} entries:", records.len());
        for r in &records {
            println!("  {}", human::format_record(r));
        }
    } else {
        let out = output::success("log", json!({ "entries": records }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_edit(kind: &str, id: &str, patch: RecordPatch<'_>, human_flag: bool) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let (config, db) = open()?;
    let record = logging::update_record(&db, &config.owner, kind, id, patch)?;

    if human_flag {
        println!("Updated: {}", human::format_record(&record));
    } else {
        let out = output::success("edit", json!({ "entry": record }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
