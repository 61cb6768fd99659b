use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;

use vitalstats::core::query;
use vitalstats::db::Database;
use vitalstats::models::RecordKind;
use vitalstats::models::config::Config;
use vitalstats::output;
use vitalstats::output::human;

pub fn run(kind: &str, last: Option<u32>, date: Option<NaiveDate>, human_flag: bool) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let result = query::show(&db, &config.owner, kind, last, date)?;

    if human_flag {
        if result.entries.is_empty() {
            match result.date {
                Some(d) => println!("No {} entries for {}", result.kind, d),
                None => println!("No {} entries found", result.kind),
            }
        } else {
            if let Some(d) = result.date {
                println!("--- {} ---", d);
            }
            for r in &result.entries {
                println!("{}", human::format_record(r));
            }
        }
    } else {
        let mut data = json!({ "kind": result.kind, "entries": result.entries });
        if let Some(d) = result.date {
            data["date"] = json!(d.to_string());
        }
        let out = output::success("show", data);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_one(kind: &str, id: &str, human_flag: bool) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let Some(record) = query::get(&db, &config.owner, kind, id)? else {
        anyhow::bail!("{} record not found: {}", kind, id);
    };

    if human_flag {
        println!("{}", human::format_record(&record));
    } else {
        let out = output::success("show", json!({ "kind": kind, "entry": record }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_delete(kind: &str, id: &str, human_flag: bool) -> Result<()> {
    let kind: RecordKind = kind.parse()?;
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;

    if !query::delete(&db, &config.owner, kind, id)? {
        anyhow::bail!("{} record not found: {}", kind, id);
    }

    if human_flag {
        println!("Deleted {} record {}", kind, id);
    } else {
        let out = output::success("delete", json!({ "kind": kind, "removed": id }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
