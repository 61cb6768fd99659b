use anyhow::Result;
use chrono::NaiveDateTime;

use vitalstats::core::period::Period;
use vitalstats::core::stats;
use vitalstats::db::Database;
use vitalstats::models::config::Config;
use vitalstats::output;
use vitalstats::output::human;

pub fn run(period: Option<&str>, now: NaiveDateTime, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let period = match period {
        Some(p) => Period::parse_or_default(Some(p)),
        None => config.stats.default_period,
    };
    let result = stats::compute(&db, &config.owner, period, now)?;

    if human_flag {
        println!("{}", human::format_statistics(&result));
    } else {
        let out = output::success_as_of("stats", now.date(), serde_json::to_value(&result)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
