use anyhow::Result;
use chrono::NaiveDate;

use vitalstats::core::dashboard;
use vitalstats::db::Database;
use vitalstats::models::config::Config;
use vitalstats::output;
use vitalstats::output::human;

pub fn run(today: NaiveDate, human_flag: bool) -> Result<()> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    let data = dashboard::compute(&db, &config.owner, today)?;

    if human_flag {
        println!("{}", human::format_dashboard(&data));
    } else {
        let out = output::success_as_of("dashboard", today, serde_json::to_value(&data)?);
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
