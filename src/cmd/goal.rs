use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::json;

use vitalstats::core::goal::{self, GoalProgress, GoalUpdate, NewGoal};
use vitalstats::core::progress;
use vitalstats::db::Database;
use vitalstats::models::config::Config;
use vitalstats::models::goal::GoalType;
use vitalstats::output;
use vitalstats::output::human;

fn open() -> Result<(Config, Database)> {
    let config = Config::load()?;
    let db = Database::open(&Config::db_path())?;
    Ok((config, db))
}

pub fn run_set(
    goal_type: &str,
    target: f64,
    deadline: NaiveDate,
    description: Option<&str>,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let goal_type: GoalType = goal_type.parse()?;
    let goal = goal::set_goal(
        &db,
        &config.owner,
        NewGoal {
            goal_type,
            target,
            deadline,
            description,
        },
    )?;

    if human_flag {
        println!("Goal set: {}", human::format_goal(&goal));
    } else {
        let out = output::success("goal", json!({ "goal": goal }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_list(completed: Option<bool>, now: NaiveDateTime, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let goals = goal::goal_progress(&db, &config.owner, completed, now)?;

    if human_flag {
        if goals.is_empty() {
            println!("No goals.");
        } else {
            for g in &goals {
                println!("{}", human::format_goal_progress(g));
            }
        }
    } else {
        let out = output::success_as_of("goal", now.date(), json!({ "goals": goals }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_show(goal_id: &str, now: NaiveDateTime, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let Some(g) = goal::get_goal(&db, &config.owner, goal_id)? else {
        anyhow::bail!("goal not found: {}", goal_id);
    };
    let pct = goal::progress_for(&db, &g, now)?;
    let status = GoalProgress {
        window: progress::window(&g, now),
        progress: pct,
        goal: g,
    };

    if human_flag {
        println!("{}", human::format_goal_progress(&status));
    } else {
        let out = output::success_as_of("goal", now.date(), json!({ "goal": status }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_update(
    goal_id: &str,
    goal_type: Option<&str>,
    target: Option<f64>,
    deadline: Option<NaiveDate>,
    description: Option<&str>,
    completed: Option<bool>,
    human_flag: bool,
) -> Result<()> {
    let (config, db) = open()?;
    let update = GoalUpdate {
        goal_type: goal_type.map(str::parse).transpose()?,
        target,
        deadline,
        description,
        completed,
    };
    let goal = goal::update_goal(&db, &config.owner, goal_id, update)?;

    if human_flag {
        println!("Goal updated: {}", human::format_goal(&goal));
    } else {
        let out = output::success("goal", json!({ "goal": goal }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}

pub fn run_remove(goal_id: &str, human_flag: bool) -> Result<()> {
    let (config, db) = open()?;
    let removed = goal::remove_goal(&db, &config.owner, goal_id)?;

    if !removed {
        anyhow::bail!("goal not found: {}", goal_id);
    }

    if human_flag {
        println!("Goal removed: {}", goal_id);
    } else {
        let out = output::success("goal", json!({ "removed": goal_id }));
        println!("{}", serde_json::to_string(&out)?);
    }
    Ok(())
}
