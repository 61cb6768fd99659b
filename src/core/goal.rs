use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use super::period::DateRange;
use super::progress;
use crate::db::Database;
use crate::models::goal::{Goal, GoalType};

const MIN_TARGET: f64 = 0.1;
const MAX_DESCRIPTION_LEN: usize = 500;

pub struct NewGoal<'a> {
    pub goal_type: GoalType,
    pub target: f64,
    pub deadline: NaiveDate,
    pub description: Option<&'a str>,
}

/// Fields to change on an existing goal; `None` leaves a field untouched.
#[derive(Default)]
pub struct GoalUpdate<'a> {
    pub goal_type: Option<GoalType>,
    pub target: Option<f64>,
    pub deadline: Option<NaiveDate>,
    pub description: Option<&'a str>,
    pub completed: Option<bool>,
}

/// Create a goal for an owner.
pub fn set_goal(db: &Database, owner_id: &str, new: NewGoal<'_>) -> Result<Goal> {
    validate_target(new.target)?;
    let description = validate_description(new.description.unwrap_or(""))?;
    let goal = Goal::new(
        owner_id.to_string(),
        new.goal_type,
        new.target,
        new.deadline,
        description,
    );
    db.insert_goal(&goal)?;
    tracing::debug!(id = %goal.id, goal_type = %goal.goal_type, "goal created");
    Ok(goal)
}

/// Goals ordered by deadline, optionally filtered by completion.
pub fn list_goals(db: &Database, owner_id: &str, completed: Option<bool>) -> Result<Vec<Goal>> {
    db.list_goals(owner_id, completed)
}

pub fn get_goal(db: &Database, owner_id: &str, goal_id: &str) -> Result<Option<Goal>> {
    db.get_goal(owner_id, goal_id)
}

/// Apply `update` to a stored goal and return the new version.
pub fn update_goal(
    db: &Database,
    owner_id: &str,
    goal_id: &str,
    update: GoalUpdate<'_>,
) -> Result<Goal> {
    let Some(mut goal) = db.get_goal(owner_id, goal_id)? else {
        anyhow::bail!("goal not found: {}", goal_id);
    };
    if let Some(t) = update.goal_type {
        goal.goal_type = t;
    }
    if let Some(target) = update.target {
        validate_target(target)?;
        goal.target = target;
    }
    if let Some(d) = update.deadline {
        goal.deadline = d;
    }
    if let Some(desc) = update.description {
        goal.description = validate_description(desc)?;
    }
    if let Some(c) = update.completed {
        goal.completed = c;
    }
    db.update_goal(&goal)?;
    Ok(goal)
}

/// Remove a goal by ID.
pub fn remove_goal(db: &Database, owner_id: &str, goal_id: &str) -> Result<bool> {
    db.remove_goal(owner_id, goal_id)
}

#[derive(Debug, Serialize)]
pub struct GoalProgress {
    #[serde(flatten)]
    pub goal: Goal,
    pub progress: u8,
    pub window: DateRange,
}

/// Every matching goal with its progress recomputed from current records.
pub fn goal_progress(
    db: &Database,
    owner_id: &str,
    completed: Option<bool>,
    now: NaiveDateTime,
) -> Result<Vec<GoalProgress>> {
    let goals = db.list_goals(owner_id, completed)?;
    let mut results = Vec::with_capacity(goals.len());
    for goal in goals {
        let pct = progress_for(db, &goal, now)?;
        results.push(GoalProgress {
            window: progress::window(&goal, now),
            progress: pct,
            goal,
        });
    }
    Ok(results)
}

/// Fetch the records relevant to one goal and evaluate its progress.
pub fn progress_for(db: &Database, goal: &Goal, now: NaiveDateTime) -> Result<u8> {
    let window = progress::window(goal, now);
    let records = db.find_in_range(goal.goal_type.record_kind(), &goal.owner_id, &window)?;
    Ok(progress::progress(goal, &records, now))
}

fn validate_target(target: f64) -> Result<()> {
    if !target.is_finite() || target < MIN_TARGET {
        anyhow::bail!("target must be a positive number (at least {})", MIN_TARGET);
    }
    Ok(())
}

fn validate_description(desc: &str) -> Result<String> {
    if desc.chars().count() > MAX_DESCRIPTION_LEN {
        anyhow::bail!(
            "description too long (max {} characters)",
            MAX_DESCRIPTION_LEN
        );
    }
    Ok(desc.trim().to_string())
}
