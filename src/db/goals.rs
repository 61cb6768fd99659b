use anyhow::Result;
use rusqlite::{OptionalExtension, params};

use crate::models::goal::Goal;

use super::{Database, format_date, parse_date, parse_timestamp};

const GOAL_COLUMNS: &str = "id, owner_id, type, target, deadline, description, completed, created_at";

impl Database {
    pub fn insert_goal(&self, g: &Goal) -> Result<()> {
        self.conn.execute(
            "INSERT INTO goals (id, owner_id, type, target, deadline, description, completed, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                g.id,
                g.owner_id,
                g.goal_type.to_string(),
                g.target,
                format_date(g.deadline),
                g.description,
                g.completed,
                g.created_at.map(|c| c.to_rfc3339()),
            ],
        )?;
        Ok(())
    }

    /// Goals for one owner ordered by deadline, optionally filtered by
    /// completion.
    pub fn list_goals(&self, owner_id: &str, completed: Option<bool>) -> Result<Vec<Goal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM goals
             WHERE owner_id = ?1 AND (?2 IS NULL OR completed = ?2)
             ORDER BY deadline, rowid",
            GOAL_COLUMNS
        ))?;
        let rows = stmt.query_map(params![owner_id, completed], read_goal_row)?;

        let mut goals = Vec::new();
        for row in rows {
            let r = row?;
            goals.push(row_to_goal(r)?);
        }
        Ok(goals)
    }

    pub fn get_goal(&self, owner_id: &str, id: &str) -> Result<Option<Goal>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM goals WHERE owner_id = ?1 AND id = ?2",
            GOAL_COLUMNS
        ))?;
        let row = stmt
            .query_row(params![owner_id, id], read_goal_row)
            .optional()?;
        row.map(row_to_goal).transpose()
    }

    /// Overwrite the mutable fields of a stored goal.
    pub fn update_goal(&self, g: &Goal) -> Result<bool> {
        let count = self.conn.execute(
            "UPDATE goals SET type = ?3, target = ?4, deadline = ?5, description = ?6, completed = ?7
             WHERE owner_id = ?1 AND id = ?2",
            params![
                g.owner_id,
                g.id,
                g.goal_type.to_string(),
                g.target,
                format_date(g.deadline),
                g.description,
                g.completed,
            ],
        )?;
        Ok(count > 0)
    }

    pub fn remove_goal(&self, owner_id: &str, id: &str) -> Result<bool> {
        let count = self.conn.execute(
            "DELETE FROM goals WHERE owner_id = ?1 AND id = ?2",
            params![owner_id, id],
        )?;
        Ok(count > 0)
    }
}

struct GoalRow {
    id: String,
    owner_id: String,
    goal_type: String,
    target: f64,
    deadline: String,
    description: String,
    completed: bool,
    created_at: Option<String>,
}

fn read_goal_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<GoalRow> {
    Ok(GoalRow {
        id: row.get(0)?,
        owner_id: row.get(1)?,
        goal_type: row.get(2)?,
        target: row.get(3)?,
        deadline: row.get(4)?,
        description: row.get(5)?,
        completed: row.get(6)?,
        created_at: row.get(7)?,
    })
}

fn row_to_goal(r: GoalRow) -> Result<Goal> {
    let created_at = r.created_at.as_deref().map(parse_timestamp).transpose()?;
    Ok(Goal {
        id: r.id,
        owner_id: r.owner_id,
        goal_type: r.goal_type.parse()?,
        target: r.target,
        deadline: parse_date(&r.deadline)?,
        description: r.description,
        completed: r.completed,
        created_at,
    })
}
