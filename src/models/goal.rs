use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

use super::record::RecordKind;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GoalType {
    Weight,
    Calories,
    Exercise,
    Sleep,
}

impl GoalType {
    /// The record kind whose entries feed this goal's progress.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            Self::Weight => RecordKind::Weight,
            Self::Calories => RecordKind::Diet,
            Self::Exercise => RecordKind::Exercise,
            Self::Sleep => RecordKind::Sleep,
        }
    }

    pub fn unit(&self) -> &'static str {
        match self {
            Self::Weight => "kg",
            Self::Calories => "kcal",
            Self::Exercise => "min",
            Self::Sleep => "hours",
        }
    }
}

impl std::fmt::Display for GoalType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Weight => write!(f, "weight"),
            Self::Calories => write!(f, "calories"),
            Self::Exercise => write!(f, "exercise"),
            Self::Sleep => write!(f, "sleep"),
        }
    }
}

impl FromStr for GoalType {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "weight" => Ok(Self::Weight),
            "calories" => Ok(Self::Calories),
            "exercise" => Ok(Self::Exercise),
            "sleep" => Ok(Self::Sleep),
            _ => anyhow::bail!(
                "invalid goal type: {} (expected weight/calories/exercise/sleep)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub goal_type: GoalType,
    pub target: f64,
    pub deadline: NaiveDate,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    /// Goals imported without a creation time measure progress over the
    /// trailing 30 days instead.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Goal {
    pub fn new(
        owner_id: String,
        goal_type: GoalType,
        target: f64,
        deadline: NaiveDate,
        description: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            goal_type,
            target,
            deadline,
            description,
            completed: false,
            created_at: Some(Utc::now()),
        }
    }
}
