use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    Diet,
    Exercise,
    Sleep,
    Weight,
}

impl RecordKind {
    pub const ALL: [RecordKind; 4] = [Self::Diet, Self::Exercise, Self::Sleep, Self::Weight];

    /// Backing table in the record store.
    pub fn table(&self) -> &'static str {
        match self {
            Self::Diet => "diet",
            Self::Exercise => "exercise",
            Self::Sleep => "sleep",
            Self::Weight => "weight",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.table())
    }
}

impl FromStr for RecordKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "diet" => Ok(Self::Diet),
            "exercise" => Ok(Self::Exercise),
            "sleep" => Ok(Self::Sleep),
            "weight" => Ok(Self::Weight),
            _ => anyhow::bail!(
                "invalid record kind: {} (expected diet/exercise/sleep/weight)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Meal {
    Breakfast,
    Lunch,
    Dinner,
    Snack,
}

impl std::fmt::Display for Meal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Breakfast => write!(f, "breakfast"),
            Self::Lunch => write!(f, "lunch"),
            Self::Dinner => write!(f, "dinner"),
            Self::Snack => write!(f, "snack"),
        }
    }
}

impl FromStr for Meal {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "breakfast" => Ok(Self::Breakfast),
            "lunch" => Ok(Self::Lunch),
            "dinner" => Ok(Self::Dinner),
            "snack" => Ok(Self::Snack),
            _ => anyhow::bail!(
                "invalid meal: {} (expected breakfast/lunch/dinner/snack)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    Running,
    Walking,
    Cycling,
    Swimming,
    Gym,
    Yoga,
    Other,
}

impl std::fmt::Display for ExerciseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Running => write!(f, "running"),
            Self::Walking => write!(f, "walking"),
            Self::Cycling => write!(f, "cycling"),
            Self::Swimming => write!(f, "swimming"),
            Self::Gym => write!(f, "gym"),
            Self::Yoga => write!(f, "yoga"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl FromStr for ExerciseKind {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "running" => Ok(Self::Running),
            "walking" => Ok(Self::Walking),
            "cycling" => Ok(Self::Cycling),
            "swimming" => Ok(Self::Swimming),
            "gym" => Ok(Self::Gym),
            "yoga" => Ok(Self::Yoga),
            "other" => Ok(Self::Other),
            _ => anyhow::bail!(
                "invalid exercise type: {} (expected running/walking/cycling/swimming/gym/yoga/other)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Intensity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Intensity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl FromStr for Intensity {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => anyhow::bail!("invalid intensity: {} (expected low/medium/high)", s),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SleepQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl std::fmt::Display for SleepQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Excellent => write!(f, "excellent"),
            Self::Good => write!(f, "good"),
            Self::Fair => write!(f, "fair"),
            Self::Poor => write!(f, "poor"),
        }
    }
}

impl FromStr for SleepQuality {
    type Err = anyhow::Error;
    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s {
            "excellent" => Ok(Self::Excellent),
            "good" => Ok(Self::Good),
            "fair" => Ok(Self::Fair),
            "poor" => Ok(Self::Poor),
            _ => anyhow::bail!(
                "invalid sleep quality: {} (expected excellent/good/fair/poor)",
                s
            ),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DietEntry {
    pub id: String,
    pub owner_id: String,
    pub meal: Meal,
    pub food: String,
    pub calories: f64,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl DietEntry {
    pub fn new(
        owner_id: String,
        meal: Meal,
        food: String,
        calories: f64,
        date: NaiveDate,
        time: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            meal,
            food,
            calories,
            date,
            time,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseEntry {
    pub id: String,
    pub owner_id: String,
    #[serde(rename = "type")]
    pub kind: ExerciseKind,
    pub duration_minutes: f64,
    pub intensity: Intensity,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl ExerciseEntry {
    pub fn new(
        owner_id: String,
        kind: ExerciseKind,
        duration_minutes: f64,
        intensity: Intensity,
        date: NaiveDate,
        time: String,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            kind,
            duration_minutes,
            intensity,
            date,
            time,
            created_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SleepEntry {
    pub id: String,
    pub owner_id: String,
    pub bedtime: NaiveDateTime,
    pub waketime: NaiveDateTime,
    pub quality: SleepQuality,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub notes: String,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl SleepEntry {
    pub fn new(
        owner_id: String,
        bedtime: NaiveDateTime,
        waketime: NaiveDateTime,
        quality: SleepQuality,
        date: NaiveDate,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            bedtime,
            waketime,
            quality,
            notes: String::new(),
            date,
            created_at: Utc::now(),
        }
    }

    /// Hours between bedtime and waketime, never negative.
    pub fn duration_hours(&self) -> f64 {
        let secs = (self.waketime - self.bedtime).num_seconds() as f64;
        (secs / 3600.0).max(0.0)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: String,
    pub owner_id: String,
    pub weight_kg: f64,
    pub date: NaiveDate,
    pub time: String,
    pub created_at: DateTime<Utc>,
}

impl WeightEntry {
    pub fn new(owner_id: String, weight_kg: f64, date: NaiveDate, time: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id,
            weight_kg,
            date,
            time,
            created_at: Utc::now(),
        }
    }
}

/// Any stored health record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum HealthRecord {
    Diet(DietEntry),
    Exercise(ExerciseEntry),
    Sleep(SleepEntry),
    Weight(WeightEntry),
}

impl HealthRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            Self::Diet(_) => RecordKind::Diet,
            Self::Exercise(_) => RecordKind::Exercise,
            Self::Sleep(_) => RecordKind::Sleep,
            Self::Weight(_) => RecordKind::Weight,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            Self::Diet(e) => &e.id,
            Self::Exercise(e) => &e.id,
            Self::Sleep(e) => &e.id,
            Self::Weight(e) => &e.id,
        }
    }

    pub fn owner_id(&self) -> &str {
        match self {
            Self::Diet(e) => &e.owner_id,
            Self::Exercise(e) => &e.owner_id,
            Self::Sleep(e) => &e.owner_id,
            Self::Weight(e) => &e.owner_id,
        }
    }

    pub fn date(&self) -> NaiveDate {
        match self {
            Self::Diet(e) => e.date,
            Self::Exercise(e) => e.date,
            Self::Sleep(e) => e.date,
            Self::Weight(e) => e.date,
        }
    }

    /// The numeric payload aggregated for this record: kcal, minutes,
    /// derived sleep hours, or kg.
    pub fn value(&self) -> f64 {
        match self {
            Self::Diet(e) => e.calories,
            Self::Exercise(e) => e.duration_minutes,
            Self::Sleep(e) => e.duration_hours(),
            Self::Weight(e) => e.weight_kg,
        }
    }
}

impl From<DietEntry> for HealthRecord {
    fn from(e: DietEntry) -> Self {
        Self::Diet(e)
    }
}

impl From<ExerciseEntry> for HealthRecord {
    fn from(e: ExerciseEntry) -> Self {
        Self::Exercise(e)
    }
}

impl From<SleepEntry> for HealthRecord {
    fn from(e: SleepEntry) -> Self {
        Self::Sleep(e)
    }
}

impl From<WeightEntry> for HealthRecord {
    fn from(e: WeightEntry) -> Self {
        Self::Weight(e)
    }
}
