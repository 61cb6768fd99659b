use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;

#[derive(Parser)]
#[command(
    name = "vitalstats",
    version,
    about = "Personal health tracking with period statistics and goal progress"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Override the reference day (YYYY-MM-DD)
    #[arg(long, global = true)]
    pub date: Option<NaiveDate>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize profile and data directory
    Init {
        /// Skip interactive setup, use defaults
        #[arg(long)]
        skip: bool,
    },

    /// Log a health record
    Log {
        #[command(subcommand)]
        entry: LogCommand,
    },

    /// Show records of one kind
    Show {
        /// Record kind: diet, exercise, sleep, weight
        kind: String,

        /// Number of recent entries to show
        #[arg(long)]
        last: Option<u32>,

        /// Show a single record by id
        #[arg(long, conflicts_with = "last")]
        id: Option<String>,
    },

    /// Change fields of a stored record; --date moves it to another day
    Edit {
        /// Record kind: diet, exercise, sleep, weight
        kind: String,

        /// Record id
        id: String,

        #[arg(long)]
        meal: Option<String>,

        #[arg(long)]
        food: Option<String>,

        #[arg(long)]
        calories: Option<f64>,

        #[arg(long = "type")]
        exercise_kind: Option<String>,

        /// Duration in minutes
        #[arg(long)]
        duration: Option<f64>,

        #[arg(long)]
        intensity: Option<String>,

        #[arg(long)]
        bedtime: Option<String>,

        #[arg(long)]
        waketime: Option<String>,

        #[arg(long)]
        quality: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Body weight in kg
        #[arg(long)]
        weight: Option<f64>,

        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },

    /// Delete a record by id
    Delete {
        /// Record kind: diet, exercise, sleep, weight
        kind: String,

        /// Record id
        id: String,
    },

    /// Calorie, exercise and sleep statistics for a period
    Stats {
        /// week, month, quarter or year (unknown values fall back to month)
        #[arg(long)]
        period: Option<String>,
    },

    /// Today's totals and recent activity
    Dashboard,

    /// Manage health goals
    Goal {
        #[command(subcommand)]
        action: GoalAction,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print shell completions
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum LogCommand {
    /// Log a meal
    Diet {
        /// breakfast, lunch, dinner or snack
        #[arg(long)]
        meal: String,

        #[arg(long)]
        food: String,

        #[arg(long)]
        calories: f64,

        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },

    /// Log an exercise session
    Exercise {
        /// running, walking, cycling, swimming, gym, yoga or other
        #[arg(long = "type")]
        kind: String,

        /// Duration in minutes
        #[arg(long)]
        duration: f64,

        /// low, medium or high
        #[arg(long, default_value = "medium")]
        intensity: String,

        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },

    /// Log a night of sleep
    Sleep {
        /// Bedtime (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        bedtime: String,

        /// Wake time (YYYY-MM-DDTHH:MM)
        #[arg(long)]
        waketime: String,

        /// excellent, good, fair or poor
        #[arg(long, default_value = "good")]
        quality: String,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Log body weight in kg
    Weight {
        weight: f64,

        /// Time of day (HH:MM)
        #[arg(long)]
        time: Option<String>,
    },

    /// Log a JSON array of entries tagged with "kind"
    Batch {
        json: String,
    },
}

#[derive(Subcommand)]
pub enum GoalAction {
    /// Create a goal
    Set {
        /// weight, calories, exercise or sleep
        r#type: String,

        /// Target value (kg, kcal, minutes or hours)
        target: f64,

        /// Deadline (YYYY-MM-DD)
        #[arg(long)]
        deadline: NaiveDate,

        #[arg(long)]
        description: Option<String>,
    },

    /// List goals with their current progress
    List {
        /// Only completed (true) or open (false) goals
        #[arg(long)]
        completed: Option<bool>,
    },

    /// Show one goal with its progress
    Show {
        id: String,
    },

    /// Change fields of a goal
    Update {
        id: String,

        #[arg(long = "type")]
        r#type: Option<String>,

        #[arg(long)]
        target: Option<f64>,

        #[arg(long)]
        deadline: Option<NaiveDate>,

        #[arg(long)]
        description: Option<String>,

        #[arg(long)]
        completed: Option<bool>,
    },

    /// Remove a goal
    Remove {
        id: String,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (e.g. owner, height, stats.default_period, log.level)
        key: String,
        /// Config value
        value: String,
    },
}
