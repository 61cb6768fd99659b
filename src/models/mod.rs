pub mod config;
pub mod goal;
pub mod record;

pub use goal::{Goal, GoalType};
pub use record::{HealthRecord, RecordKind};
