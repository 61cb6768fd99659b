pub mod aggregate;
pub mod bucket;
pub mod dashboard;
pub mod goal;
pub mod logging;
pub mod period;
pub mod progress;
pub mod query;
pub mod stats;
