pub mod core;
pub mod db;
pub mod models;
pub mod observability;
pub mod output;
