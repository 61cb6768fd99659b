pub mod human;

use chrono::NaiveDate;
use serde_json::{Value, json};

/// Standard JSON envelope wrapped around every command result.
pub fn success(command: &str, data: Value) -> Value {
    json!({
        "status": "ok",
        "command": command,
        "data": data,
        "error": null
    })
}

/// Envelope for results computed relative to a reference day (statistics,
/// dashboard, goal progress). `as_of` echoes that day so output produced with
/// `--date` can be told apart from live output.
pub fn success_as_of(command: &str, as_of: NaiveDate, data: Value) -> Value {
    let mut out = success(command, data);
    out["as_of"] = json!(as_of.to_string());
    out
}

pub fn error(command: &str, code: &str, message: &str) -> Value {
    json!({
        "status": "error",
        "command": command,
        "data": null,
        "error": {
            "code": code,
            "message": message
        }
    })
}
