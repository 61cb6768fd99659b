mod common;

use serde_json::json;
use vitalstats::output;

#[test]
fn test_success_envelope() {
    let out = output::success("log", json!({ "entry": 1 }));
    assert_eq!(out["status"], "ok");
    assert_eq!(out["command"], "log");
    assert_eq!(out["data"]["entry"], 1);
    assert!(out["error"].is_null());
    assert!(out.get("as_of").is_none());
}

#[test]
fn test_success_as_of_echoes_reference_day() {
    let out = output::success_as_of("stats", common::date(2024, 2, 29), json!({}));
    assert_eq!(out["status"], "ok");
    assert_eq!(out["as_of"], "2024-02-29");
}

#[test]
fn test_error_envelope() {
    let out = output::error("goal", "general_error", "goal not found: x");
    assert_eq!(out["status"], "error");
    assert!(out["data"].is_null());
    assert_eq!(out["error"]["code"], "general_error");
    assert_eq!(out["error"]["message"], "goal not found: x");
}

#[test]
fn test_progress_bar_width_and_percent() {
    let bar = output::human::progress_bar(50);
    assert!(bar.ends_with(" 50%"));
    assert_eq!(bar.matches('#').count(), 10);
    assert!(output::human::progress_bar(100).ends_with("100%"));
}
