mod common;

use common::{date, diet, exercise, goal, noon, sleep, weight};
use vitalstats::core::progress;
use vitalstats::models::goal::GoalType;
use vitalstats::models::record::{HealthRecord, WeightEntry};

// ── window ──────────────────────────────────────────────────────────────────

#[test]
fn test_window_runs_from_creation_to_today() {
    let g = goal(GoalType::Calories, 2000.0, date(2024, 3, 1), date(2024, 3, 31));
    let w = progress::window(&g, noon(2024, 3, 15));
    assert_eq!(w.start, date(2024, 3, 1));
    assert_eq!(w.end, date(2024, 3, 15));
}

#[test]
fn test_window_stops_at_passed_deadline() {
    let g = goal(GoalType::Calories, 2000.0, date(2024, 3, 1), date(2024, 3, 10));
    let now = noon(2024, 3, 15);
    assert!(progress::deadline_passed(&g, now));
    assert_eq!(progress::window(&g, now).end, date(2024, 3, 10));
}

#[test]
fn test_window_without_creation_time_uses_last_thirty_days() {
    let mut g = goal(GoalType::Sleep, 8.0, date(2024, 3, 1), date(2024, 6, 1));
    g.created_at = None;
    let w = progress::window(&g, noon(2024, 3, 31));
    assert_eq!(w.start, date(2024, 3, 1));
    assert_eq!(w.end, date(2024, 3, 31));
}

#[test]
fn test_window_starts_on_local_creation_day() {
    let mut g = goal(GoalType::Calories, 2000.0, date(2024, 3, 1), date(2024, 3, 31));
    // just after local midnight, which is still the previous day in UTC
    // for zones east of Greenwich
    g.created_at = Some(common::local_instant(common::at(2024, 3, 5, 0, 30)));
    let w = progress::window(&g, noon(2024, 3, 15));
    assert_eq!(w.start, date(2024, 3, 5));

    g.created_at = Some(common::local_instant(common::at(2024, 3, 5, 23, 30)));
    assert_eq!(progress::window(&g, noon(2024, 3, 15)).start, date(2024, 3, 5));
}

#[test]
fn test_deadline_in_future_is_not_passed() {
    let g = goal(GoalType::Exercise, 300.0, date(2024, 3, 1), date(2024, 3, 16));
    assert!(!progress::deadline_passed(&g, noon(2024, 3, 15)));
}

// ── cumulative goals ────────────────────────────────────────────────────────

#[test]
fn test_calories_progress_is_sum_over_target() {
    let g = goal(GoalType::Calories, 2000.0, date(2024, 3, 1), date(2024, 3, 31));
    let records = vec![diet(500.0, date(2024, 3, 2)), diet(500.0, date(2024, 3, 10))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 50);
}

#[test]
fn test_exercise_progress_is_clamped_to_100() {
    let g = goal(GoalType::Exercise, 60.0, date(2024, 3, 1), date(2024, 3, 31));
    let records = vec![
        exercise(45.0, date(2024, 3, 2)),
        exercise(45.0, date(2024, 3, 3)),
    ];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 100);
}

#[test]
fn test_records_outside_window_are_ignored() {
    let g = goal(GoalType::Exercise, 100.0, date(2024, 3, 5), date(2024, 3, 10));
    let records = vec![
        exercise(40.0, date(2024, 3, 4)),
        exercise(25.0, date(2024, 3, 6)),
        exercise(40.0, date(2024, 3, 12)),
    ];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 25);
}

#[test]
fn test_records_of_other_kinds_and_owners_are_ignored() {
    let g = goal(GoalType::Calories, 1000.0, date(2024, 3, 1), date(2024, 3, 31));
    let mut stranger = diet(800.0, date(2024, 3, 2));
    if let HealthRecord::Diet(e) = &mut stranger {
        e.owner_id = "someone-else".to_string();
    }
    let records = vec![
        stranger,
        exercise(500.0, date(2024, 3, 2)),
        diet(250.0, date(2024, 3, 3)),
    ];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 25);
}

// ── sleep ───────────────────────────────────────────────────────────────────

#[test]
fn test_sleep_progress_is_mean_over_target() {
    let g = goal(GoalType::Sleep, 8.0, date(2024, 3, 1), date(2024, 3, 31));
    let records = vec![sleep(5.0, date(2024, 3, 2)), sleep(7.0, date(2024, 3, 3))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 75);
}

// ── weight ──────────────────────────────────────────────────────────────────

#[test]
fn test_weight_progress_is_distance_covered() {
    let g = goal(GoalType::Weight, 75.0, date(2024, 3, 1), date(2024, 4, 30));
    // deliberately out of date order
    let records = vec![
        weight(77.0, date(2024, 3, 10)),
        weight(80.0, date(2024, 3, 2)),
        weight(78.5, date(2024, 3, 6)),
    ];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 60);
}

#[test]
fn test_weight_gain_goal() {
    let g = goal(GoalType::Weight, 64.0, date(2024, 3, 1), date(2024, 4, 30));
    let records = vec![weight(60.0, date(2024, 3, 2)), weight(61.0, date(2024, 3, 9))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 25);
}

#[test]
fn test_weight_already_at_target_gives_zero() {
    let g = goal(GoalType::Weight, 70.0, date(2024, 3, 1), date(2024, 4, 30));
    let records = vec![weight(70.0, date(2024, 3, 2)), weight(69.0, date(2024, 3, 5))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 0);
}

#[test]
fn test_single_weight_record_gives_zero() {
    let g = goal(GoalType::Weight, 70.0, date(2024, 3, 1), date(2024, 4, 30));
    let records = vec![weight(80.0, date(2024, 3, 2))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 0);
}

// ── degenerate input ────────────────────────────────────────────────────────

#[test]
fn test_no_records_gives_zero() {
    let now = noon(2024, 3, 15);
    for t in [
        GoalType::Weight,
        GoalType::Calories,
        GoalType::Exercise,
        GoalType::Sleep,
    ] {
        let g = goal(t, 10.0, date(2024, 3, 1), date(2024, 3, 31));
        assert_eq!(progress::progress(&g, &[], now), 0, "{}", t);
    }
}

#[test]
fn test_non_positive_target_gives_zero() {
    let mut g = goal(GoalType::Calories, 0.0, date(2024, 3, 1), date(2024, 3, 31));
    let records = vec![diet(500.0, date(2024, 3, 2))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 0);

    g.target = -10.0;
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 0);
}

#[test]
fn test_non_finite_values_are_ignored() {
    let g = goal(GoalType::Weight, 75.0, date(2024, 3, 1), date(2024, 4, 30));
    let broken = WeightEntry::new(
        common::OWNER.to_string(),
        f64::INFINITY,
        date(2024, 3, 12),
        "08:00".to_string(),
    );
    let records = vec![
        weight(80.0, date(2024, 3, 2)),
        weight(77.0, date(2024, 3, 10)),
        broken.into(),
    ];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 15)), 60);
}

#[test]
fn test_progress_always_within_bounds() {
    let now = noon(2024, 3, 15);
    let amounts = [0.0, 0.5, 7.0, 120.0, 5000.0, 1e9];
    for t in [
        GoalType::Weight,
        GoalType::Calories,
        GoalType::Exercise,
        GoalType::Sleep,
    ] {
        for target in [0.1, 1.0, 75.0, 10_000.0] {
            let g = goal(t, target, date(2024, 3, 1), date(2024, 3, 31));
            let records: Vec<HealthRecord> = amounts
                .iter()
                .enumerate()
                .flat_map(|(i, &v)| {
                    let d = date(2024, 3, 2 + i as u32);
                    [diet(v, d), exercise(v, d), weight(v, d), sleep(v.min(20.0), d)]
                })
                .collect();
            let pct = progress::progress(&g, &records, now);
            assert!(pct <= 100, "{} target {} gave {}", t, target, pct);
        }
    }
}

#[test]
fn test_weight_halfway_to_target() {
    let g = goal(GoalType::Weight, 70.0, date(2024, 1, 1), date(2024, 6, 30));
    let records = vec![weight(80.0, date(2024, 1, 1)), weight(75.0, date(2024, 1, 15))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 1, 20)), 50);
}

#[test]
fn test_met_goal_after_deadline_reports_100() {
    let g = goal(GoalType::Calories, 1000.0, date(2024, 3, 1), date(2024, 3, 10));
    let records = vec![diet(1500.0, date(2024, 3, 5))];
    assert_eq!(progress::progress(&g, &records, noon(2024, 3, 20)), 100);
}
