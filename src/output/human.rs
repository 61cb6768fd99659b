use colored::Colorize;
use comfy_table::{Cell, CellAlignment, Table};

use crate::core::dashboard::DashboardData;
use crate::core::goal::GoalProgress;
use crate::core::stats::Statistics;
use crate::models::HealthRecord;
use crate::models::goal::Goal;

const BAR_WIDTH: usize = 20;

/// Pretty-print a single record.
pub fn format_record(r: &HealthRecord) -> String {
    match r {
        HealthRecord::Diet(e) => format!(
            "{} {} | {} {} = {} kcal  ({})",
            e.date, e.time, e.meal, e.food, e.calories, e.id
        ),
        HealthRecord::Exercise(e) => format!(
            "{} {} | {} {} min ({})  ({})",
            e.date, e.time, e.kind, e.duration_minutes, e.intensity, e.id
        ),
        HealthRecord::Sleep(e) => {
            let mut line = format!(
                "{} | {:.1} hours, {}  ({})",
                e.date,
                e.duration_hours(),
                e.quality,
                e.id
            );
            if !e.notes.is_empty() {
                line.push_str(&format!("  # {}", e.notes));
            }
            line
        }
        HealthRecord::Weight(e) => {
            format!("{} {} | {} kg  ({})", e.date, e.time, e.weight_kg, e.id)
        }
    }
}

/// Summary lines followed by one table row per bucket.
pub fn format_statistics(s: &Statistics) -> String {
    let mut out = format!(
        "=== Statistics: {} ({} to {}) ===\n\n",
        s.period, s.range.start, s.range.end
    );
    out.push_str(&format!(
        "Calories: {:.0} kcal total | avg {:.1} per entry (n={})\n",
        s.calories.total.unwrap_or(0.0),
        s.calories.average,
        s.calories.count
    ));
    out.push_str(&format!(
        "Exercise: {:.0} min total | avg {:.1} per session (n={})\n",
        s.exercise.total.unwrap_or(0.0),
        s.exercise.average,
        s.exercise.count
    ));
    out.push_str(&format!(
        "Sleep: avg {:.1} hours (n={})\n\n",
        s.sleep.average, s.sleep.count
    ));

    let mut table = Table::new();
    table.set_header(vec!["", "Calories (kcal)", "Exercise (min)", "Sleep (h)"]);
    let rows = s
        .calories
        .series
        .iter()
        .zip(&s.exercise.series)
        .zip(&s.sleep.series);
    for ((cal, ex), sl) in rows {
        table.add_row(vec![
            Cell::new(&cal.label),
            Cell::new(format!("{:.0}", cal.value)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.0}", ex.value)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}", sl.value)).set_alignment(CellAlignment::Right),
        ]);
    }
    out.push_str(&table.to_string());
    out
}

/// Pretty-print today's overview.
pub fn format_dashboard(d: &DashboardData) -> String {
    let mut out = format!("=== Today — {} ===\n\n", d.date);
    out.push_str(&format!("Calories: {} kcal\n", d.calories));
    out.push_str(&format!("Exercise: {} min\n", d.exercise_minutes));
    out.push_str(&format!("Sleep: {:.1} hours\n", d.sleep_hours));
    match d.weight_kg {
        Some(w) => out.push_str(&format!("Weight: {} kg\n", w)),
        None => out.push_str("Weight: no data\n"),
    }
    if d.recent_activities.is_empty() {
        out.push_str("\nNo recent activity.");
    } else {
        out.push_str("\nRecent activity:");
        for a in &d.recent_activities {
            out.push_str(&format!("\n  {} | {}", a.time, a.title));
        }
    }
    out
}

pub fn format_goal(g: &Goal) -> String {
    let mut line = format!(
        "{}: {} {} by {}",
        g.goal_type,
        g.target,
        g.goal_type.unit(),
        g.deadline
    );
    if g.completed {
        line.push_str(" [completed]");
    }
    if !g.description.is_empty() {
        line.push_str(&format!("  # {}", g.description));
    }
    line.push_str(&format!("  ({})", g.id));
    line
}

pub fn format_goal_progress(p: &GoalProgress) -> String {
    format!("{}\n  {}", format_goal(&p.goal), progress_bar(p.progress))
}

/// Fixed-width bar such as `[#########-----------]  45%`.
pub fn progress_bar(pct: u8) -> String {
    let pct = pct.min(100);
    let filled = pct as usize * BAR_WIDTH / 100;
    let bar = "#".repeat(filled);
    let rest = "-".repeat(BAR_WIDTH - filled);
    let bar = if pct >= 100 { bar.green() } else { bar.cyan() };
    format!("[{}{}] {:>3}%", bar, rest.dimmed(), pct)
}
