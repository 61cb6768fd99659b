mod cli;
mod cmd;

use clap::Parser;
use cli::{Cli, Commands, ConfigAction, GoalAction, LogCommand};
use std::process;

use vitalstats::core::logging::RecordPatch;
use vitalstats::models::config::Config;
use vitalstats::{observability, output};

fn main() {
    let cli = Cli::parse();

    let level = Config::load()
        .map(|c| c.log.level)
        .unwrap_or_else(|_| "warn".to_string());
    observability::init(&level);

    let now = cmd::reference_now(cli.date);
    let human = cli.human;

    let result = match cli.command {
        Commands::Init { skip } => cmd::init::run(skip),
        Commands::Log { entry } => match entry {
            LogCommand::Diet {
                meal,
                food,
                calories,
                time,
            } => cmd::log::run_diet(&meal, &food, calories, time.as_deref(), cli.date, now, human),
            LogCommand::Exercise {
                kind,
                duration,
                intensity,
                time,
            } => cmd::log::run_exercise(
                &kind,
                duration,
                &intensity,
                time.as_deref(),
                cli.date,
                now,
                human,
            ),
            LogCommand::Sleep {
                bedtime,
                waketime,
                quality,
                notes,
            } => cmd::log::run_sleep(
                &bedtime,
                &waketime,
                &quality,
                notes.as_deref(),
                cli.date,
                human,
            ),
            LogCommand::Weight { weight, time } => {
                cmd::log::run_weight(weight, time.as_deref(), cli.date, now, human)
            }
            LogCommand::Batch { json } => cmd::log::run_batch(&json, now, human),
        },
        Commands::Show {
            kind,
            id: Some(id),
            ..
        } => cmd::show::run_one(&kind, &id, human),
        Commands::Show { kind, last, id: None } => cmd::show::run(&kind, last, cli.date, human),
        Commands::Edit {
            kind,
            id,
            meal,
            food,
            calories,
            exercise_kind,
            duration,
            intensity,
            bedtime,
            waketime,
            quality,
            notes,
            weight,
            time,
        } => cmd::log::run_edit(
            &kind,
            &id,
            RecordPatch {
                meal: meal.as_deref(),
                food: food.as_deref(),
                calories,
                exercise_kind: exercise_kind.as_deref(),
                duration_minutes: duration,
                intensity: intensity.as_deref(),
                bedtime: bedtime.as_deref(),
                waketime: waketime.as_deref(),
                quality: quality.as_deref(),
                notes: notes.as_deref(),
                weight_kg: weight,
                date: cli.date,
                time: time.as_deref(),
            },
            human,
        ),
        Commands::Delete { kind, id } => cmd::show::run_delete(&kind, &id, human),
        Commands::Stats { period } => cmd::stats::run(period.as_deref(), now, human),
        Commands::Dashboard => cmd::dashboard::run(now.date(), human),
        Commands::Goal { action } => match action {
            GoalAction::Set {
                r#type,
                target,
                deadline,
                description,
            } => cmd::goal::run_set(&r#type, target, deadline, description.as_deref(), human),
            GoalAction::List { completed } => cmd::goal::run_list(completed, now, human),
            GoalAction::Show { id } => cmd::goal::run_show(&id, now, human),
            GoalAction::Update {
                id,
                r#type,
                target,
                deadline,
                description,
                completed,
            } => cmd::goal::run_update(
                &id,
                r#type.as_deref(),
                target,
                deadline,
                description.as_deref(),
                completed,
                human,
            ),
            GoalAction::Remove { id } => cmd::goal::run_remove(&id, human),
        },
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd::config::run_show(human),
            ConfigAction::Set { key, value } => cmd::config::run_set(&key, &value),
        },
        Commands::Completions { shell } => cmd::completions::run(shell),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "command failed");
        let err = output::error("", "general_error", &format!("{:#}", e));
        match serde_json::to_string(&err) {
            Ok(s) => eprintln!("{}", s),
            Err(_) => eprintln!("{:#}", e),
        }
        process::exit(1);
    }
}
