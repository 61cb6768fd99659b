use anyhow::Result;
use rusqlite::Connection;

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS diet (
            id         TEXT PRIMARY KEY,
            owner_id   TEXT NOT NULL,
            meal       TEXT NOT NULL,
            food       TEXT NOT NULL,
            calories   REAL NOT NULL,
            date       TEXT NOT NULL,
            time       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_diet_owner_date ON diet(owner_id, date);

        CREATE TABLE IF NOT EXISTS exercise (
            id         TEXT PRIMARY KEY,
            owner_id   TEXT NOT NULL,
            kind       TEXT NOT NULL,
            duration   REAL NOT NULL,
            intensity  TEXT NOT NULL,
            date       TEXT NOT NULL,
            time       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_exercise_owner_date ON exercise(owner_id, date);

        CREATE TABLE IF NOT EXISTS sleep (
            id         TEXT PRIMARY KEY,
            owner_id   TEXT NOT NULL,
            bedtime    TEXT NOT NULL,
            waketime   TEXT NOT NULL,
            quality    TEXT NOT NULL,
            notes      TEXT NOT NULL DEFAULT '',
            date       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sleep_owner_date ON sleep(owner_id, date);

        CREATE TABLE IF NOT EXISTS weight (
            id         TEXT PRIMARY KEY,
            owner_id   TEXT NOT NULL,
            weight     REAL NOT NULL,
            date       TEXT NOT NULL,
            time       TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_weight_owner_date ON weight(owner_id, date);

        CREATE TABLE IF NOT EXISTS goals (
            id          TEXT PRIMARY KEY,
            owner_id    TEXT NOT NULL,
            type        TEXT NOT NULL,
            target      REAL NOT NULL,
            deadline    TEXT NOT NULL,
            description TEXT NOT NULL DEFAULT '',
            completed   INTEGER NOT NULL DEFAULT 0,
            created_at  TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_goals_owner ON goals(owner_id, deadline);",
    )?;
    Ok(())
}
