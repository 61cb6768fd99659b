use anyhow::Result;
use rusqlite::{OptionalExtension, Row, ToSql, params};

use crate::core::period::DateRange;
use crate::models::record::{
    DietEntry, ExerciseEntry, HealthRecord, RecordKind, SleepEntry, WeightEntry,
};

use super::{
    Database, format_date, format_datetime, parse_date, parse_datetime, parse_timestamp,
};

fn columns(kind: RecordKind) -> &'static str {
    match kind {
        RecordKind::Diet => "id, owner_id, meal, food, calories, date, time, created_at",
        RecordKind::Exercise => "id, owner_id, kind, duration, intensity, date, time, created_at",
        RecordKind::Sleep => "id, owner_id, bedtime, waketime, quality, notes, date, created_at",
        RecordKind::Weight => "id, owner_id, weight, date, time, created_at",
    }
}

struct DietRow {
    id: String,
    owner_id: String,
    meal: String,
    food: String,
    calories: f64,
    date: String,
    time: String,
    created_at: String,
}

struct ExerciseRow {
    id: String,
    owner_id: String,
    kind: String,
    duration: f64,
    intensity: String,
    date: String,
    time: String,
    created_at: String,
}

struct SleepRow {
    id: String,
    owner_id: String,
    bedtime: String,
    waketime: String,
    quality: String,
    notes: String,
    date: String,
    created_at: String,
}

struct WeightRow {
    id: String,
    owner_id: String,
    weight: f64,
    date: String,
    time: String,
    created_at: String,
}

/// A row as read from SQLite, before any text column is parsed.
enum RecordRow {
    Diet(DietRow),
    Exercise(ExerciseRow),
    Sleep(SleepRow),
    Weight(WeightRow),
}

impl RecordRow {
    fn read(kind: RecordKind, row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(match kind {
            RecordKind::Diet => Self::Diet(DietRow {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                meal: row.get(2)?,
                food: row.get(3)?,
                calories: row.get(4)?,
                date: row.get(5)?,
                time: row.get(6)?,
                created_at: row.get(7)?,
            }),
            RecordKind::Exercise => Self::Exercise(ExerciseRow {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                kind: row.get(2)?,
                duration: row.get(3)?,
                intensity: row.get(4)?,
                date: row.get(5)?,
                time: row.get(6)?,
                created_at: row.get(7)?,
            }),
            RecordKind::Sleep => Self::Sleep(SleepRow {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                bedtime: row.get(2)?,
                waketime: row.get(3)?,
                quality: row.get(4)?,
                notes: row.get(5)?,
                date: row.get(6)?,
                created_at: row.get(7)?,
            }),
            RecordKind::Weight => Self::Weight(WeightRow {
                id: row.get(0)?,
                owner_id: row.get(1)?,
                weight: row.get(2)?,
                date: row.get(3)?,
                time: row.get(4)?,
                created_at: row.get(5)?,
            }),
        })
    }

    fn id(&self) -> &str {
        match self {
            Self::Diet(r) => &r.id,
            Self::Exercise(r) => &r.id,
            Self::Sleep(r) => &r.id,
            Self::Weight(r) => &r.id,
        }
    }

    fn into_record(self) -> Result<HealthRecord> {
        Ok(match self {
            Self::Diet(r) => HealthRecord::Diet(DietEntry {
                meal: r.meal.parse()?,
                food: r.food,
                calories: r.calories,
                date: parse_date(&r.date)?,
                time: r.time,
                created_at: parse_timestamp(&r.created_at)?,
                id: r.id,
                owner_id: r.owner_id,
            }),
            Self::Exercise(r) => HealthRecord::Exercise(ExerciseEntry {
                kind: r.kind.parse()?,
                duration_minutes: r.duration,
                intensity: r.intensity.parse()?,
                date: parse_date(&r.date)?,
                time: r.time,
                created_at: parse_timestamp(&r.created_at)?,
                id: r.id,
                owner_id: r.owner_id,
            }),
            Self::Sleep(r) => HealthRecord::Sleep(SleepEntry {
                bedtime: parse_datetime(&r.bedtime)?,
                waketime: parse_datetime(&r.waketime)?,
                quality: r.quality.parse()?,
                notes: r.notes,
                date: parse_date(&r.date)?,
                created_at: parse_timestamp(&r.created_at)?,
                id: r.id,
                owner_id: r.owner_id,
            }),
            Self::Weight(r) => HealthRecord::Weight(WeightEntry {
                weight_kg: r.weight,
                date: parse_date(&r.date)?,
                time: r.time,
                created_at: parse_timestamp(&r.created_at)?,
                id: r.id,
                owner_id: r.owner_id,
            }),
        })
    }
}

/// How unparseable rows are treated while collecting query results.
#[derive(Clone, Copy, PartialEq)]
enum Malformed {
    Fail,
    Skip,
}

impl Database {
    pub fn insert_record(&self, record: &HealthRecord) -> Result<()> {
        match record {
            HealthRecord::Diet(e) => self.conn.execute(
                "INSERT INTO diet (id, owner_id, meal, food, calories, date, time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    e.id,
                    e.owner_id,
                    e.meal.to_string(),
                    e.food,
                    e.calories,
                    format_date(e.date),
                    e.time,
                    e.created_at.to_rfc3339(),
                ],
            )?,
            HealthRecord::Exercise(e) => self.conn.execute(
                "INSERT INTO exercise (id, owner_id, kind, duration, intensity, date, time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    e.id,
                    e.owner_id,
                    e.kind.to_string(),
                    e.duration_minutes,
                    e.intensity.to_string(),
                    format_date(e.date),
                    e.time,
                    e.created_at.to_rfc3339(),
                ],
            )?,
            HealthRecord::Sleep(e) => self.conn.execute(
                "INSERT INTO sleep (id, owner_id, bedtime, waketime, quality, notes, date, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    e.id,
                    e.owner_id,
                    format_datetime(e.bedtime),
                    format_datetime(e.waketime),
                    e.quality.to_string(),
                    e.notes,
                    format_date(e.date),
                    e.created_at.to_rfc3339(),
                ],
            )?,
            HealthRecord::Weight(e) => self.conn.execute(
                "INSERT INTO weight (id, owner_id, weight, date, time, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    e.id,
                    e.owner_id,
                    e.weight_kg,
                    format_date(e.date),
                    e.time,
                    e.created_at.to_rfc3339(),
                ],
            )?,
        };
        Ok(())
    }

    /// Records of `kind` for one owner dated inside `range`, in insertion
    /// order. Rows that cannot be parsed are skipped with a warning.
    pub fn find_in_range(
        &self,
        kind: RecordKind,
        owner_id: &str,
        range: &DateRange,
    ) -> Result<Vec<HealthRecord>> {
        let start = format_date(range.start);
        let end = format_date(range.end);
        self.select(
            kind,
            "owner_id = ?1 AND date >= ?2 AND date <= ?3 ORDER BY rowid",
            &[&owner_id, &start, &end],
            Malformed::Skip,
        )
    }

    /// Every record of `kind` for one owner, newest date first.
    pub fn list_records(&self, kind: RecordKind, owner_id: &str) -> Result<Vec<HealthRecord>> {
        self.select(
            kind,
            "owner_id = ?1 ORDER BY date DESC, created_at DESC",
            &[&owner_id],
            Malformed::Fail,
        )
    }

    /// The `limit` most recently created records of `kind`.
    pub fn recent_records(
        &self,
        kind: RecordKind,
        owner_id: &str,
        limit: u32,
    ) -> Result<Vec<HealthRecord>> {
        // no SQL LIMIT: unreadable rows must not use up the quota
        let mut records = self.select(
            kind,
            "owner_id = ?1 ORDER BY created_at DESC, rowid DESC",
            &[&owner_id],
            Malformed::Skip,
        )?;
        records.truncate(limit as usize);
        Ok(records)
    }

    pub fn get_record(
        &self,
        kind: RecordKind,
        owner_id: &str,
        id: &str,
    ) -> Result<Option<HealthRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE owner_id = ?1 AND id = ?2",
            columns(kind),
            kind.table()
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let row = stmt
            .query_row(params![owner_id, id], |row| RecordRow::read(kind, row))
            .optional()?;
        row.map(RecordRow::into_record).transpose()
    }

    /// Overwrite the stored fields of `record`, matched by owner and id.
    /// Returns false when no such row exists.
    pub fn update_record(&self, record: &HealthRecord) -> Result<bool> {
        let count = match record {
            HealthRecord::Diet(e) => self.conn.execute(
                "UPDATE diet SET meal = ?3, food = ?4, calories = ?5, date = ?6, time = ?7
                 WHERE owner_id = ?1 AND id = ?2",
                params![
                    e.owner_id,
                    e.id,
                    e.meal.to_string(),
                    e.food,
                    e.calories,
                    format_date(e.date),
                    e.time,
                ],
            )?,
            HealthRecord::Exercise(e) => self.conn.execute(
                "UPDATE exercise SET kind = ?3, duration = ?4, intensity = ?5, date = ?6, time = ?7
                 WHERE owner_id = ?1 AND id = ?2",
                params![
                    e.owner_id,
                    e.id,
                    e.kind.to_string(),
                    e.duration_minutes,
                    e.intensity.to_string(),
                    format_date(e.date),
                    e.time,
                ],
            )?,
            HealthRecord::Sleep(e) => self.conn.execute(
                "UPDATE sleep SET bedtime = ?3, waketime = ?4, quality = ?5, notes = ?6, date = ?7
                 WHERE owner_id = ?1 AND id = ?2",
                params![
                    e.owner_id,
                    e.id,
                    format_datetime(e.bedtime),
                    format_datetime(e.waketime),
                    e.quality.to_string(),
                    e.notes,
                    format_date(e.date),
                ],
            )?,
            HealthRecord::Weight(e) => self.conn.execute(
                "UPDATE weight SET weight = ?3, date = ?4, time = ?5
                 WHERE owner_id = ?1 AND id = ?2",
                params![
                    e.owner_id,
                    e.id,
                    e.weight_kg,
                    format_date(e.date),
                    e.time,
                ],
            )?,
        };
        Ok(count > 0)
    }

    pub fn delete_record(&self, kind: RecordKind, owner_id: &str, id: &str) -> Result<bool> {
        let sql = format!("DELETE FROM {} WHERE owner_id = ?1 AND id = ?2", kind.table());
        let count = self.conn.execute(&sql, params![owner_id, id])?;
        Ok(count > 0)
    }

    /// Most recent readable weight by date and time of day.
    pub fn latest_weight(&self, owner_id: &str) -> Result<Option<WeightEntry>> {
        let records = self.select(
            RecordKind::Weight,
            "owner_id = ?1 ORDER BY date DESC, time DESC, rowid DESC",
            &[&owner_id],
            Malformed::Skip,
        )?;
        Ok(records.into_iter().find_map(|r| match r {
            HealthRecord::Weight(w) => Some(w),
            _ => None,
        }))
    }

    fn select(
        &self,
        kind: RecordKind,
        clause: &str,
        args: &[&dyn ToSql],
        malformed: Malformed,
    ) -> Result<Vec<HealthRecord>> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            columns(kind),
            kind.table(),
            clause
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map(args, |row| RecordRow::read(kind, row))?;

        let mut records = Vec::new();
        for row in rows {
            let raw = row?;
            let id = raw.id().to_string();
            match raw.into_record() {
                Ok(record) => records.push(record),
                Err(e) if malformed == Malformed::Skip => {
                    tracing::warn!(%kind, id = %id, error = %e, "skipping malformed record");
                }
                Err(e) => return Err(e.context(format!("malformed {} record {}", kind, id))),
            }
        }
        Ok(records)
    }
}
