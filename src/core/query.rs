use anyhow::Result;
use chrono::NaiveDate;

use super::period::DateRange;
use crate::db::Database;
use crate::models::record::{HealthRecord, RecordKind};

pub struct ShowResult {
    pub kind: RecordKind,
    pub date: Option<NaiveDate>,
    pub entries: Vec<HealthRecord>,
}

/// Records of one kind: those on `date` in logging order, or else the most
/// recent `last` entries (all when `last` is `None`), newest first.
pub fn show(
    db: &Database,
    owner_id: &str,
    kind: RecordKind,
    last: Option<u32>,
    date: Option<NaiveDate>,
) -> Result<ShowResult> {
    if let Some(d) = date {
        let entries = db.find_in_range(kind, owner_id, &DateRange::new(d, d))?;
        return Ok(ShowResult {
            kind,
            date: Some(d),
            entries,
        });
    }

    let mut entries = db.list_records(kind, owner_id)?;
    if let Some(n) = last {
        entries.truncate(n as usize);
    }
    Ok(ShowResult {
        kind,
        date: None,
        entries,
    })
}

/// One record by id, scoped to its owner.
pub fn get(
    db: &Database,
    owner_id: &str,
    kind: RecordKind,
    id: &str,
) -> Result<Option<HealthRecord>> {
    db.get_record(kind, owner_id, id)
}

/// Delete one record. Returns `false` when no such record exists.
pub fn delete(db: &Database, owner_id: &str, kind: RecordKind, id: &str) -> Result<bool> {
    let removed = db.delete_record(kind, owner_id, id)?;
    if removed {
        tracing::debug!(%kind, id, "record deleted");
    }
    Ok(removed)
}
