//! Exam seating record storage
//!
//! Records are written once and never updated; each create or delete is a
//! single statement, so a record is either fully present or absent.

use rusqlite::{params, Connection, Row};
use tracing::instrument;
use uuid::Uuid;

use super::parse::{parse_date, parse_datetime, parse_json, parse_uuid, OptionalExt};
use crate::error::{Error, Result};
use crate::models::{ExamSeatingRecord, SeatingRecordSummary};

pub struct SeatingStore<'a> {
    conn: &'a Connection,
}

impl<'a> SeatingStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a generated arrangement
    #[instrument(skip(self, record), fields(record_id = %record.id, exam_name = %record.exam_name))]
    pub fn create(&self, record: &ExamSeatingRecord) -> Result<Uuid> {
        let classes_json = serde_json::to_string(&record.classes)?;
        let halls_json = serde_json::to_string(&record.exam_halls)?;
        let options_json = serde_json::to_string(&record.options)?;
        let summary_json = serde_json::to_string(&record.summary)?;

        self.conn.execute(
            "INSERT INTO exam_seatings
             (id, exam_name, exam_date, classes_json, total_students, total_teachers, hall_count,
              halls_json, options_json, summary_json, utilization_rate, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)",
            params![
                record.id.to_string(),
                record.exam_name,
                record.exam_date.format("%Y-%m-%d").to_string(),
                classes_json,
                record.total_students,
                record.total_teachers,
                record.exam_halls.len() as u32,
                halls_json,
                options_json,
                summary_json,
                record.summary.utilization_rate,
                record.created_at.to_rfc3339(),
            ],
        )?;
        Ok(record.id)
    }

    /// Find a record by ID
    #[instrument(skip(self))]
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<ExamSeatingRecord>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exam_name, exam_date, classes_json, total_students, total_teachers,
                    halls_json, options_json, summary_json, created_at
             FROM exam_seatings WHERE id = ?1",
        )?;

        let record = stmt
            .query_row(params![id.to_string()], record_from_row)
            .optional()?;

        Ok(record)
    }

    /// List stored records, newest first
    #[instrument(skip(self))]
    pub fn list(&self) -> Result<Vec<SeatingRecordSummary>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, exam_name, exam_date, classes_json, total_students, hall_count,
                    utilization_rate, created_at
             FROM exam_seatings
             ORDER BY created_at DESC, exam_name",
        )?;

        let records = stmt
            .query_map([], |row| {
                Ok(SeatingRecordSummary {
                    id: parse_uuid(&row.get::<_, String>(0)?)?,
                    exam_name: row.get(1)?,
                    exam_date: parse_date(&row.get::<_, String>(2)?)?,
                    classes: parse_json(&row.get::<_, String>(3)?)?,
                    total_students: row.get(4)?,
                    hall_count: row.get(5)?,
                    utilization_rate: row.get(6)?,
                    created_at: parse_datetime(&row.get::<_, String>(7)?)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(records)
    }

    /// Delete a record; unknown IDs are reported as `NotFound`
    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> Result<()> {
        let deleted = self.conn.execute(
            "DELETE FROM exam_seatings WHERE id = ?1",
            params![id.to_string()],
        )?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("seating record {}", id)));
        }
        Ok(())
    }

    /// Number of stored records
    pub fn count(&self) -> Result<u64> {
        let count: u64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM exam_seatings", [], |row| row.get(0))?;
        Ok(count)
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ExamSeatingRecord> {
    Ok(ExamSeatingRecord {
        id: parse_uuid(&row.get::<_, String>(0)?)?,
        exam_name: row.get(1)?,
        exam_date: parse_date(&row.get::<_, String>(2)?)?,
        classes: parse_json(&row.get::<_, String>(3)?)?,
        total_students: row.get(4)?,
        total_teachers: row.get(5)?,
        exam_halls: parse_json(&row.get::<_, String>(6)?)?,
        options: parse_json(&row.get::<_, String>(7)?)?,
        summary: parse_json(&row.get::<_, String>(8)?)?,
        created_at: parse_datetime(&row.get::<_, String>(9)?)?,
    })
}
