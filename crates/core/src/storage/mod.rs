//! SQLite storage layer for Seatwise

mod directory;
mod migrations;
mod parse;
mod seatings;
mod traits;

use rusqlite::Connection;
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::error::Result;
use crate::models::{ClassRoster, ExamSeatingRecord, SeatingRecordSummary, Teacher};
use crate::roster::{RosterSource, TeacherSource};

pub use directory::DirectoryStore;
pub use seatings::SeatingStore;
pub use traits::{SeatingRepository, Storage};

/// Main database handle
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create database at the given path
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Open in-memory database (for testing)
    #[instrument]
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys = ON")?;
        let db = Self { conn };
        db.init()?;
        Ok(db)
    }

    /// Initialize database schema via migrations
    fn init(&self) -> Result<()> {
        migrations::run_migrations(&self.conn)?;
        Ok(())
    }

    /// Get current schema version
    pub fn schema_version(&self) -> Result<u32> {
        migrations::applied_version(&self.conn)
    }

    /// Get seating record store
    pub fn seatings(&self) -> SeatingStore<'_> {
        SeatingStore::new(&self.conn)
    }

    /// Get student/teacher directory store
    pub fn directory(&self) -> DirectoryStore<'_> {
        DirectoryStore::new(&self.conn)
    }
}

// Implement the service-facing traits for Database
// This lets the seating service run directly against SQLite

impl RosterSource for Database {
    fn fetch_class_roster(&self, classes: &[String]) -> Result<ClassRoster> {
        self.directory().fetch_class_roster(classes)
    }
}

impl TeacherSource for Database {
    fn available_teachers(&self) -> Result<Vec<Teacher>> {
        self.directory().available_teachers()
    }

    fn available_teacher_count(&self) -> Result<u32> {
        self.directory().count_available_teachers()
    }
}

impl SeatingRepository for Database {
    fn create_seating(&self, record: &ExamSeatingRecord) -> Result<Uuid> {
        self.seatings().create(record)
    }

    fn find_seating(&self, id: Uuid) -> Result<Option<ExamSeatingRecord>> {
        self.seatings().find_by_id(id)
    }

    fn list_seatings(&self) -> Result<Vec<SeatingRecordSummary>> {
        self.seatings().list()
    }

    fn delete_seating(&self, id: Uuid) -> Result<()> {
        self.seatings().delete(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_file_database_persists() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("seatwise.db");

        {
            let db = Database::open(&path).unwrap();
            db.directory()
                .add_teacher(&Teacher::new("t1", "Ms. Adams"), true)
                .unwrap();
        }

        let db = Database::open(&path).unwrap();
        assert_eq!(db.schema_version().unwrap(), 3);
        assert_eq!(db.available_teacher_count().unwrap(), 1);
    }

    #[test]
    fn test_get_missing_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let err = db.get_seating(Uuid::new_v4()).unwrap_err();
        assert_eq!(err.code(), "not_found");
    }
}
