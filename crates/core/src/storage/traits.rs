//! Storage repository traits
//!
//! These traits define the persistence interface for seating records,
//! allowing for different implementations (SQLite, mock, remote backend).

use uuid::Uuid;

use crate::error::{Error, Result};
use crate::models::{ExamSeatingRecord, SeatingRecordSummary};
use crate::roster::{RosterSource, TeacherSource};

/// Seating record repository operations
pub trait SeatingRepository {
    /// Persist a new record and return its ID
    fn create_seating(&self, record: &ExamSeatingRecord) -> Result<Uuid>;

    /// Find a record by ID
    fn find_seating(&self, id: Uuid) -> Result<Option<ExamSeatingRecord>>;

    /// Get a record by ID, or `NotFound`
    fn get_seating(&self, id: Uuid) -> Result<ExamSeatingRecord> {
        self.find_seating(id)?
            .ok_or_else(|| Error::NotFound(format!("seating record {}", id)))
    }

    /// List stored records, newest first
    fn list_seatings(&self) -> Result<Vec<SeatingRecordSummary>>;

    /// Delete a record, or `NotFound`
    fn delete_seating(&self, id: Uuid) -> Result<()>;
}

/// Combined storage interface
///
/// Everything the seating service needs from one backend.
pub trait Storage: RosterSource + TeacherSource + SeatingRepository {}

// Blanket implementation: any type implementing all traits implements Storage
impl<T> Storage for T where T: RosterSource + TeacherSource + SeatingRepository {}
