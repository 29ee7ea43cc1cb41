//! Seating service - the entry point for generating and managing arrangements
//!
//! Generation runs strictly in sequence: roster lookup, teacher count,
//! validation, allocation, supervisor assignment, persistence. Nothing is
//! written unless every earlier step succeeded.

use rand::Rng;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::allocator::allocate;
use crate::dispersion::dispersion_warnings;
use crate::error::{Error, Result};
use crate::invariants::assert_record_invariants;
use crate::models::{
    ExamSeatingRecord, ExamSeatingRequest, Hall, SeatingDraft, SeatingRecordSummary,
    SeatingSummary,
};
use crate::roster::{RosterSource, TeacherSource};
use crate::storage::{SeatingRepository, Storage};
use crate::supervisor::assign_supervisors;
use crate::validation::validate_request;

/// Orchestrates seating generation over injected directories and storage
pub struct SeatingService<'a> {
    roster: &'a dyn RosterSource,
    teachers: &'a dyn TeacherSource,
    records: &'a dyn SeatingRepository,
}

impl<'a> SeatingService<'a> {
    pub fn new(
        roster: &'a dyn RosterSource,
        teachers: &'a dyn TeacherSource,
        records: &'a dyn SeatingRepository,
    ) -> Self {
        Self {
            roster,
            teachers,
            records,
        }
    }

    /// Use one backend for directories and records
    pub fn with_storage<S: Storage + 'a>(storage: &'a S) -> Self {
        Self::new(storage, storage, storage)
    }

    /// Generate and persist an arrangement using the thread RNG
    pub fn generate(&self, draft: SeatingDraft) -> Result<ExamSeatingRecord> {
        self.generate_with_rng(draft, &mut rand::thread_rng())
    }

    /// Generate and persist an arrangement with a caller-supplied RNG
    #[instrument(skip(self, draft, rng), fields(exam_name = %draft.exam_name, halls = draft.exam_halls.len()))]
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        draft: SeatingDraft,
        rng: &mut R,
    ) -> Result<ExamSeatingRecord> {
        let mut request = ExamSeatingRequest::from_draft(draft, 0, 0);

        let roster = self.roster.fetch_class_roster(&request.classes)?;
        let students = roster.flatten(&request.classes);
        if students.len() != roster.total_students as usize {
            warn!(
                reported = roster.total_students,
                distinct = students.len(),
                "Roster total differs from distinct students; using distinct"
            );
        }
        request.total_students = u32::try_from(students.len()).unwrap_or(u32::MAX);
        request.total_teachers = self.teachers.available_teacher_count()?;

        if let Err(e) = validate_request(&request) {
            info!(error = %e, "Seating request rejected");
            return Err(e);
        }

        let halls: Vec<Hall> = request.exam_halls.iter().map(Hall::normalized).collect();
        let mut hall_results = allocate(students, &halls, &request.options, rng)?;

        let teachers = self.teachers.available_teachers()?;
        assign_supervisors(&mut hall_results, &teachers)?;

        let warnings = dispersion_warnings(&hall_results, request.options.min_distance());
        let summary = SeatingSummary::compute(&hall_results, warnings);

        let record = ExamSeatingRecord {
            id: Uuid::new_v4(),
            exam_name: request.exam_name,
            exam_date: request.exam_date.ok_or(Error::MissingExamMetadata)?,
            classes: request.classes,
            total_students: request.total_students,
            total_teachers: request.total_teachers,
            exam_halls: hall_results,
            options: request.options,
            summary,
            created_at: chrono::Utc::now(),
        };
        assert_record_invariants(&record);

        self.records.create_seating(&record)?;
        info!(
            record_id = %record.id,
            students = record.total_students,
            utilization = %record.summary.utilization_rate,
            "Seating arrangement generated"
        );
        Ok(record)
    }

    /// Stored arrangements, newest first
    pub fn list(&self) -> Result<Vec<SeatingRecordSummary>> {
        self.records.list_seatings()
    }

    /// A stored arrangement, or `NotFound`
    pub fn get(&self, id: Uuid) -> Result<ExamSeatingRecord> {
        self.records.get_seating(id)
    }

    /// Delete a stored arrangement, or `NotFound`
    #[instrument(skip(self))]
    pub fn delete(&self, id: Uuid) -> Result<()> {
        self.records.delete_seating(id)?;
        info!(record_id = %id, "Seating arrangement deleted");
        Ok(())
    }
}
