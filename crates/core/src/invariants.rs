//! Developer guardrails and invariants
//!
//! Debug assertions for detecting impossible seating states during
//! development. These checks are compiled out in release builds.

use std::collections::HashSet;

use crate::models::{ExamSeatingRecord, HallResult};

/// Validate that a hall's seats are within bounds, unique and counted
pub fn assert_hall_result_invariants(hall: &HallResult) {
    debug_assert!(
        hall.total_students as usize == hall.students.len(),
        "Hall {} reports {} students but lists {}",
        hall.hall_name,
        hall.total_students,
        hall.students.len()
    );

    debug_assert!(
        hall.total_students <= hall.capacity,
        "Hall {} seats {} students over capacity {}",
        hall.hall_name,
        hall.total_students,
        hall.capacity
    );

    let mut cells = HashSet::with_capacity(hall.students.len());
    for seat in &hall.students {
        debug_assert!(
            (1..=hall.rows).contains(&seat.row) && (1..=hall.columns).contains(&seat.column),
            "Hall {} seat {} at ({}, {}) is outside {}x{} grid",
            hall.hall_name,
            seat.seat_number,
            seat.row,
            seat.column,
            hall.rows,
            hall.columns
        );
        debug_assert!(
            cells.insert((seat.row, seat.column)),
            "Hall {} has two students at ({}, {})",
            hall.hall_name,
            seat.row,
            seat.column
        );
    }
}

/// Validate that a record seats every student exactly once
pub fn assert_record_invariants(record: &ExamSeatingRecord) {
    let seated: u32 = record.exam_halls.iter().map(|h| h.total_students).sum();
    debug_assert!(
        seated == record.total_students,
        "Record {} seats {} of {} students",
        record.id,
        seated,
        record.total_students
    );

    let mut ids = HashSet::new();
    for seat in record.exam_halls.iter().flat_map(|h| &h.students) {
        debug_assert!(
            ids.insert(seat.student.id.as_str()),
            "Record {} seats student {} twice",
            record.id,
            seat.student.id
        );
    }

    debug_assert!(
        !record.exam_name.trim().is_empty(),
        "Record {} has empty exam name",
        record.id
    );
}
