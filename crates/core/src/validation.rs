//! Pre-flight validation of a resolved seating request
//!
//! Checks run in a fixed order and stop at the first failure, so callers
//! always see the most basic problem first.

use crate::error::{Error, Result};
use crate::models::ExamSeatingRequest;
use crate::registry::HallRegistry;

/// Validate a request before any seat is allocated
pub fn validate_request(request: &ExamSeatingRequest) -> Result<()> {
    if request.exam_name.trim().is_empty() || request.exam_date.is_none() {
        return Err(Error::MissingExamMetadata);
    }

    if request.classes.is_empty() {
        return Err(Error::NoClassesSelected);
    }

    if request.total_students == 0 {
        return Err(Error::NoStudentsFound);
    }

    if request.exam_halls.is_empty() {
        return Err(Error::NoHallsConfigured);
    }

    let halls = request.exam_halls.len();
    if (request.total_teachers as usize) < halls {
        return Err(Error::InsufficientTeachers {
            required: halls,
            available: request.total_teachers as usize,
        });
    }

    let capacity = request.total_capacity();
    if request.total_students as usize > capacity {
        return Err(Error::InsufficientCapacity {
            students: request.total_students as usize,
            capacity,
        });
    }

    // Halls may not have come through a registry; re-run its checks
    HallRegistry::from_halls(request.exam_halls.iter().cloned())?;

    Ok(())
}
