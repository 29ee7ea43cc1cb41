//! Error types for Seatwise Core

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Exam name and exam date are required")]
    MissingExamMetadata,

    #[error("No classes selected")]
    NoClassesSelected,

    #[error("No students found in the selected classes")]
    NoStudentsFound,

    #[error("No exam halls configured")]
    NoHallsConfigured,

    #[error("Insufficient teachers: need {required}, have {available}")]
    InsufficientTeachers { required: usize, available: usize },

    #[error("Insufficient capacity: {students} students, total capacity {capacity}")]
    InsufficientCapacity { students: usize, capacity: usize },

    #[error("Duplicate hall name: {0}")]
    DuplicateHallName(String),

    #[error("Invalid hall geometry: {0}")]
    InvalidHallGeometry(String),

    /// Allocator ran out of seats; pre-flight validation should make this unreachable
    #[error("Capacity exceeded: {unplaced} students could not be seated")]
    CapacityExceeded { unplaced: usize },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Stable snake_case kind, used as the error code on the wire
    pub fn code(&self) -> &'static str {
        match self {
            Error::MissingExamMetadata => "missing_exam_metadata",
            Error::NoClassesSelected => "no_classes_selected",
            Error::NoStudentsFound => "no_students_found",
            Error::NoHallsConfigured => "no_halls_configured",
            Error::InsufficientTeachers { .. } => "insufficient_teachers",
            Error::InsufficientCapacity { .. } => "insufficient_capacity",
            Error::DuplicateHallName(_) => "duplicate_hall_name",
            Error::InvalidHallGeometry(_) => "invalid_hall_geometry",
            Error::CapacityExceeded { .. } => "capacity_exceeded",
            Error::NotFound(_) => "not_found",
            Error::Database(_) => "database",
            Error::Io(_) => "io",
            Error::Serialization(_) => "serialization",
        }
    }

    /// True for errors caused by the caller's input rather than the backend
    pub fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Error::Database(_) | Error::Io(_) | Error::Serialization(_) | Error::CapacityExceeded { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insufficient_teachers_message() {
        let err = Error::InsufficientTeachers {
            required: 3,
            available: 2,
        };
        assert!(err.to_string().contains("need 3, have 2"));
        assert_eq!(err.code(), "insufficient_teachers");
    }

    #[test]
    fn test_insufficient_capacity_message() {
        let err = Error::InsufficientCapacity {
            students: 50,
            capacity: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("50 students"));
        assert!(msg.contains("total capacity 40"));
    }

    #[test]
    fn test_input_error_classification() {
        assert!(Error::NoHallsConfigured.is_input_error());
        assert!(Error::NotFound("x".into()).is_input_error());
        assert!(!Error::CapacityExceeded { unplaced: 1 }.is_input_error());
    }
}
