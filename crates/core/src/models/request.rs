//! Seating request models

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Hall;

/// Placement options chosen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatingOptions {
    /// Interleave classes round-robin before filling halls
    pub shuffle_same_class: bool,
    /// Advisory minimum grid distance between classmates (reported, not enforced)
    pub min_distance_between_same_class: u32,
    /// Randomly permute students within each hall before numbering seats
    pub randomize_seats: bool,
}

impl Default for SeatingOptions {
    fn default() -> Self {
        Self {
            shuffle_same_class: true,
            min_distance_between_same_class: 1,
            randomize_seats: false,
        }
    }
}

impl SeatingOptions {
    /// Minimum distance, clamped to at least 1
    pub fn min_distance(&self) -> u32 {
        self.min_distance_between_same_class.max(1)
    }
}

/// Seating request as submitted by a caller, before roster lookup
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingDraft {
    pub exam_name: String,
    pub exam_date: Option<NaiveDate>,
    pub classes: Vec<String>,
    pub exam_halls: Vec<Hall>,
    #[serde(default)]
    pub options: SeatingOptions,
}

impl SeatingDraft {
    pub fn new(exam_name: impl Into<String>, exam_date: NaiveDate) -> Self {
        Self {
            exam_name: exam_name.into(),
            exam_date: Some(exam_date),
            ..Default::default()
        }
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_halls(mut self, halls: Vec<Hall>) -> Self {
        self.exam_halls = halls;
        self
    }

    pub fn with_options(mut self, options: SeatingOptions) -> Self {
        self.options = options;
        self
    }

    /// Selected classes with blanks and repeats dropped, first occurrence wins
    pub fn distinct_classes(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.classes
            .iter()
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .filter(|c| seen.insert(c.to_string()))
            .map(str::to_string)
            .collect()
    }
}

/// Fully resolved seating request: the draft plus roster-derived counts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExamSeatingRequest {
    pub exam_name: String,
    pub exam_date: Option<NaiveDate>,
    pub classes: Vec<String>,
    pub total_students: u32,
    pub total_teachers: u32,
    pub exam_halls: Vec<Hall>,
    pub options: SeatingOptions,
}

impl ExamSeatingRequest {
    pub fn from_draft(draft: SeatingDraft, total_students: u32, total_teachers: u32) -> Self {
        let classes = draft.distinct_classes();
        Self {
            exam_name: draft.exam_name.trim().to_string(),
            exam_date: draft.exam_date,
            classes,
            total_students,
            total_teachers,
            exam_halls: draft.exam_halls,
            options: draft.options,
        }
    }

    /// Sum of configured hall capacities
    pub fn total_capacity(&self) -> usize {
        self.exam_halls.iter().map(|h| h.capacity as usize).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = SeatingOptions::default();
        assert!(options.shuffle_same_class);
        assert!(!options.randomize_seats);
        assert_eq!(options.min_distance(), 1);
    }

    #[test]
    fn test_min_distance_clamped() {
        let options = SeatingOptions {
            min_distance_between_same_class: 0,
            ..Default::default()
        };
        assert_eq!(options.min_distance(), 1);
    }

    #[test]
    fn test_partial_options_deserialize() {
        let options: SeatingOptions = serde_json::from_str(r#"{"randomize_seats":true}"#).unwrap();
        assert!(options.randomize_seats);
        assert!(options.shuffle_same_class);
    }

    #[test]
    fn test_distinct_classes() {
        let draft = SeatingDraft::default().with_classes(["10A", " 10B", "10A", "", "10B "]);
        assert_eq!(draft.distinct_classes(), vec!["10A", "10B"]);
    }

    #[test]
    fn test_request_total_capacity() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let draft = SeatingDraft::new("Finals", date)
            .with_classes(["A"])
            .with_halls(vec![Hall::new("H1", 20, 5), Hall::new("H2", 15, 3)]);
        let request = ExamSeatingRequest::from_draft(draft, 10, 2);
        assert_eq!(request.total_capacity(), 35);
        assert_eq!(request.classes, vec!["A"]);
    }
}
