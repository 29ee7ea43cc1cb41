//! Persisted seating arrangement

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{HallResult, SeatingOptions};

/// Aggregate figures for a generated arrangement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingSummary {
    /// Seated students over total capacity, e.g. `"87.50%"`
    pub utilization_rate: String,
    #[serde(default)]
    pub total_capacity: u64,
    #[serde(default)]
    pub halls_used: u32,
    /// Same-class pairs seated closer than the configured minimum distance
    #[serde(default)]
    pub dispersion_warnings: u32,
}

impl SeatingSummary {
    pub fn compute(halls: &[HallResult], dispersion_warnings: u32) -> Self {
        let seated: u64 = halls.iter().map(|h| u64::from(h.total_students)).sum();
        let total_capacity: u64 = halls.iter().map(|h| u64::from(h.capacity)).sum();
        Self {
            utilization_rate: utilization_rate(seated, total_capacity),
            total_capacity,
            halls_used: halls.iter().filter(|h| h.is_used()).count() as u32,
            dispersion_warnings,
        }
    }
}

/// Format `students / capacity` as a two-decimal percentage
pub fn utilization_rate(students: u64, capacity: u64) -> String {
    if capacity == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", students as f64 * 100.0 / capacity as f64)
}

/// A generated and stored exam seating arrangement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExamSeatingRecord {
    pub id: Uuid,
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub classes: Vec<String>,
    pub total_students: u32,
    pub total_teachers: u32,
    pub exam_halls: Vec<HallResult>,
    pub options: SeatingOptions,
    pub summary: SeatingSummary,
    pub created_at: DateTime<Utc>,
}

impl ExamSeatingRecord {
    /// The list entry stored alongside this record
    pub fn summary_view(&self) -> SeatingRecordSummary {
        SeatingRecordSummary {
            id: self.id,
            exam_name: self.exam_name.clone(),
            exam_date: self.exam_date,
            classes: self.classes.clone(),
            total_students: self.total_students,
            hall_count: self.exam_halls.len() as u32,
            utilization_rate: self.summary.utilization_rate.clone(),
            created_at: self.created_at,
        }
    }
}

/// List entry for stored arrangements
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatingRecordSummary {
    pub id: Uuid,
    pub exam_name: String,
    pub exam_date: NaiveDate,
    pub classes: Vec<String>,
    pub total_students: u32,
    pub hall_count: u32,
    pub utilization_rate: String,
    pub created_at: DateTime<Utc>,
}
