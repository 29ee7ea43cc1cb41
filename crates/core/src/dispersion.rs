//! Same-class dispersion diagnostics
//!
//! `min_distance_between_same_class` is advisory: placement never changes to
//! honour it. This module only counts how often it is not met so the result
//! can be reported.

use crate::models::HallResult;

/// Chebyshev distance between two 1-based grid cells (diagonal neighbours are 1 apart)
pub fn seat_distance(a: (u32, u32), b: (u32, u32)) -> u32 {
    a.0.abs_diff(b.0).max(a.1.abs_diff(b.1))
}

/// Count pairs of classmates in one hall seated closer than `min_distance`.
///
/// Quadratic in the hall size, which is bounded by capacity.
pub fn close_same_class_pairs(hall: &HallResult, min_distance: u32) -> u32 {
    if min_distance <= 1 {
        // Distinct seats are always at least 1 apart
        return 0;
    }

    let seats = &hall.students;
    let mut count = 0;
    for (i, a) in seats.iter().enumerate() {
        for b in &seats[i + 1..] {
            if a.student.class_name == b.student.class_name
                && seat_distance((a.row, a.column), (b.row, b.column)) < min_distance
            {
                count += 1;
            }
        }
    }
    count
}

/// Total close classmate pairs across halls; logs each hall that has any
pub fn dispersion_warnings(halls: &[HallResult], min_distance: u32) -> u32 {
    halls
        .iter()
        .map(|hall| {
            let pairs = close_same_class_pairs(hall, min_distance);
            if pairs > 0 {
                tracing::warn!(
                    hall_name = %hall.hall_name,
                    pairs,
                    min_distance,
                    "Classmates seated closer than the requested minimum distance"
                );
            }
            pairs
        })
        .sum()
}
