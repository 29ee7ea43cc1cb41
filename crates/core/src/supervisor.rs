//! Supervisor assignment - one teacher per hall, paired by position

use crate::error::{Error, Result};
use crate::models::{HallResult, Teacher};

/// Give `teachers[i]` to `halls[i]`.
///
/// Teachers beyond the hall count stay unassigned. A pool smaller than the
/// hall list is rejected before any hall is touched.
pub fn assign_supervisors(halls: &mut [HallResult], teachers: &[Teacher]) -> Result<()> {
    if teachers.len() < halls.len() {
        return Err(Error::InsufficientTeachers {
            required: halls.len(),
            available: teachers.len(),
        });
    }

    for (hall, teacher) in halls.iter_mut().zip(teachers) {
        tracing::debug!(hall_name = %hall.hall_name, teacher_id = %teacher.id, "Assigned supervisor");
        hall.supervisor = Some(teacher.clone());
    }
    Ok(())
}
