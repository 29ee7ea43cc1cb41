//! Seat allocator
//!
//! Places a flattened student list into halls in three phases:
//!
//! 1. **Interleave** - when `shuffle_same_class` is set, students are grouped
//!    by class and taken round-robin so consecutive students rarely share a
//!    class. Otherwise roster order is kept.
//! 2. **Distribute** - halls are filled in order, each up to its seat limit.
//! 3. **Place** - within a hall students get seat numbers `1..=n`, optionally
//!    after a random permutation, and each number maps to a `(row, column)`.
//!
//! Randomness is injected so callers can pin it down. With `randomize_seats`
//! off the RNG is never touched and output is fully deterministic.
//!
//! Permuting within a hall can put classmates side by side again. That is
//! accepted: dispersion from interleaving is a statistical property, not a
//! guarantee.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, instrument};

use crate::error::{Error, Result};
use crate::invariants::assert_hall_result_invariants;
use crate::models::{seat_position, Hall, HallResult, SeatingOptions, Student, StudentSeat};

/// Round-robin students across class groups.
///
/// Groups appear in the order their class is first seen; order within a
/// class is preserved.
pub fn interleave_by_class(students: Vec<Student>) -> Vec<Student> {
    let total = students.len();
    let mut group_index: HashMap<String, usize> = HashMap::new();
    let mut groups: Vec<std::collections::VecDeque<Student>> = Vec::new();

    for student in students {
        let idx = *group_index
            .entry(student.class_name.clone())
            .or_insert_with(|| {
                groups.push(Default::default());
                groups.len() - 1
            });
        groups[idx].push_back(student);
    }

    let mut interleaved = Vec::with_capacity(total);
    while interleaved.len() < total {
        for group in groups.iter_mut() {
            if let Some(student) = group.pop_front() {
                interleaved.push(student);
            }
        }
    }
    interleaved
}

/// Split the ordered students into per-hall chunks, filling each hall before
/// moving to the next.
///
/// Fails with `CapacityExceeded` if students remain once every hall is full;
/// no student is ever dropped.
pub fn distribute(students: Vec<Student>, halls: &[Hall]) -> Result<Vec<Vec<Student>>> {
    let mut remaining = students.into_iter();
    let mut left = remaining.len();
    let mut chunks = Vec::with_capacity(halls.len());

    for hall in halls {
        let take = hall.seat_limit().min(left);
        chunks.push(remaining.by_ref().take(take).collect::<Vec<_>>());
        left -= take;
    }

    if left > 0 {
        return Err(Error::CapacityExceeded { unplaced: left });
    }
    Ok(chunks)
}

/// Number the students' seats within one hall
pub fn place_in_hall<R: Rng + ?Sized>(
    hall: &Hall,
    mut students: Vec<Student>,
    randomize: bool,
    rng: &mut R,
) -> HallResult {
    if randomize {
        students.shuffle(rng);
    }

    let mut result = HallResult::empty(hall);
    let columns = result.columns;
    result.students = students
        .into_iter()
        .enumerate()
        .map(|(i, student)| {
            let seat_number = i as u32 + 1;
            let (row, column) = seat_position(seat_number, columns);
            StudentSeat {
                student,
                seat_number,
                row,
                column,
            }
        })
        .collect();
    result.total_students = result.students.len() as u32;
    result
}

/// Run all three phases and return one result per hall, in hall order.
///
/// Assumes capacity was validated beforehand; if it was not, the call fails
/// with `CapacityExceeded` rather than truncating.
#[instrument(skip_all, fields(students = students.len(), halls = halls.len()))]
pub fn allocate<R: Rng + ?Sized>(
    students: Vec<Student>,
    halls: &[Hall],
    options: &SeatingOptions,
    rng: &mut R,
) -> Result<Vec<HallResult>> {
    let ordered = if options.shuffle_same_class {
        interleave_by_class(students)
    } else {
        students
    };

    let chunks = distribute(ordered, halls)?;

    let results: Vec<HallResult> = halls
        .iter()
        .zip(chunks)
        .map(|(hall, chunk)| place_in_hall(hall, chunk, options.randomize_seats, &mut *rng))
        .collect();

    for result in &results {
        assert_hall_result_invariants(result);
        debug!(
            hall_name = %result.hall_name,
            seated = result.total_students,
            capacity = result.capacity,
            "Hall filled"
        );
    }

    Ok(results)
}
