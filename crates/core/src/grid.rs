//! Seat grid reconstruction for display
//!
//! Rebuilds a hall's `rows x columns` grid from its seat list in one pass.
//! Seats without a usable position (missing, out of bounds, or colliding with
//! an earlier seat) fall back to the first empty cell in row-major order.

use crate::models::{HallResult, StudentSeat};

/// Row-major grid of optional seats
#[derive(Debug)]
pub struct SeatGrid<'a> {
    rows: u32,
    columns: u32,
    cells: Vec<Option<&'a StudentSeat>>,
    /// Seats that could not be placed because the grid is full
    overflow: Vec<&'a StudentSeat>,
}

impl<'a> SeatGrid<'a> {
    pub fn from_hall(hall: &'a HallResult) -> Self {
        let rows = hall.rows.max(1);
        let columns = hall.columns.max(1);
        let mut cells = vec![None; rows as usize * columns as usize];
        let mut pending = Vec::new();

        for seat in &hall.students {
            let in_bounds = seat.has_position() && seat.row <= rows && seat.column <= columns;
            if in_bounds {
                let idx = (seat.row as usize - 1) * columns as usize + (seat.column as usize - 1);
                if cells[idx].is_none() {
                    cells[idx] = Some(seat);
                    continue;
                }
            }
            pending.push(seat);
        }

        // Sequential fill, resuming from the last filled cell
        let mut overflow = Vec::new();
        let mut cursor = 0;
        for seat in pending {
            while cursor < cells.len() && cells[cursor].is_some() {
                cursor += 1;
            }
            match cells.get_mut(cursor) {
                Some(cell) => *cell = Some(seat),
                None => overflow.push(seat),
            }
        }

        if !overflow.is_empty() {
            tracing::warn!(
                hall_name = %hall.hall_name,
                overflow = overflow.len(),
                "More seats than grid cells"
            );
        }

        Self {
            rows,
            columns,
            cells,
            overflow,
        }
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn columns(&self) -> u32 {
        self.columns
    }

    /// Seat at a 1-based position
    pub fn get(&self, row: u32, column: u32) -> Option<&'a StudentSeat> {
        if row == 0 || column == 0 || row > self.rows || column > self.columns {
            return None;
        }
        self.cells[(row as usize - 1) * self.columns as usize + (column as usize - 1)]
    }

    /// Iterate rows, each a slice of cells
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Option<&'a StudentSeat>]> {
        self.cells.chunks(self.columns as usize)
    }

    pub fn occupied(&self) -> usize {
        self.cells.iter().filter(|c| c.is_some()).count()
    }

    pub fn overflow(&self) -> &[&'a StudentSeat] {
        &self.overflow
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Hall, Student};

    fn seat(id: &str, n: u32, row: u32, column: u32) -> StudentSeat {
        StudentSeat {
            student: Student::new(id, id, "A"),
            seat_number: n,
            row,
            column,
        }
    }

    fn hall(seats: Vec<StudentSeat>) -> HallResult {
        let mut hall = HallResult::empty(&Hall::new("H", 6, 2));
        hall.total_students = seats.len() as u32;
        hall.students = seats;
        hall
    }

    #[test]
    fn test_positions_used_directly() {
        let h = hall(vec![seat("a", 1, 1, 1), seat("b", 2, 2, 3)]);
        let grid = SeatGrid::from_hall(&h);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.columns(), 3);
        assert_eq!(grid.get(1, 1).unwrap().student.id, "a");
        assert_eq!(grid.get(2, 3).unwrap().student.id, "b");
        assert!(grid.get(1, 2).is_none());
        assert!(grid.get(0, 1).is_none());
        assert_eq!(grid.occupied(), 2);
    }

    #[test]
    fn test_missing_positions_fill_first_empty_cell() {
        let h = hall(vec![seat("a", 1, 1, 1), seat("b", 2, 0, 0), seat("c", 3, 9, 9)]);
        let grid = SeatGrid::from_hall(&h);
        assert_eq!(grid.get(1, 2).unwrap().student.id, "b");
        assert_eq!(grid.get(1, 3).unwrap().student.id, "c");
    }

    #[test]
    fn test_collision_falls_back() {
        let h = hall(vec![seat("a", 1, 1, 1), seat("b", 2, 1, 1)]);
        let grid = SeatGrid::from_hall(&h);
        assert_eq!(grid.get(1, 1).unwrap().student.id, "a");
        assert_eq!(grid.get(1, 2).unwrap().student.id, "b");
    }

    #[test]
    fn test_overflow_reported() {
        let seats = (1..=7).map(|i| seat(&i.to_string(), i, 0, 0)).collect();
        let h = hall(seats);
        let grid = SeatGrid::from_hall(&h);
        assert_eq!(grid.occupied(), 6);
        assert_eq!(grid.overflow().len(), 1);
        assert_eq!(grid.iter_rows().count(), 2);
    }
}
