//! Exam hall model - capacity plus a row/column seat grid

use serde::{Deserialize, Serialize};

use super::{Student, Teacher};

/// An exam hall as configured for one seating request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hall {
    pub hall_name: String,
    pub capacity: u32,
    pub rows: u32,
    /// Zero means "derive from capacity and rows"
    #[serde(default)]
    pub columns: u32,
}

impl Hall {
    /// Create a hall, deriving columns as `ceil(capacity / rows)`
    pub fn new(hall_name: impl Into<String>, capacity: u32, rows: u32) -> Self {
        Self {
            hall_name: hall_name.into(),
            capacity,
            rows,
            columns: derive_columns(capacity, rows),
        }
    }

    /// Override the derived column count. Zero keeps the derived value.
    pub fn with_columns(mut self, columns: u32) -> Self {
        if columns > 0 {
            self.columns = columns;
        }
        self
    }

    /// Row count, never less than 1
    pub fn effective_rows(&self) -> u32 {
        self.rows.max(1)
    }

    /// Column count, derived when missing and never less than 1
    pub fn effective_columns(&self) -> u32 {
        if self.columns > 0 {
            self.columns
        } else {
            derive_columns(self.capacity, self.rows)
        }
    }

    /// Number of physical seats in the grid
    pub fn grid_slots(&self) -> usize {
        self.effective_rows() as usize * self.effective_columns() as usize
    }

    /// Most students this hall can take: capacity, bounded by the grid
    pub fn seat_limit(&self) -> usize {
        (self.capacity as usize).min(self.grid_slots())
    }

    /// Copy of this hall with rows and columns coerced to usable values
    pub fn normalized(&self) -> Self {
        Self {
            hall_name: self.hall_name.trim().to_string(),
            capacity: self.capacity,
            rows: self.effective_rows(),
            columns: self.effective_columns(),
        }
    }
}

/// `ceil(capacity / rows)`, at least 1
pub fn derive_columns(capacity: u32, rows: u32) -> u32 {
    capacity.div_ceil(rows.max(1)).max(1)
}

/// Convert a 1-based seat number into a 1-based `(row, column)` pair
pub fn seat_position(seat_number: u32, columns: u32) -> (u32, u32) {
    let columns = columns.max(1);
    let seat_number = seat_number.max(1);
    let row = seat_number.div_ceil(columns);
    let column = (seat_number - 1) % columns + 1;
    (row, column)
}

/// One student placed in one seat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentSeat {
    pub student: Student,
    pub seat_number: u32,
    /// 1-based; zero when missing
    #[serde(default)]
    pub row: u32,
    /// 1-based; zero when missing
    #[serde(default)]
    pub column: u32,
}

impl StudentSeat {
    pub fn has_position(&self) -> bool {
        self.row > 0 && self.column > 0
    }
}

/// Seating outcome for a single hall
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HallResult {
    pub hall_name: String,
    pub capacity: u32,
    pub rows: u32,
    pub columns: u32,
    pub total_students: u32,
    pub students: Vec<StudentSeat>,
    pub supervisor: Option<Teacher>,
}

impl HallResult {
    /// Empty result carrying the hall's normalized geometry
    pub fn empty(hall: &Hall) -> Self {
        let hall = hall.normalized();
        Self {
            hall_name: hall.hall_name,
            capacity: hall.capacity,
            rows: hall.rows,
            columns: hall.columns,
            total_students: 0,
            students: Vec::new(),
            supervisor: None,
        }
    }

    pub fn is_used(&self) -> bool {
        self.total_students > 0
    }
}
