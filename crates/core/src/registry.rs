//! Hall registry - authoring-time list of exam halls for one request
//!
//! The registry only shapes the `exam_halls` list handed to generation; it
//! persists nothing itself.

use crate::error::{Error, Result};
use crate::models::Hall;

/// Ordered, name-unique list of halls
#[derive(Debug, Clone, Default)]
pub struct HallRegistry {
    halls: Vec<Hall>,
}

impl HallRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry by adding each hall in order
    pub fn from_halls<I: IntoIterator<Item = Hall>>(halls: I) -> Result<Self> {
        let mut registry = Self::new();
        for hall in halls {
            registry.add(hall)?;
        }
        Ok(registry)
    }

    /// Add a hall, computing its columns when not given
    pub fn add(&mut self, hall: Hall) -> Result<&Hall> {
        let name = hall.hall_name.trim();
        if name.is_empty() {
            return Err(Error::InvalidHallGeometry("hall name is empty".into()));
        }
        if hall.capacity == 0 {
            return Err(Error::InvalidHallGeometry(format!(
                "hall '{}' must have a positive capacity",
                name
            )));
        }
        if hall.rows == 0 {
            return Err(Error::InvalidHallGeometry(format!(
                "hall '{}' must have at least one row",
                name
            )));
        }
        if self.contains(name) {
            return Err(Error::DuplicateHallName(name.to_string()));
        }

        // Stricter than the seating rules require: the grid must hold the full
        // capacity, not just the students actually seated
        let hall = hall.normalized();
        if hall.grid_slots() < hall.capacity as usize {
            return Err(Error::InvalidHallGeometry(format!(
                "hall '{}' has a {}x{} grid ({} seats) but capacity {}; \
                 rows x columns must cover the full capacity",
                hall.hall_name,
                hall.rows,
                hall.columns,
                hall.grid_slots(),
                hall.capacity
            )));
        }

        tracing::debug!(
            hall_name = %hall.hall_name,
            capacity = hall.capacity,
            rows = hall.rows,
            columns = hall.columns,
            "Registered hall"
        );
        self.halls.push(hall);
        Ok(&self.halls[self.halls.len() - 1])
    }

    /// Remove the hall at `index`, if any
    pub fn remove(&mut self, index: usize) -> Option<Hall> {
        (index < self.halls.len()).then(|| self.halls.remove(index))
    }

    /// Check if a hall name is taken
    pub fn contains(&self, hall_name: &str) -> bool {
        let hall_name = hall_name.trim();
        self.halls.iter().any(|h| h.hall_name == hall_name)
    }

    /// Registered halls in insertion order
    pub fn halls(&self) -> &[Hall] {
        &self.halls
    }

    /// Sum of hall capacities
    pub fn total_capacity(&self) -> usize {
        self.halls.iter().map(|h| h.capacity as usize).sum()
    }

    pub fn len(&self) -> usize {
        self.halls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.halls.is_empty()
    }

    pub fn into_halls(self) -> Vec<Hall> {
        self.halls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_computes_columns() {
        let mut registry = HallRegistry::new();
        let hall = Hall {
            hall_name: "Main".into(),
            capacity: 30,
            rows: 6,
            columns: 0,
        };
        let added = registry.add(hall).unwrap();
        assert_eq!(added.columns, 5);
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut registry = HallRegistry::new();
        registry.add(Hall::new("Main", 20, 5)).unwrap();

        let err = registry.add(Hall::new("Main", 40, 8)).unwrap_err();
        assert!(matches!(err, Error::DuplicateHallName(ref n) if n == "Main"));
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.halls()[0].capacity, 20);
    }

    #[test]
    fn test_duplicate_name_ignores_surrounding_whitespace() {
        let mut registry = HallRegistry::new();
        registry.add(Hall::new("Main", 20, 5)).unwrap();
        assert!(registry.add(Hall::new(" Main ", 20, 5)).is_err());
    }

    #[test]
    fn test_invalid_geometry_rejected() {
        let mut registry = HallRegistry::new();
        assert!(matches!(
            registry.add(Hall::new("Zero", 0, 5)),
            Err(Error::InvalidHallGeometry(_))
        ));
        assert!(matches!(
            registry.add(Hall::new("NoRows", 10, 0)),
            Err(Error::InvalidHallGeometry(_))
        ));
        assert!(matches!(
            registry.add(Hall::new("Cramped", 30, 5).with_columns(4)),
            Err(Error::InvalidHallGeometry(_))
        ));
        assert!(matches!(
            registry.add(Hall::new("  ", 10, 2)),
            Err(Error::InvalidHallGeometry(_))
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_undersized_grid_message_names_the_rule() {
        let mut registry = HallRegistry::new();
        let err = registry
            .add(Hall::new("Cramped", 30, 5).with_columns(4))
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("5x4 grid (20 seats) but capacity 30"));
        assert!(message.contains("must cover the full capacity"));
    }

    #[test]
    fn test_remove_by_index() {
        let mut registry =
            HallRegistry::from_halls(vec![Hall::new("A", 10, 2), Hall::new("B", 12, 3)]).unwrap();
        assert_eq!(registry.total_capacity(), 22);

        let removed = registry.remove(0).unwrap();
        assert_eq!(removed.hall_name, "A");
        assert!(registry.remove(5).is_none());
        assert_eq!(registry.len(), 1);

        // Freed name can be reused
        registry.add(Hall::new("A", 8, 2)).unwrap();
        assert_eq!(registry.into_halls().len(), 2);
    }
}
