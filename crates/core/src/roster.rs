//! Roster and teacher directories
//!
//! The seating service never reaches for a global directory; it is handed
//! these traits. [`Database`](crate::storage::Database) implements both over
//! SQLite and [`StaticDirectory`] holds fixed lists for tests and seeding.

use std::collections::BTreeMap;

use crate::error::Result;
use crate::models::{ClassRoster, Student, Teacher};

/// Student directory lookups
pub trait RosterSource {
    /// Students of each requested class. Unknown classes are simply absent.
    fn fetch_class_roster(&self, classes: &[String]) -> Result<ClassRoster>;
}

/// Teacher directory lookups
pub trait TeacherSource {
    /// Teachers available to supervise, in assignment order
    fn available_teachers(&self) -> Result<Vec<Teacher>>;

    /// Size of the supervisor pool
    fn available_teacher_count(&self) -> Result<u32> {
        let count = self.available_teachers()?.len();
        Ok(u32::try_from(count).unwrap_or(u32::MAX))
    }
}

/// In-memory directory with fixed rosters
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    classes: BTreeMap<String, Vec<Student>>,
    teachers: Vec<Teacher>,
}

impl StaticDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add students to a class, keeping insertion order
    pub fn with_class<I>(mut self, class_name: impl Into<String>, students: I) -> Self
    where
        I: IntoIterator<Item = Student>,
    {
        self.classes
            .entry(class_name.into())
            .or_default()
            .extend(students);
        self
    }

    pub fn with_teachers<I>(mut self, teachers: I) -> Self
    where
        I: IntoIterator<Item = Teacher>,
    {
        self.teachers.extend(teachers);
        self
    }

    /// All students, grouped by class
    pub fn classes(&self) -> &BTreeMap<String, Vec<Student>> {
        &self.classes
    }

    pub fn teachers(&self) -> &[Teacher] {
        &self.teachers
    }
}

impl RosterSource for StaticDirectory {
    fn fetch_class_roster(&self, classes: &[String]) -> Result<ClassRoster> {
        let selected = classes
            .iter()
            .filter_map(|c| self.classes.get(c).map(|s| (c.clone(), s.clone())))
            .collect();
        Ok(ClassRoster::from_classes(selected))
    }
}

impl TeacherSource for StaticDirectory {
    fn available_teachers(&self) -> Result<Vec<Teacher>> {
        Ok(self.teachers.clone())
    }
}
