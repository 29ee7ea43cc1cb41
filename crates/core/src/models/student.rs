//! Student and teacher models

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};

/// A student as returned by the roster directory.
///
/// Carried through seating untouched, apart from `class_name` which is set to
/// the class the student was fetched under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: String,
    pub name: String,
    pub class_name: String,
    #[serde(default)]
    pub section: Option<String>,
    #[serde(default)]
    pub roll_number: Option<String>,
}

impl Student {
    pub fn new(id: impl Into<String>, name: impl Into<String>, class_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            class_name: class_name.into(),
            section: None,
            roll_number: None,
        }
    }

    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }

    pub fn with_roll_number(mut self, roll_number: impl Into<String>) -> Self {
        self.roll_number = Some(roll_number.into());
        self
    }
}

/// A teacher who can supervise an exam hall
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Teacher {
    pub id: String,
    pub name: String,
}

impl Teacher {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Students of the requested classes, keyed by class name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassRoster {
    pub total_students: u32,
    pub students_by_class: BTreeMap<String, Vec<Student>>,
}

impl ClassRoster {
    /// Build a roster, deriving the total from the class lists
    pub fn from_classes(students_by_class: BTreeMap<String, Vec<Student>>) -> Self {
        let total_students = students_by_class.values().map(Vec::len).sum::<usize>();
        let total_students = u32::try_from(total_students).unwrap_or(u32::MAX);
        Self {
            total_students,
            students_by_class,
        }
    }

    /// Flatten the roster class by class, in the given class order.
    ///
    /// Each student is tagged with the class key it was listed under. A
    /// student listed under several requested classes is kept once, under the
    /// first. Classes missing from the roster contribute nothing.
    pub fn flatten(&self, classes: &[String]) -> Vec<Student> {
        let mut seen = HashSet::new();
        let mut flat = Vec::new();
        for class in classes {
            let Some(students) = self.students_by_class.get(class) else {
                continue;
            };
            for student in students {
                if !seen.insert(student.id.as_str()) {
                    tracing::debug!(student_id = %student.id, class_name = %class, "Skipping student already listed");
                    continue;
                }
                let mut student = student.clone();
                student.class_name = class.clone();
                flat.push(student);
            }
        }
        flat
    }
}
