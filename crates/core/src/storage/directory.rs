//! Student and teacher directory storage
//!
//! Read side backs the roster and supervisor lookups used by seating. The
//! write side exists only to seed the directory (bulk import, tests); it is
//! not a roster-management workflow.

use std::collections::BTreeMap;

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{info, instrument};

use crate::error::{Error, Result};
use crate::models::{ClassRoster, Student, Teacher};

pub struct DirectoryStore<'a> {
    conn: &'a Connection,
}

impl<'a> DirectoryStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert or replace a student
    #[instrument(skip(self, student), fields(student_id = %student.id, class_name = %student.class_name))]
    pub fn add_student(&self, student: &Student, sort_order: u32) -> Result<()> {
        insert_student(self.conn, student, sort_order)
    }

    /// Insert or replace a teacher
    #[instrument(skip(self, teacher), fields(teacher_id = %teacher.id))]
    pub fn add_teacher(&self, teacher: &Teacher, is_available: bool) -> Result<()> {
        insert_teacher(self.conn, teacher, is_available)
    }

    /// Mark a teacher as available or not for supervision
    #[instrument(skip(self))]
    pub fn set_teacher_available(&self, teacher_id: &str, is_available: bool) -> Result<()> {
        let updated = self.conn.execute(
            "UPDATE teachers SET is_available = ?1 WHERE id = ?2",
            params![is_available as i32, teacher_id],
        )?;
        if updated == 0 {
            return Err(Error::NotFound(format!("teacher {}", teacher_id)));
        }
        Ok(())
    }

    /// Import students and teachers in one transaction.
    ///
    /// Students keep their list order within each class. Imported teachers
    /// are available.
    #[instrument(skip_all, fields(students = students.len(), teachers = teachers.len()))]
    pub fn import(&self, students: &[Student], teachers: &[Teacher]) -> Result<()> {
        let tx = self.conn.unchecked_transaction()?;

        let mut next_order: BTreeMap<&str, u32> = BTreeMap::new();
        for student in students {
            let order = next_order.entry(student.class_name.as_str()).or_insert(0);
            insert_student(&tx, student, *order)?;
            *order += 1;
        }
        for teacher in teachers {
            insert_teacher(&tx, teacher, true)?;
        }

        tx.commit()?;
        info!(
            students = students.len(),
            teachers = teachers.len(),
            "Directory imported"
        );
        Ok(())
    }

    /// Students of the given classes, each class in roster order
    #[instrument(skip(self))]
    pub fn fetch_class_roster(&self, classes: &[String]) -> Result<ClassRoster> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, class_name, section, roll_number FROM students
             WHERE class_name = ?1
             ORDER BY sort_order, name, id",
        )?;

        let mut students_by_class = BTreeMap::new();
        for class in classes {
            let students = stmt
                .query_map(params![class], |row| {
                    Ok(Student {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        class_name: row.get(2)?,
                        section: row.get(3)?,
                        roll_number: row.get(4)?,
                    })
                })?
                .collect::<std::result::Result<Vec<_>, _>>()?;

            if !students.is_empty() {
                students_by_class.insert(class.clone(), students);
            }
        }

        Ok(ClassRoster::from_classes(students_by_class))
    }

    /// Available teachers, ordered by name
    #[instrument(skip(self))]
    pub fn available_teachers(&self) -> Result<Vec<Teacher>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name FROM teachers WHERE is_available = 1 ORDER BY name, id",
        )?;

        let teachers = stmt
            .query_map([], |row| {
                Ok(Teacher {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(teachers)
    }

    /// Number of available teachers
    #[instrument(skip(self))]
    pub fn count_available_teachers(&self) -> Result<u32> {
        let count: u32 = self.conn.query_row(
            "SELECT COUNT(*) FROM teachers WHERE is_available = 1",
            [],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}

fn insert_student(conn: &Connection, student: &Student, sort_order: u32) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO students (id, name, class_name, section, roll_number, sort_order, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            student.id,
            student.name,
            student.class_name,
            student.section,
            student.roll_number,
            sort_order,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}

fn insert_teacher(conn: &Connection, teacher: &Teacher, is_available: bool) -> Result<()> {
    conn.execute(
        "INSERT OR REPLACE INTO teachers (id, name, is_available, created_at)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            teacher.id,
            teacher.name,
            is_available as i32,
            Utc::now().to_rfc3339(),
        ],
    )?;
    Ok(())
}
