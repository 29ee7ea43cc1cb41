//! Startup roster import
//!
//! ```toml
//! [[teachers]]
//! id = "t1"
//! name = "Ms. Adams"
//!
//! [[students]]
//! id = "s1"
//! name = "Ana"
//! class_name = "10A"
//! roll_number = "07"
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use seatwise_core::{Database, Student, Teacher};

use crate::error::{Error, Result};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RosterFile {
    pub teachers: Vec<Teacher>,
    pub students: Vec<Student>,
}

impl RosterFile {
    pub fn read(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        toml::from_str(&text).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Read `path` and upsert its students and teachers into `db`
pub fn import_roster(db: &Database, path: &Path) -> Result<()> {
    let roster = RosterFile::read(path)?;
    db.directory().import(&roster.students, &roster.teachers)?;
    info!(
        path = %path.display(),
        students = roster.students.len(),
        teachers = roster.teachers.len(),
        "Roster imported"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use seatwise_core::{RosterSource, TeacherSource};
    use tempfile::TempDir;

    const ROSTER: &str = r#"
[[teachers]]
id = "t1"
name = "Ms. Adams"

[[teachers]]
id = "t2"
name = "Mr. Baker"

[[students]]
id = "s1"
name = "Ana"
class_name = "10A"
roll_number = "07"

[[students]]
id = "s2"
name = "Ben"
class_name = "10A"
section = "North"

[[students]]
id = "s3"
name = "Cy"
class_name = "10B"
"#;

    #[test]
    fn test_import_roster() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, ROSTER).unwrap();

        let db = Database::open_in_memory().unwrap();
        import_roster(&db, &path).unwrap();

        let roster = db.fetch_class_roster(&["10A".to_string()]).unwrap();
        assert_eq!(roster.total_students, 2);
        assert_eq!(roster.students_by_class["10A"][0].roll_number.as_deref(), Some("07"));
        assert_eq!(roster.students_by_class["10A"][1].section.as_deref(), Some("North"));
        assert_eq!(db.available_teacher_count().unwrap(), 2);
    }

    #[test]
    fn test_reimport_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("roster.toml");
        std::fs::write(&path, ROSTER).unwrap();

        let db = Database::open_in_memory().unwrap();
        import_roster(&db, &path).unwrap();
        import_roster(&db, &path).unwrap();

        let roster = db
            .fetch_class_roster(&["10A".to_string(), "10B".to_string()])
            .unwrap();
        assert_eq!(roster.total_students, 3);
    }

    #[test]
    fn test_missing_roster_file() {
        let dir = TempDir::new().unwrap();
        let db = Database::open_in_memory().unwrap();
        assert!(matches!(
            import_roster(&db, &dir.path().join("nope.toml")),
            Err(Error::Io(_))
        ));
    }
}
