//! Versioned schema migrations
//!
//! Applied versions are recorded in `schema_migrations`; each migration runs
//! at most once, inside its own transaction.

use chrono::Utc;
use rusqlite::{params, Connection};
use tracing::{debug, info, instrument};

use crate::error::Result;

struct Migration {
    version: u32,
    description: &'static str,
    sql: &'static str,
}

/// Versions run 1, 2, 3, ... with no gaps
const MIGRATIONS: &[Migration] = &[
    Migration {
        version: 1,
        description: "Initial directory schema",
        sql: r#"
            -- Students, grouped by class
            CREATE TABLE IF NOT EXISTS students (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                class_name TEXT NOT NULL,
                section TEXT,
                roll_number TEXT,
                sort_order INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL
            );

            -- Teachers who may supervise exam halls
            CREATE TABLE IF NOT EXISTS teachers (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                is_available INTEGER NOT NULL DEFAULT 1,
                created_at TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: 2,
        description: "Add exam seating records",
        sql: r#"
            -- Generated seating arrangements; immutable once written
            CREATE TABLE IF NOT EXISTS exam_seatings (
                id TEXT PRIMARY KEY,
                exam_name TEXT NOT NULL,
                exam_date TEXT NOT NULL,
                classes_json TEXT NOT NULL,
                total_students INTEGER NOT NULL,
                total_teachers INTEGER NOT NULL,
                hall_count INTEGER NOT NULL,
                halls_json TEXT NOT NULL,
                options_json TEXT NOT NULL,
                summary_json TEXT NOT NULL,
                utilization_rate TEXT NOT NULL,
                created_at TEXT NOT NULL
            );
        "#,
    },
    Migration {
        version: 3,
        description: "Add indexes for roster and listing queries",
        sql: r#"
            CREATE INDEX IF NOT EXISTS idx_students_class ON students(class_name, sort_order);
            CREATE INDEX IF NOT EXISTS idx_teachers_available ON teachers(is_available);
            CREATE INDEX IF NOT EXISTS idx_exam_seatings_created ON exam_seatings(created_at);
        "#,
    },
];

impl Migration {
    /// Run the SQL and record the version in one transaction
    fn apply(&self, conn: &Connection) -> Result<()> {
        let tx = conn.unchecked_transaction()?;
        tx.execute_batch(self.sql)?;
        tx.execute(
            "INSERT INTO schema_migrations (version, description, applied_at) VALUES (?1, ?2, ?3)",
            params![self.version, self.description, Utc::now().to_rfc3339()],
        )?;
        tx.commit()?;
        Ok(())
    }
}

/// Highest applied version, 0 for a fresh database
pub fn applied_version(conn: &Connection) -> Result<u32> {
    let version: Option<u32> =
        conn.query_row("SELECT MAX(version) FROM schema_migrations", [], |row| {
            row.get(0)
        })?;
    Ok(version.unwrap_or(0))
}

/// Bring the schema up to the latest version
#[instrument(skip(conn))]
pub fn run_migrations(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            description TEXT NOT NULL,
            applied_at TEXT NOT NULL
        )",
    )?;

    let from = applied_version(conn)?;
    let pending = MIGRATIONS.iter().filter(|m| m.version > from);
    let mut to = from;
    for migration in pending {
        debug!(version = migration.version, description = migration.description, "Applying migration");
        migration.apply(conn)?;
        to = migration.version;
    }

    if to > from {
        info!(from, to, "Schema migrated");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn latest() -> u32 {
        MIGRATIONS.len() as u32
    }

    #[test]
    fn test_fresh_database_reaches_latest() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        assert_eq!(applied_version(&conn).unwrap(), latest());

        let tables: u32 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('students', 'teachers', 'exam_seatings')",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(tables, 3);
    }

    #[test]
    fn test_rerun_applies_nothing() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        run_migrations(&conn).unwrap();

        let rows: u32 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, latest());
    }

    #[test]
    fn test_versions_are_contiguous() {
        let versions: Vec<u32> = MIGRATIONS.iter().map(|m| m.version).collect();
        let expected: Vec<u32> = (1..=latest()).collect();
        assert_eq!(versions, expected);
    }

    #[test]
    fn test_version_without_table_is_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(applied_version(&conn).is_err());
    }
}
