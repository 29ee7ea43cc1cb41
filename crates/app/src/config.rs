//! Daemon configuration
//!
//! Read from `$SEATWISE_CONFIG`, or `seatwise.toml` in the platform config
//! directory. A missing file means defaults.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SEATWISE_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Address the seating server binds to
    pub listen_addr: SocketAddr,
    /// SQLite file; defaults to `seatwise.db` in the data directory
    pub database_path: Option<PathBuf>,
    /// Roster TOML imported at startup
    pub roster_file: Option<PathBuf>,
    /// Used when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            listen_addr: SocketAddr::from(([127, 0, 0, 1], seatwise_net::DEFAULT_PORT)),
            database_path: None,
            roster_file: None,
            log_filter: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the configured location
    pub fn load() -> Result<Self> {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => project_dirs()?.config_dir().join("seatwise.toml"),
        };
        Self::load_from(&path)
    }

    /// Load from `path`, falling back to defaults when it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = toml::from_str(&text).map_err(|source| Error::Toml {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Resolved database path
    pub fn database_path(&self) -> Result<PathBuf> {
        match &self.database_path {
            Some(path) => Ok(path.clone()),
            None => Ok(project_dirs()?.data_dir().join("seatwise.db")),
        }
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("dev", "onyx", "seatwise").ok_or(Error::NoProjectDir("home"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.listen_addr.port(), 7341);
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seatwise.toml");
        std::fs::write(
            &path,
            "listen_addr = \"0.0.0.0:9000\"\ndatabase_path = \"/srv/seatwise/exams.db\"\n",
        )
        .unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.listen_addr.port(), 9000);
        assert_eq!(
            config.database_path().unwrap(),
            PathBuf::from("/srv/seatwise/exams.db")
        );
        assert!(config.roster_file.is_none());
        assert_eq!(config.log_filter, "info");
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seatwise.toml");
        std::fs::write(&path, "listen_addr = 42\n").unwrap();

        assert!(matches!(
            AppConfig::load_from(&path),
            Err(Error::Toml { .. })
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("seatwise.toml");
        std::fs::write(&path, "listen_adr = \"127.0.0.1:1\"\n").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }
}
