//! Builder for creating and configuring Workbench instances.

use std::path::{Path, PathBuf};

use tokio::task;

use super::Workbench;
use crate::{
    db::Database,
    error::{GroundworkError, Result},
};

/// Builder for creating and configuring Workbench instances.
#[derive(Debug, Clone)]
pub struct WorkbenchBuilder {
    database_path: Option<PathBuf>,
}

impl WorkbenchBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/groundwork/groundwork.db` or
    /// `~/.local/share/groundwork/groundwork.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured workbench instance, eagerly initializing the
    /// database schema.
    ///
    /// # Errors
    ///
    /// Returns `GroundworkError::FileSystem` if the database path is invalid
    /// Returns `GroundworkError::Database` if database initialization fails
    pub async fn build(self) -> Result<Workbench> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| GroundworkError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || {
            let _db = Database::new(&db_path_clone)?;
            Ok::<(), GroundworkError>(())
        })
        .await
        .map_err(|e| GroundworkError::Configuration {
            message: format!("Task join error: {e}"),
        })??;

        Ok(Workbench::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("groundwork")
            .place_data_file("groundwork.db")
            .map_err(|e| GroundworkError::XdgDirectory(e.to_string()))
    }
}

impl Default for WorkbenchBuilder {
    fn default() -> Self {
        Self::new()
    }
}
