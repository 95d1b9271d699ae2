//! Builder for creating and configuring RecipeLibrary instances.

use std::path::{Path, PathBuf};

use log::info;
use tokio::task;

use super::RecipeLibrary;
use crate::{
    db::Database,
    error::{CookAlongError, Result},
};

/// Builder for creating and configuring RecipeLibrary instances.
#[derive(Debug, Clone, Default)]
pub struct RecipeLibraryBuilder {
    database_path: Option<PathBuf>,
}

impl RecipeLibraryBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses the XDG Base Directory specification:
    /// `$XDG_DATA_HOME/cookalong/cookalong.db` or
    /// `~/.local/share/cookalong/cookalong.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured library, creating the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `CookAlongError::FileSystem` if the database directory cannot
    /// be created and `CookAlongError::Database` if initialization fails.
    pub async fn build(self) -> Result<RecipeLibrary> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CookAlongError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let db_path_clone = db_path.clone();
        task::spawn_blocking(move || Database::new(&db_path_clone).map(|_| ()))
            .await
            .map_err(|e| CookAlongError::Configuration {
                message: format!("Task join error: {e}"),
            })??;

        info!("Recipe library opened at {}", db_path.display());
        Ok(RecipeLibrary::new(db_path))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("cookalong")
            .place_data_file("cookalong.db")
            .map_err(|e| CookAlongError::XdgDirectory(e.to_string()))
    }
}
