//! High-level recipe library API.
//!
//! [`RecipeLibrary`] is the async facade over the SQLite [`Database`]. Each
//! call opens a connection on tokio's blocking pool, so the library can be
//! shared freely between tasks.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / session  │    │  RecipeLibrary  │    │    Database     │
//! │   start-up      │───▶│  (recipe_ops)   │───▶│   (via db/)     │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use cookalong_core::{params::CreateRecipe, RecipeLibraryBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = RecipeLibraryBuilder::new()
//!     .with_database_path(Some("recipes.db"))
//!     .build()
//!     .await?;
//!
//! let recipe = library
//!     .create_recipe(&CreateRecipe {
//!         title: "Soft-boiled eggs".to_string(),
//!         steps: vec!["Boil water".to_string(), "Cook eggs 6 minutes".to_string()],
//!         ..Default::default()
//!     })
//!     .await?;
//! println!("{}", recipe);
//! # Ok(())
//! # }
//! ```
//!
//! [`Database`]: crate::db::Database

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::task;

use crate::{
    db::Database,
    error::{CookAlongError, Result},
    models::Recipe,
    source::RecipeSource,
};

pub mod builder;
pub mod recipe_ops;


pub use builder::RecipeLibraryBuilder;

/// Main interface to stored recipes.
#[derive(Debug, Clone)]
pub struct RecipeLibrary {
    pub(crate) db_path: PathBuf,
}

impl RecipeLibrary {
    /// Creates a library over an initialized database file.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Location of the SQLite database.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs a database operation on the blocking thread pool.
    pub(crate) async fn run_blocking<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();
        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            operation(&mut db)
        })
        .await
        .map_err(|e| CookAlongError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}

#[async_trait]
impl RecipeSource for RecipeLibrary {
    async fn load_recipe(&self, id: u64) -> Result<Recipe> {
        self.run_blocking(move |db| db.get_recipe(id))
            .await?
            .ok_or(CookAlongError::RecipeNotFound { id })
    }
}
