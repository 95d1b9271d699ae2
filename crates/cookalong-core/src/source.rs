//! The recipe data source boundary.

use async_trait::async_trait;

use crate::{error::Result, models::Recipe};

/// Provides a recipe's ordered steps and ingredients to start a session from.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    /// Loads a recipe by id.
    ///
    /// # Errors
    ///
    /// Returns `CookAlongError::RecipeNotFound` when no such recipe exists.
    async fn load_recipe(&self, id: u64) -> Result<Recipe>;
}
