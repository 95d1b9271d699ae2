//! Recipe summary types.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{Recipe, RecipeOrigin};

/// Compact recipe information for lists, searches and history.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RecipeSummary {
    /// Recipe ID
    pub id: u64,
    /// Title of the recipe
    pub title: String,
    /// Short description
    pub summary: Option<String>,
    /// Where the recipe came from
    pub origin: RecipeOrigin,
    /// Favorite flag
    pub favorite: bool,
    /// Total time in minutes
    pub ready_minutes: Option<u32>,
    /// Number of steps
    pub step_count: u32,
    /// Last update timestamp
    pub updated_at: Timestamp,
}

impl From<&Recipe> for RecipeSummary {
    fn from(recipe: &Recipe) -> Self {
        Self {
            id: recipe.id,
            title: recipe.title.clone(),
            summary: recipe.summary.clone(),
            origin: recipe.origin,
            favorite: recipe.favorite,
            ready_minutes: recipe.ready_minutes,
            step_count: recipe.steps.len() as u32,
            updated_at: recipe.updated_at,
        }
    }
}
