//! Parameter structures for recipe library operations.
//!
//! These structures are shared by every interface (CLI arguments, JSON
//! recipe imports) without framework-specific derives. Interface layers
//! define their own wrappers (for example clap `Args` structs) and convert
//! into these types with `From`.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  JSON import    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::{
    error::{CookAlongError, Result},
    models::{Ingredient, RecipeOrigin},
};

/// Generic parameters for operations requiring just an ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Id {
    /// The ID of the recipe to operate on
    pub id: u64,
}

/// Parameters for storing a recipe.
///
/// This is also the document format accepted by `cook recipe import`:
///
/// ```json
/// {
///   "title": "Pancakes",
///   "servings": 2,
///   "ingredients": [{ "name": "flour", "amount": "200 g" }],
///   "steps": ["Whisk everything", "Fry for 2 minutes per side"]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateRecipe {
    /// Title of the recipe (required)
    pub title: String,
    /// Optional short description
    #[serde(default)]
    pub summary: Option<String>,
    /// Provider id for recipes cached from an external search service
    #[serde(default)]
    pub external_id: Option<String>,
    #[serde(default)]
    pub servings: Option<u32>,
    #[serde(default)]
    pub ready_minutes: Option<u32>,
    /// Ingredients in display order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    /// Instructions in cooking order; numbered from 1 when stored
    pub steps: Vec<String>,
}

impl CreateRecipe {
    /// Checks the fields every stored recipe needs.
    ///
    /// # Errors
    ///
    /// Returns `CookAlongError::InvalidInput` for an empty title, no steps, an
    /// empty step or an empty ingredient name.
    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            return Err(CookAlongError::invalid_input("title").with_reason("Title cannot be empty"));
        }
        if self.steps.is_empty() {
            return Err(CookAlongError::invalid_input("steps")
                .with_reason("A recipe needs at least one step"));
        }
        if let Some(position) = self.steps.iter().position(|s| s.trim().is_empty()) {
            return Err(CookAlongError::invalid_input("steps")
                .with_reason(format!("Step {} is empty", position + 1)));
        }
        if self.ingredients.iter().any(|i| i.name.trim().is_empty()) {
            return Err(CookAlongError::invalid_input("ingredients")
                .with_reason("Ingredient names cannot be empty"));
        }
        Ok(())
    }
}

/// Parameters for listing recipes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListRecipes {
    /// Only show recipes marked as favorite
    #[serde(default)]
    pub favorites_only: bool,
    /// Restrict to user-written or cached recipes
    #[serde(default)]
    pub origin: Option<RecipeOrigin>,
}

/// Parameters for searching recipes by title or ingredient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRecipes {
    /// Case-insensitive text matched against titles and ingredient names
    pub query: String,
}

/// Parameters for marking or unmarking a favorite.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SetFavorite {
    pub id: u64,
    pub favorite: bool,
}

/// Parameters for the recently viewed list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentViews {
    /// Maximum number of recipes returned
    pub limit: u32,
}

impl Default for RecentViews {
    fn default() -> Self {
        Self { limit: 10 }
    }
}
