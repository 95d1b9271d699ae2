//! Recipe model definitions.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::RecipeOrigin;

/// A single instruction within a recipe.
///
/// Steps are immutable once constructed and are owned by the recipe a session
/// was started with.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RecipeStep {
    /// Position of the step within the recipe (1-based)
    pub number: u32,

    /// What the cook should do
    pub instruction: String,
}

impl RecipeStep {
    /// Creates a step with the given 1-based number.
    pub fn new(number: u32, instruction: impl Into<String>) -> Self {
        Self {
            number,
            instruction: instruction.into(),
        }
    }
}

/// An ingredient line of a recipe.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Ingredient {
    /// Ingredient name ("flour")
    pub name: String,

    /// Free-form quantity ("2 cups")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
}

/// A recipe with its ordered ingredients and steps.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    /// Unique identifier for the recipe
    pub id: u64,

    /// Recipe title
    pub title: String,

    /// Short description shown in lists
    pub summary: Option<String>,

    /// Where the recipe came from
    pub origin: RecipeOrigin,

    /// Identifier assigned by the external search provider, if cached from one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,

    /// Number of servings
    pub servings: Option<u32>,

    /// Total preparation and cooking time in minutes
    pub ready_minutes: Option<u32>,

    /// Whether the user marked the recipe as a favorite
    pub favorite: bool,

    /// Ingredients in display order
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,

    /// Steps in cooking order
    #[serde(default)]
    pub steps: Vec<RecipeStep>,

    /// Timestamp when the recipe was stored (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the recipe was last changed (UTC)
    pub updated_at: Timestamp,
}

impl Recipe {
    /// Returns the step with the given 1-based number.
    pub fn step(&self, number: u32) -> Option<&RecipeStep> {
        self.steps.iter().find(|step| step.number == number)
    }
}
