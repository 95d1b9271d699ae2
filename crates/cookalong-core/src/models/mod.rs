//! Data models for recipes and cook-along sessions.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures separate from
//! presentation. Every model formats as markdown so the terminal front end can
//! render it directly.
//!
//! # Examples
//!
//! ```rust
//! use cookalong_core::models::{Recipe, RecipeOrigin, RecipeStep};
//! use jiff::Timestamp;
//!
//! let recipe = Recipe {
//!     id: 1,
//!     title: "Pancakes".to_string(),
//!     summary: None,
//!     origin: RecipeOrigin::User,
//!     external_id: None,
//!     servings: Some(2),
//!     ready_minutes: Some(20),
//!     favorite: false,
//!     ingredients: vec![],
//!     steps: vec![RecipeStep::new(1, "Whisk everything together")],
//!     created_at: Timestamp::now(),
//!     updated_at: Timestamp::now(),
//! };
//! println!("{}", recipe); // Markdown with steps as a numbered list
//! ```

pub mod chat;
pub mod recipe;
pub mod status;
pub mod summary;

#[cfg(test)]
mod tests;

pub use chat::{ChatMessage, ChatRole};
pub use recipe::{Ingredient, Recipe, RecipeStep};
pub use status::{CookMode, RecipeOrigin, SessionStatus, TimerStatus};
pub use summary::RecipeSummary;
