//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a short sentence so callers can
//! print the result without checking first.

use std::fmt;

use crate::{
    models::{ChatMessage, RecipeSummary},
    timer::CookTimer,
};

/// Newtype wrapper for displaying lists of recipe summaries.
///
/// # Examples
///
/// ```rust
/// use cookalong_core::{
///     display::RecipeSummaries,
///     models::{RecipeOrigin, RecipeSummary},
/// };
/// use jiff::Timestamp;
///
/// let recipe = RecipeSummary {
///     id: 1,
///     title: "Tomato Soup".to_string(),
///     summary: None,
///     origin: RecipeOrigin::User,
///     favorite: false,
///     ready_minutes: Some(30),
///     step_count: 4,
///     updated_at: Timestamp::now(),
/// };
///
/// let output = RecipeSummaries(vec![recipe]).to_string();
/// assert!(output.contains("Tomato Soup"));
/// assert_eq!(RecipeSummaries(vec![]).to_string(), "No recipes found.\n");
/// ```
pub struct RecipeSummaries(pub Vec<RecipeSummary>);

impl RecipeSummaries {
    /// Check if the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recipes in the collection.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RecipeSummary> {
        self.0.iter()
    }
}

impl fmt::Display for RecipeSummaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No recipes found.");
        }

        for (i, recipe) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{recipe}")?;
        }
        Ok(())
    }
}

/// The timers a cook can currently see.
pub struct TimerList<'a>(pub Vec<&'a CookTimer>);

impl fmt::Display for TimerList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No timers.");
        }

        writeln!(f, "## Timers")?;
        writeln!(f)?;
        for timer in &self.0 {
            writeln!(f, "- {timer}")?;
        }
        Ok(())
    }
}

/// Conversation history with the assistant, oldest first.
pub struct Conversation<'a>(pub &'a [ChatMessage]);

impl fmt::Display for Conversation<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No questions asked yet.");
        }

        for message in self.0 {
            writeln!(f, "{message}")?;
            writeln!(f)?;
        }
        Ok(())
    }
}
