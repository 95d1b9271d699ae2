//! The conversational assistant boundary.
//!
//! The controller forwards free-form questions together with a
//! [`StepContext`] describing where the cook is. Answers come back as plain
//! text. Any failure is reported as `CookAlongError::Assistant` and never
//! changes session state.

use async_trait::async_trait;
use serde::Serialize;

use crate::{error::Result, models::Ingredient, session::CookAlongSession};

pub mod http;

pub use http::HttpAssistant;

/// What the assistant knows about the cook's position in the recipe.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepContext {
    pub recipe_title: String,
    pub ingredients: Vec<Ingredient>,
    /// 1-based step number, `None` before the session starts
    pub step_number: Option<u32>,
    pub total_steps: usize,
    pub instruction: Option<String>,
}

impl StepContext {
    pub fn from_session(session: &CookAlongSession) -> Self {
        let recipe = session.recipe();
        let step = session.current_step();
        Self {
            recipe_title: recipe.title.clone(),
            ingredients: recipe.ingredients.clone(),
            step_number: step.map(|s| s.number),
            total_steps: session.total_steps(),
            instruction: step.map(|s| s.instruction.clone()),
        }
    }

    /// Context paragraph handed to the model.
    pub fn describe(&self) -> String {
        let mut text = format!("The cook is making \"{}\".", self.recipe_title);
        if !self.ingredients.is_empty() {
            let list = self
                .ingredients
                .iter()
                .map(|i| match &i.amount {
                    Some(amount) => format!("{amount} {}", i.name),
                    None => i.name.clone(),
                })
                .collect::<Vec<_>>()
                .join(", ");
            text.push_str(&format!(" Ingredients: {list}."));
        }
        match (self.step_number, &self.instruction) {
            (Some(number), Some(instruction)) => text.push_str(&format!(
                " They are on step {number} of {}: \"{instruction}\".",
                self.total_steps
            )),
            _ => text.push_str(" They have not started cooking yet."),
        }
        text
    }
}

/// Answers cooking questions.
#[async_trait]
pub trait Assistant: Send + Sync {
    /// Returns an answer for `question` given where the cook is.
    async fn answer(&self, question: &str, context: &StepContext) -> Result<String>;
}
