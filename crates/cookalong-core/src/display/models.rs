//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the models stay plain data.
//! Recipes render as markdown with a metadata list followed by sections.

use std::fmt;

use super::datetime::{LocalDateTime, LocalTime};
use crate::{
    models::{
        ChatMessage, ChatRole, CookMode, Ingredient, Recipe, RecipeOrigin, RecipeStep,
        RecipeSummary, SessionStatus, TimerStatus,
    },
    timer::{format_clock, CookTimer},
};

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for TimerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecipeOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for CookMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.amount {
            Some(amount) => write!(f, "{amount} {}", self.name),
            None => write!(f, "{}", self.name),
        }
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.title)?;
        writeln!(f)?;

        writeln!(f, "- Origin: {}", self.origin)?;
        if self.favorite {
            writeln!(f, "- Favorite: ★")?;
        }
        if let Some(servings) = self.servings {
            writeln!(f, "- Servings: {servings}")?;
        }
        if let Some(minutes) = self.ready_minutes {
            writeln!(f, "- Ready in: {minutes} min")?;
        }
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "{summary}")?;
        }

        if !self.ingredients.is_empty() {
            writeln!(f, "\n## Ingredients")?;
            writeln!(f)?;
            for ingredient in &self.ingredients {
                writeln!(f, "- {ingredient}")?;
            }
        }

        if self.steps.is_empty() {
            writeln!(f, "\nNo steps in this recipe.")?;
        } else {
            writeln!(f, "\n## Steps")?;
            writeln!(f)?;
            for step in &self.steps {
                writeln!(f, "{step}")?;
            }
        }

        Ok(())
    }
}

impl fmt::Display for RecipeStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number, self.instruction)
    }
}

impl fmt::Display for RecipeSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.favorite { " ★" } else { "" };
        writeln!(f, "### {}. {}{star}", self.id, self.title)?;
        writeln!(f)?;

        let mut facts = vec![format!("{} steps", self.step_count)];
        if let Some(minutes) = self.ready_minutes {
            facts.push(format!("{minutes} min"));
        }
        facts.push(self.origin.as_str().to_string());
        writeln!(f, "{}", facts.join(" · "))?;

        if let Some(summary) = &self.summary {
            writeln!(f)?;
            writeln!(f, "{summary}")?;
        }
        Ok(())
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "Assistant",
        };
        write!(
            f,
            "**{speaker}** ({}): {}",
            LocalTime(&self.timestamp),
            self.content
        )
    }
}

impl fmt::Display for CookTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{} {} · {} ({})",
            self.id(),
            self.label(),
            format_clock(self.remaining()),
            self.status()
        )
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use jiff::Timestamp;

    use super::*;

    fn recipe() -> Recipe {
        Recipe {
            id: 7,
            title: "Pancakes".to_string(),
            summary: Some("Fluffy".to_string()),
            origin: RecipeOrigin::User,
            external_id: None,
            servings: Some(2),
            ready_minutes: Some(20),
            favorite: true,
            ingredients: vec![
                Ingredient {
                    name: "flour".to_string(),
                    amount: Some("200 g".to_string()),
                },
                Ingredient {
                    name: "salt".to_string(),
                    amount: None,
                },
            ],
            steps: vec![RecipeStep::new(1, "Mix"), RecipeStep::new(2, "Fry")],
            created_at: Timestamp::now(),
            updated_at: Timestamp::now(),
        }
    }

    #[test]
    fn test_recipe_display() {
        let output = recipe().to_string();
        assert!(output.starts_with("# 7. Pancakes"));
        assert!(output.contains("- Servings: 2"));
        assert!(output.contains("- Ready in: 20 min"));
        assert!(output.contains("- 200 g flour"));
        assert!(output.contains("- salt\n"));
        assert!(output.contains("1. Mix"));
        assert!(output.contains("2. Fry"));
    }

    #[test]
    fn test_recipe_without_steps() {
        let mut recipe = recipe();
        recipe.steps.clear();
        assert!(recipe.to_string().contains("No steps in this recipe."));
    }

    #[test]
    fn test_summary_display() {
        let summary = RecipeSummary::from(&recipe());
        let output = summary.to_string();
        assert!(output.contains("### 7. Pancakes ★"));
        assert!(output.contains("2 steps · 20 min · user"));
    }

    #[test]
    fn test_timer_display() {
        let timer = CookTimer::new(3, 2, "Step 2", Duration::from_secs(90));
        assert_eq!(timer.to_string(), "#3 Step 2 · 1:30 (idle)");
    }

    #[test]
    fn test_chat_message_display() {
        let message = ChatMessage::user("How hot should the pan be?");
        let output = message.to_string();
        assert!(output.starts_with("**You**"));
        assert!(output.ends_with("How hot should the pan be?"));
    }
}
