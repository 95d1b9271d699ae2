//! Views of a running cook-along session.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::{
    models::{RecipeStep, SessionStatus},
    session::CompletionSummary,
};

const PROGRESS_WIDTH: usize = 20;

/// The step currently in front of the cook.
pub struct StepCard<'a> {
    pub step: &'a RecipeStep,
    pub total_steps: usize,
    /// Fraction in `0.0..=1.0`
    pub progress: f64,
    pub status: SessionStatus,
}

impl fmt::Display for StepCard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let progress = self.progress.clamp(0.0, 1.0);
        let filled = (progress * PROGRESS_WIDTH as f64).round() as usize;

        writeln!(f, "## Step {} of {}", self.step.number, self.total_steps)?;
        writeln!(f)?;
        writeln!(
            f,
            "`{}{}` {:.0}% · {}",
            "█".repeat(filled),
            "░".repeat(PROGRESS_WIDTH - filled),
            progress * 100.0,
            self.status.with_icon()
        )?;
        writeln!(f)?;
        writeln!(f, "{}", self.step.instruction)
    }
}

impl fmt::Display for CompletionSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Finished {}", self.recipe_title)?;
        writeln!(f)?;
        writeln!(
            f,
            "- Steps: {} of {}",
            self.finished_on_step, self.steps_total
        )?;
        writeln!(f, "- Started: {}", LocalDateTime(&self.started_at))?;
        writeln!(f, "- Finished: {}", LocalDateTime(&self.completed_at))?;
        let minutes = self
            .completed_at
            .duration_since(self.started_at)
            .as_secs()
            .max(0)
            / 60;
        writeln!(f, "- Cooking time: {minutes} min")
    }
}

#[cfg(test)]
mod tests {
    use jiff::{Timestamp, ToSpan};

    use super::*;

    #[test]
    fn test_step_card_progress_bar() {
        let step = RecipeStep::new(1, "Preheat the oven to 200°C");
        let card = StepCard {
            step: &step,
            total_steps: 4,
            progress: 0.25,
            status: SessionStatus::Paused,
        };
        let output = card.to_string();
        assert!(output.contains("## Step 1 of 4"));
        assert!(output.contains("`█████░░░░░░░░░░░░░░░` 25%"));
        assert!(output.contains("⏸ Paused"));
        assert!(output.ends_with("Preheat the oven to 200°C\n"));
    }

    #[test]
    fn test_completion_summary() {
        let started_at = Timestamp::now();
        let summary = CompletionSummary {
            recipe_id: 1,
            recipe_title: "Risotto".to_string(),
            steps_total: 6,
            finished_on_step: 6,
            started_at,
            completed_at: started_at.checked_add(42.minutes()).unwrap(),
        };
        let output = summary.to_string();
        assert!(output.starts_with("# Finished Risotto"));
        assert!(output.contains("- Steps: 6 of 6"));
        assert!(output.contains("- Cooking time: 42 min"));
    }
}
