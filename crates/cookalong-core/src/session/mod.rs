//! The cook-along session state machine.
//!
//! A [`CookAlongSession`] walks the ordered steps of one recipe:
//!
//! ```text
//! NotStarted ──start_first_step──▶ Active ──complete_session──▶ Completed
//!                                   │  ▲
//!                     pause_session │  │ resume_session
//!                                   ▼  │
//!                                  Paused
//! ```
//!
//! Operations attempted from a state that does not allow them are rejected
//! with [`CookAlongError::InvalidTransition`] and leave the session untouched.
//! The single exception is [`CookAlongSession::previous_step`] on the first
//! step, which is a no-op.
//!
//! Sessions are in-memory only; dropping one abandons it.

use std::fmt;

use jiff::Timestamp;
use log::{debug, info};

use crate::{
    error::{CookAlongError, Result},
    models::{Recipe, RecipeStep, SessionStatus},
    timer::TimerBoard,
};

#[cfg(test)]
mod tests;

type CompletionHook = Box<dyn FnOnce(&CompletionSummary) + Send>;

/// What the completion hook receives when a session finishes.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionSummary {
    pub recipe_id: u64,
    pub recipe_title: String,
    pub steps_total: usize,
    /// 1-based number of the step the cook finished on
    pub finished_on_step: u32,
    pub started_at: Timestamp,
    pub completed_at: Timestamp,
}

/// One cook working through one recipe.
pub struct CookAlongSession {
    recipe: Recipe,
    index: usize,
    status: SessionStatus,
    timers: TimerBoard,
    created_at: Timestamp,
    on_complete: Option<CompletionHook>,
}

impl fmt::Debug for CookAlongSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CookAlongSession")
            .field("recipe_id", &self.recipe.id)
            .field("index", &self.index)
            .field("status", &self.status)
            .field("timers", &self.timers.all().len())
            .finish_non_exhaustive()
    }
}

impl CookAlongSession {
    /// Creates a not-yet-started session for a recipe.
    ///
    /// # Errors
    ///
    /// Returns `CookAlongError::InvalidInput` if the recipe has no steps.
    pub fn new(recipe: Recipe) -> Result<Self> {
        if recipe.steps.is_empty() {
            return Err(CookAlongError::invalid_input("steps")
                .with_reason(format!("Recipe '{}' has no steps to cook", recipe.title)));
        }

        Ok(Self {
            recipe,
            index: 0,
            status: SessionStatus::NotStarted,
            timers: TimerBoard::new(),
            created_at: Timestamp::now(),
            on_complete: None,
        })
    }

    /// Registers the hook fired once when the session completes.
    pub fn on_complete<F>(&mut self, hook: F)
    where
        F: FnOnce(&CompletionSummary) + Send + 'static,
    {
        self.on_complete = Some(Box::new(hook));
    }

    pub fn recipe(&self) -> &Recipe {
        &self.recipe
    }

    pub fn steps(&self) -> &[RecipeStep] {
        &self.recipe.steps
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn total_steps(&self) -> usize {
        self.recipe.steps.len()
    }

    /// Index of the current step, `None` before the session starts.
    pub fn current_step_index(&self) -> Option<usize> {
        (self.status != SessionStatus::NotStarted).then_some(self.index)
    }

    /// The step on screen, `None` before the session starts.
    pub fn current_step(&self) -> Option<&RecipeStep> {
        self.current_step_index()
            .and_then(|index| self.recipe.steps.get(index))
    }

    pub fn has_next_step(&self) -> bool {
        self.current_step_index()
            .is_some_and(|index| index + 1 < self.total_steps())
    }

    pub fn has_previous_step(&self) -> bool {
        self.current_step_index().is_some_and(|index| index > 0)
    }

    /// Fraction of steps reached: `(index + 1) / total`, `0.0` before start.
    pub fn progress(&self) -> f64 {
        match self.current_step_index() {
            Some(index) => (index + 1) as f64 / self.total_steps() as f64,
            None => 0.0,
        }
    }

    pub fn timers(&self) -> &TimerBoard {
        &self.timers
    }

    pub fn timers_mut(&mut self) -> &mut TimerBoard {
        &mut self.timers
    }

    /// Shows the first step.
    pub fn start_first_step(&mut self) -> Result<&RecipeStep> {
        self.require("start", &[SessionStatus::NotStarted])?;
        self.status = SessionStatus::Active;
        info!(
            "Cook-along started for recipe {} ({} steps)",
            self.recipe.id,
            self.total_steps()
        );
        self.enter_step(0)
    }

    /// Advances to the next step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` at the last step; finish with
    /// [`CookAlongSession::complete_session`] instead.
    pub fn next_step(&mut self) -> Result<&RecipeStep> {
        self.require("go to the next step", &[SessionStatus::Active])?;
        if !self.has_next_step() {
            return Err(CookAlongError::InvalidTransition {
                operation: "go past the last step",
                state: self.status,
            });
        }
        self.enter_step(self.index + 1)
    }

    /// Goes back one step; stays put on the first step.
    pub fn previous_step(&mut self) -> Result<&RecipeStep> {
        self.require("go to the previous step", &[SessionStatus::Active])?;
        let target = self.index.saturating_sub(1);
        self.enter_step(target)
    }

    /// Returns the current step again for re-narration.
    pub fn repeat_step(&self) -> Result<&RecipeStep> {
        self.require(
            "repeat the step",
            &[SessionStatus::Active, SessionStatus::Paused],
        )?;
        Ok(&self.recipe.steps[self.index])
    }

    pub fn pause_session(&mut self) -> Result<()> {
        self.require("pause", &[SessionStatus::Active])?;
        self.status = SessionStatus::Paused;
        debug!("Session paused on step index {}", self.index);
        Ok(())
    }

    pub fn resume_session(&mut self) -> Result<()> {
        self.require("resume", &[SessionStatus::Paused])?;
        self.status = SessionStatus::Active;
        debug!("Session resumed on step index {}", self.index);
        Ok(())
    }

    /// Finishes the session and fires the completion hook.
    pub fn complete_session(&mut self) -> Result<CompletionSummary> {
        self.require("complete", &[SessionStatus::Active])?;
        self.status = SessionStatus::Completed;

        let summary = CompletionSummary {
            recipe_id: self.recipe.id,
            recipe_title: self.recipe.title.clone(),
            steps_total: self.total_steps(),
            finished_on_step: self.recipe.steps[self.index].number,
            started_at: self.created_at,
            completed_at: Timestamp::now(),
        };
        info!(
            "Cook-along completed for recipe {} on step {}",
            summary.recipe_id, summary.finished_on_step
        );

        if let Some(hook) = self.on_complete.take() {
            hook(&summary);
        }
        Ok(summary)
    }

    fn enter_step(&mut self, index: usize) -> Result<&RecipeStep> {
        self.index = index;
        let step = &self.recipe.steps[index];
        if let Some(timer_id) = self.timers.suggest_for_step(step) {
            debug!("Suggested timer {timer_id} for step {}", step.number);
        }
        debug!("Now on step {} of {}", step.number, self.recipe.steps.len());
        Ok(step)
    }

    fn require(&self, operation: &'static str, allowed: &[SessionStatus]) -> Result<()> {
        if allowed.contains(&self.status) {
            Ok(())
        } else {
            Err(CookAlongError::InvalidTransition {
                operation,
                state: self.status,
            })
        }
    }
}
