//! Step navigation and timer operations of the controller.

use std::time::Duration;

use log::{debug, info};

use super::{ControllerEvent, CookAlongController, Delivery};
use crate::{
    error::{CookAlongError, Result},
    models::RecipeStep,
    session::CompletionSummary,
    timer::{describe_duration, CookTimer, TimerBoard},
};

#[derive(Debug, Clone, Copy)]
pub(super) enum StepMove {
    Start,
    Next,
    Previous,
    Repeat,
}

impl CookAlongController {
    /// Shows, and in voice mode narrates, the first step.
    pub async fn start(&self) -> Result<RecipeStep> {
        self.move_to(StepMove::Start, Delivery::Interrupt).await
    }

    /// Advances one step.
    ///
    /// # Errors
    ///
    /// Returns `InvalidTransition` on the last step; call
    /// [`CookAlongController::complete`] there instead.
    pub async fn next_step(&self) -> Result<RecipeStep> {
        self.move_to(StepMove::Next, Delivery::Interrupt).await
    }

    /// Goes back one step; stays on the first step.
    pub async fn previous_step(&self) -> Result<RecipeStep> {
        self.move_to(StepMove::Previous, Delivery::Interrupt).await
    }

    /// Shows, and in voice mode narrates, the current step again.
    pub async fn repeat_step(&self) -> Result<RecipeStep> {
        self.move_to(StepMove::Repeat, Delivery::Interrupt).await
    }

    pub async fn pause(&self) -> Result<()> {
        self.pause_with(Delivery::Interrupt).await
    }

    pub async fn resume(&self) -> Result<()> {
        self.resume_with(Delivery::Interrupt).await
    }

    /// Finishes the recipe. Hands-free listening stops after this.
    pub async fn complete(&self) -> Result<CompletionSummary> {
        self.complete_with(Delivery::Interrupt).await
    }

    /// Starts a timer for the current step.
    ///
    /// Without a duration the step's suggested timer is started. With one, a
    /// new running timer is created.
    ///
    /// # Errors
    ///
    /// Returns `InvalidInput` when no duration is given and the step has no
    /// suggested timer, and `InvalidTransition` before the session starts or
    /// after it completes.
    pub async fn start_step_timer(&self, duration: Option<Duration>) -> Result<CookTimer> {
        self.start_step_timer_with(duration, Delivery::Interrupt)
            .await
    }

    pub async fn pause_timer(&self, id: u64) -> Result<CookTimer> {
        self.update_timer(id, |timers| timers.pause(id)).await
    }

    pub async fn resume_timer(&self, id: u64) -> Result<CookTimer> {
        self.update_timer(id, |timers| timers.resume(id)).await
    }

    pub async fn cancel_timer(&self, id: u64) -> Result<CookTimer> {
        self.update_timer(id, |timers| timers.cancel(id)).await
    }

    /// Removes a timer from the session entirely.
    pub async fn dismiss_timer(&self, id: u64) -> Result<CookTimer> {
        let timer = self.live().await?.session.timers_mut().dismiss(id)?;
        debug!("Timer {id} dismissed");
        Ok(timer)
    }

    /// Advances every running timer by `elapsed` and announces the ones
    /// that finished.
    pub async fn tick_timers(&self, elapsed: Duration) -> Result<Vec<CookTimer>> {
        let finished: Vec<CookTimer> = {
            let mut state = self.live().await?;
            let timers = state.session.timers_mut();
            let ids = timers.tick(elapsed);
            ids.iter()
                .filter_map(|id| timers.get(*id).cloned())
                .collect()
        };

        for timer in &finished {
            info!("Timer {} for step {} finished", timer.id(), timer.step_number());
            self.emit(ControllerEvent::TimerCompleted(timer.clone()));
            self.say(&format!("{} timer is done.", timer.label()), Delivery::Interrupt)
                .await;
        }
        Ok(finished)
    }

    pub(super) async fn move_to(&self, movement: StepMove, delivery: Delivery) -> Result<RecipeStep> {
        let (step, index, total_steps, suggestion) = {
            let mut state = self.live().await?;
            let session = &mut state.session;
            let step = match movement {
                StepMove::Start => session.start_first_step()?.clone(),
                StepMove::Next => session.next_step()?.clone(),
                StepMove::Previous => session.previous_step()?.clone(),
                StepMove::Repeat => session.repeat_step()?.clone(),
            };
            let suggestion = session
                .timers()
                .idle_for_step(step.number)
                .and_then(|id| session.timers().get(id))
                .map(CookTimer::duration);
            (
                step,
                session.current_step_index().unwrap_or_default(),
                session.total_steps(),
                suggestion,
            )
        };

        debug!("{movement:?} -> step {} of {total_steps}", step.number);
        self.emit(ControllerEvent::StepChanged {
            index,
            step: step.clone(),
            total_steps,
        });
        self.say(&narration(&step, total_steps, suggestion), delivery)
            .await;
        Ok(step)
    }

    pub(super) async fn pause_with(&self, delivery: Delivery) -> Result<()> {
        self.live().await?.session.pause_session()?;
        self.emit(ControllerEvent::Paused);
        self.say("Paused. Say resume when you're ready.", delivery)
            .await;
        Ok(())
    }

    pub(super) async fn resume_with(&self, delivery: Delivery) -> Result<()> {
        let step = {
            let mut state = self.live().await?;
            state.session.resume_session()?;
            state.session.current_step().cloned()
        };
        self.emit(ControllerEvent::Resumed);
        if let Some(step) = step {
            self.say(
                &format!("Resuming. Step {}. {}", step.number, step.instruction),
                delivery,
            )
            .await;
        }
        Ok(())
    }

    pub(super) async fn complete_with(&self, delivery: Delivery) -> Result<CompletionSummary> {
        let summary = self.live().await?.session.complete_session()?;
        self.emit(ControllerEvent::Completed(summary.clone()));
        self.say(
            &format!("All done. Enjoy your {}!", summary.recipe_title),
            delivery,
        )
        .await;
        Ok(summary)
    }

    pub(super) async fn start_step_timer_with(
        &self,
        duration: Option<Duration>,
        delivery: Delivery,
    ) -> Result<CookTimer> {
        let timer = {
            let mut state = self.live().await?;
            let status = state.session.status();
            let step_number = state
                .session
                .current_step()
                .filter(|_| status.is_in_progress())
                .map(|step| step.number)
                .ok_or(CookAlongError::InvalidTransition {
                    operation: "start a timer",
                    state: status,
                })?;

            let timers = state.session.timers_mut();
            let id = match (duration, timers.idle_for_step(step_number)) {
                (Some(duration), _) => {
                    timers.add(step_number, format!("Step {step_number}"), duration, true)?
                }
                (None, Some(id)) => {
                    timers.start(id)?;
                    id
                }
                (None, None) => {
                    return Err(CookAlongError::invalid_input("duration").with_reason(
                        "This step has no suggested timer, so a duration is needed",
                    ))
                }
            };
            timers.get(id).cloned().ok_or(CookAlongError::TimerNotFound { id })?
        };

        info!(
            "Timer {} started for {}",
            timer.id(),
            describe_duration(timer.duration())
        );
        self.emit(ControllerEvent::TimerStarted(timer.clone()));
        self.say(
            &format!("Timer set for {}.", describe_duration(timer.duration())),
            delivery,
        )
        .await;
        Ok(timer)
    }

    async fn update_timer<F>(&self, id: u64, operation: F) -> Result<CookTimer>
    where
        F: FnOnce(&mut TimerBoard) -> Result<()>,
    {
        let timer = {
            let mut state = self.live().await?;
            let timers = state.session.timers_mut();
            operation(timers)?;
            timers.get(id).cloned().ok_or(CookAlongError::TimerNotFound { id })?
        };
        debug!("Timer {id} is now {}", timer.status());
        self.emit(ControllerEvent::TimerUpdated(timer.clone()));
        Ok(timer)
    }
}

/// What the cook hears when a step comes up.
fn narration(step: &RecipeStep, total_steps: usize, suggestion: Option<Duration>) -> String {
    let mut text = format!(
        "Step {} of {total_steps}. {}",
        step.number, step.instruction
    );
    if let Some(duration) = suggestion {
        text.push_str(&format!(
            " Say start timer to time {}.",
            describe_duration(duration)
        ));
    }
    text
}
