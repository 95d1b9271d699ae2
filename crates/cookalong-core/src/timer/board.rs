//! The set of timers owned by one cook-along session.

use std::{collections::HashSet, time::Duration};

use log::debug;

use super::{detect_duration, CookTimer};
use crate::{
    error::{CookAlongError, Result},
    models::{RecipeStep, TimerStatus},
};

/// All timers of a session, in creation order.
///
/// Completed and cancelled timers are kept (see [`TimerBoard::all`]) until
/// they are dismissed or the session ends; [`TimerBoard::visible`] filters
/// them out.
#[derive(Debug, Clone, Default)]
pub struct TimerBoard {
    timers: Vec<CookTimer>,
    next_id: u64,
    suggested_steps: HashSet<u32>,
}

impl TimerBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a timer for a step, optionally starting it right away.
    pub fn add(
        &mut self,
        step_number: u32,
        label: impl Into<String>,
        duration: Duration,
        start: bool,
    ) -> Result<u64> {
        if duration.is_zero() {
            return Err(CookAlongError::invalid_input("duration")
                .with_reason("Timer duration must be greater than zero"));
        }

        self.next_id += 1;
        let mut timer = CookTimer::new(self.next_id, step_number, label, duration);
        if start {
            timer.start()?;
        }
        debug!(
            "Timer {} added for step {} ({:?}, running: {})",
            timer.id(),
            step_number,
            duration,
            start
        );
        self.timers.push(timer);
        Ok(self.next_id)
    }

    /// Registers an idle timer when the step's instruction mentions a
    /// duration. Each step gets at most one suggestion over the session.
    pub fn suggest_for_step(&mut self, step: &RecipeStep) -> Option<u64> {
        if !self.suggested_steps.insert(step.number) {
            return None;
        }
        let duration = detect_duration(&step.instruction)?;
        self.add(step.number, format!("Step {}", step.number), duration, false)
            .ok()
    }

    /// First idle timer registered for the step, if any.
    pub fn idle_for_step(&self, step_number: u32) -> Option<u64> {
        self.timers
            .iter()
            .find(|t| t.step_number() == step_number && t.status() == TimerStatus::Idle)
            .map(CookTimer::id)
    }

    pub fn get(&self, id: u64) -> Option<&CookTimer> {
        self.timers.iter().find(|t| t.id() == id)
    }

    fn get_mut(&mut self, id: u64) -> Result<&mut CookTimer> {
        self.timers
            .iter_mut()
            .find(|t| t.id() == id)
            .ok_or(CookAlongError::TimerNotFound { id })
    }

    pub fn start(&mut self, id: u64) -> Result<()> {
        self.get_mut(id)?.start()
    }

    pub fn pause(&mut self, id: u64) -> Result<()> {
        self.get_mut(id)?.pause()
    }

    pub fn resume(&mut self, id: u64) -> Result<()> {
        self.get_mut(id)?.resume()
    }

    pub fn cancel(&mut self, id: u64) -> Result<()> {
        self.get_mut(id)?.cancel()
    }

    /// Removes a timer from the board entirely.
    pub fn dismiss(&mut self, id: u64) -> Result<CookTimer> {
        let index = self
            .timers
            .iter()
            .position(|t| t.id() == id)
            .ok_or(CookAlongError::TimerNotFound { id })?;
        Ok(self.timers.remove(index))
    }

    /// Advances every running timer and returns the ids that completed on
    /// this tick.
    pub fn tick(&mut self, elapsed: Duration) -> Vec<u64> {
        self.timers
            .iter_mut()
            .filter_map(|t| t.tick(elapsed).then_some(t.id()))
            .collect()
    }

    /// Running and paused timers, the ones shown to the cook.
    pub fn visible(&self) -> Vec<&CookTimer> {
        self.timers.iter().filter(|t| t.status().is_visible()).collect()
    }

    pub fn all(&self) -> &[CookTimer] {
        &self.timers
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }

    /// Drops every timer; used when the session ends.
    pub fn clear(&mut self) {
        self.timers.clear();
        self.suggested_steps.clear();
    }
}
