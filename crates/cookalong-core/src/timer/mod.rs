//! Countdown timers attached to recipe steps.
//!
//! Every [`CookTimer`] is an independent countdown. Timers never share state
//! and are advanced by explicit [`CookTimer::tick`] calls, so the caller decides
//! the clock (a tokio interval in the front end, fixed steps in tests).
//!
//! ```text
//!   Idle ──start──▶ Running ──pause──▶ Paused
//!                     │  ▲──resume──────┘
//!                     │
//!              tick to zero ──▶ Completed
//!
//!   any non-terminal ──cancel──▶ Cancelled
//! ```

use std::time::Duration;

use serde::Serialize;

use crate::{
    error::{CookAlongError, Result},
    models::TimerStatus,
};

pub mod board;
pub mod duration;

pub use board::TimerBoard;
pub use duration::{describe_duration, detect_duration, format_clock, MAX_TIMER_DURATION};

/// A countdown timer belonging to exactly one recipe step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CookTimer {
    id: u64,
    step_number: u32,
    label: String,
    duration: Duration,
    remaining: Duration,
    status: TimerStatus,
}

impl CookTimer {
    /// Creates an idle timer with the full duration remaining.
    pub fn new(id: u64, step_number: u32, label: impl Into<String>, duration: Duration) -> Self {
        Self {
            id,
            step_number,
            label: label.into(),
            duration,
            remaining: duration,
            status: TimerStatus::Idle,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn step_number(&self) -> u32 {
        self.step_number
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn remaining(&self) -> Duration {
        self.remaining
    }

    pub fn status(&self) -> TimerStatus {
        self.status
    }

    /// Starts counting down from idle, or continues from paused.
    pub fn start(&mut self) -> Result<()> {
        match self.status {
            TimerStatus::Idle | TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Ok(())
            }
            other => Err(self.rejected("start", other)),
        }
    }

    pub fn pause(&mut self) -> Result<()> {
        match self.status {
            TimerStatus::Running => {
                self.status = TimerStatus::Paused;
                Ok(())
            }
            other => Err(self.rejected("pause", other)),
        }
    }

    pub fn resume(&mut self) -> Result<()> {
        match self.status {
            TimerStatus::Paused => {
                self.status = TimerStatus::Running;
                Ok(())
            }
            other => Err(self.rejected("resume", other)),
        }
    }

    pub fn cancel(&mut self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(self.rejected("cancel", self.status));
        }
        self.status = TimerStatus::Cancelled;
        Ok(())
    }

    /// Advances a running timer by `elapsed`.
    ///
    /// Returns `true` only on the tick that completes the timer.
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        if self.status != TimerStatus::Running {
            return false;
        }
        self.remaining = self.remaining.saturating_sub(elapsed);
        if self.remaining.is_zero() {
            self.status = TimerStatus::Completed;
            return true;
        }
        false
    }

    fn rejected(&self, operation: &'static str, status: TimerStatus) -> CookAlongError {
        CookAlongError::InvalidTimerTransition {
            id: self.id,
            operation,
            reason: format!("timer is {}", status.as_str()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn timer(secs: u64) -> CookTimer {
        CookTimer::new(1, 2, "Step 2", Duration::from_secs(secs))
    }

    #[test]
    fn test_new_timer_is_idle_with_full_time() {
        let t = timer(60);
        assert_eq!(t.status(), TimerStatus::Idle);
        assert_eq!(t.remaining(), Duration::from_secs(60));
        assert_eq!(t.step_number(), 2);
    }

    #[test]
    fn test_idle_timer_does_not_tick() {
        let mut t = timer(60);
        assert!(!t.tick(Duration::from_secs(30)));
        assert_eq!(t.remaining(), Duration::from_secs(60));
    }

    #[test]
    fn test_running_timer_completes_once() {
        let mut t = timer(10);
        t.start().unwrap();
        assert!(!t.tick(Duration::from_secs(4)));
        assert_eq!(t.remaining(), Duration::from_secs(6));
        assert!(t.tick(Duration::from_secs(20)));
        assert_eq!(t.status(), TimerStatus::Completed);
        assert_eq!(t.remaining(), Duration::ZERO);
        assert!(!t.tick(Duration::from_secs(1)));
    }

    #[test]
    fn test_pause_freezes_remaining_time() {
        let mut t = timer(10);
        t.start().unwrap();
        t.tick(Duration::from_secs(3));
        t.pause().unwrap();
        t.tick(Duration::from_secs(5));
        assert_eq!(t.remaining(), Duration::from_secs(7));
        t.resume().unwrap();
        t.tick(Duration::from_secs(5));
        assert_eq!(t.remaining(), Duration::from_secs(2));
    }

    #[test]
    fn test_start_resumes_paused_timer() {
        let mut t = timer(10);
        t.start().unwrap();
        t.pause().unwrap();
        t.start().unwrap();
        assert_eq!(t.status(), TimerStatus::Running);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut t = timer(10);
        assert!(t.pause().is_err());
        assert!(t.resume().is_err());
        t.cancel().unwrap();
        assert_eq!(t.status(), TimerStatus::Cancelled);
        assert!(t.start().is_err());
        assert!(t.cancel().is_err());
    }
}
