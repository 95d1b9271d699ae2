//! Status enumerations for recipes, sessions, timers and controller modes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a stored recipe came from.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum RecipeOrigin {
    /// Written by the user
    #[default]
    User,

    /// Cached from an external recipe search provider
    Cached,
}

impl FromStr for RecipeOrigin {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(RecipeOrigin::User),
            "cached" => Ok(RecipeOrigin::Cached),
            _ => Err(format!("Invalid recipe origin: {s}")),
        }
    }
}

impl RecipeOrigin {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeOrigin::User => "user",
            RecipeOrigin::Cached => "cached",
        }
    }
}

/// Lifecycle of a cook-along session.
///
/// The states are mutually exclusive: `NotStarted → Active ⇄ Paused →
/// Completed`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Created but no step shown yet
    #[default]
    NotStarted,

    /// Cooking through the steps
    Active,

    /// Temporarily paused by the cook
    Paused,

    /// Finished; no further navigation
    Completed,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::NotStarted => "not started",
            SessionStatus::Active => "active",
            SessionStatus::Paused => "paused",
            SessionStatus::Completed => "completed",
        }
    }

    /// Whether a step is currently selected (active or paused).
    pub fn is_in_progress(&self) -> bool {
        matches!(self, SessionStatus::Active | SessionStatus::Paused)
    }

    /// Status with an icon for display.
    ///
    /// ```rust
    /// use cookalong_core::models::SessionStatus;
    ///
    /// assert_eq!(SessionStatus::Active.with_icon(), "➤ Cooking");
    /// assert_eq!(SessionStatus::Completed.with_icon(), "✓ Completed");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            SessionStatus::NotStarted => "○ Not started",
            SessionStatus::Active => "➤ Cooking",
            SessionStatus::Paused => "⏸ Paused",
            SessionStatus::Completed => "✓ Completed",
        }
    }
}

/// State of a single countdown timer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimerStatus {
    /// Created but never started
    #[default]
    Idle,
    Running,
    Paused,
    /// Counted down to zero
    Completed,
    /// Stopped by the cook
    Cancelled,
}

impl TimerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerStatus::Idle => "idle",
            TimerStatus::Running => "running",
            TimerStatus::Paused => "paused",
            TimerStatus::Completed => "completed",
            TimerStatus::Cancelled => "cancelled",
        }
    }

    /// Completed and cancelled timers never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, TimerStatus::Completed | TimerStatus::Cancelled)
    }

    /// Only running and paused timers are shown to the cook.
    pub fn is_visible(&self) -> bool {
        matches!(self, TimerStatus::Running | TimerStatus::Paused)
    }
}

/// How the cook drives the session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum CookMode {
    /// Buttons or typed commands only
    #[default]
    Manual,

    /// Spoken narration and voice commands
    Voice,
}

impl CookMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CookMode::Manual => "manual",
            CookMode::Voice => "voice",
        }
    }
}

impl FromStr for CookMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "manual" => Ok(CookMode::Manual),
            "voice" => Ok(CookMode::Voice),
            _ => Err(format!("Invalid cook mode: {s}")),
        }
    }
}
