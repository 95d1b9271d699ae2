//! Core library for Cook Along, the guided step-by-step cooking mode.
//!
//! The crate holds everything below the terminal front end: the session
//! state machine, countdown timers, the controller that bridges a session
//! with a voice engine and a cooking assistant, and the SQLite recipe
//! library sessions are started from.
//!
//! # Architecture
//!
//! - **Session** ([`session`]): `NotStarted → Active ⇄ Paused → Completed`
//!   over one recipe's steps
//! - **Timers** ([`timer`]): independent countdowns owned by the session
//! - **Controller** ([`controller`]): mode switching, narration, questions
//!   and the hands-free listening loop, observable through events
//! - **Collaborators** ([`voice`], [`assistant`], [`source`]): async traits
//!   injected into the controller
//! - **Library** ([`library`], [`db`]): stored and cached recipes
//! - **Display** ([`display`]): markdown `Display` implementations rendered
//!   by the CLI
//!
//! # Quick Start
//!
//! ```rust
//! use cookalong_core::{params::CreateRecipe, CookAlongSession, RecipeLibraryBuilder};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let library = RecipeLibraryBuilder::new()
//!     .with_database_path(Some("test.db"))
//!     .build()
//!     .await?;
//!
//! let recipe = library
//!     .create_recipe(&CreateRecipe {
//!         title: "Porridge".to_string(),
//!         steps: vec![
//!             "Bring the milk to a simmer".to_string(),
//!             "Stir in the oats and cook for 5 minutes".to_string(),
//!         ],
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let mut session = CookAlongSession::new(recipe)?;
//! let step = session.start_first_step()?;
//! println!("{}", step);
//! # Ok(())
//! # }
//! ```

pub mod assistant;
pub mod commands;
pub mod config;
pub mod controller;
pub mod db;
pub mod display;
pub mod error;
pub mod library;
pub mod models;
pub mod params;
pub mod session;
pub mod source;
pub mod timer;
pub mod voice;

// Re-export commonly used types
pub use assistant::{Assistant, HttpAssistant, StepContext};
pub use commands::VoiceCommand;
pub use config::CookAlongConfig;
pub use controller::{
    ControllerEvent, ControllerSettings, ControllerSnapshot, CookAlongController,
    UtteranceOutcome, VoiceFlags,
};
pub use db::Database;
pub use display::{
    Conversation, CreateResult, DeleteResult, LocalDateTime, OperationStatus, RecipeSummaries,
    StepCard, TimerList,
};
pub use error::{CookAlongError, Result};
pub use library::{RecipeLibrary, RecipeLibraryBuilder};
pub use models::{
    ChatMessage, ChatRole, CookMode, Ingredient, Recipe, RecipeOrigin, RecipeStep, RecipeSummary,
    SessionStatus, TimerStatus,
};
pub use params::{CreateRecipe, Id, ListRecipes, RecentViews, SearchRecipes, SetFavorite};
pub use session::{CompletionSummary, CookAlongSession};
pub use source::RecipeSource;
pub use timer::{CookTimer, TimerBoard};
pub use voice::{ListenOptions, VoiceEngine};
