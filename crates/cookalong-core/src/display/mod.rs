//! Display formatting for recipes and cook-along state.
//!
//! Everything here formats as markdown. The CLI renders it through termimad,
//! or prints it verbatim with `--no-color`.
//!
//! - **Domain models** ([`models`]): `Display` for recipes, summaries, steps,
//!   timers, chat messages and statuses
//! - **Collections** ([`collections`]): recipe lists, timer lists and the
//!   conversation, with empty-collection handling
//! - **Session views** ([`session`]): the current step card and the
//!   completion summary
//! - **Results** ([`results`]) and **status** ([`status`]): confirmations for
//!   library operations
//!
//! # Examples
//!
//! ```rust
//! use cookalong_core::{display::StepCard, models::{RecipeStep, SessionStatus}};
//!
//! let step = RecipeStep::new(2, "Whisk in the milk");
//! let card = StepCard {
//!     step: &step,
//!     total_steps: 4,
//!     progress: 0.5,
//!     status: SessionStatus::Active,
//! };
//! let output = card.to_string();
//! assert!(output.contains("## Step 2 of 4"));
//! assert!(output.contains("50%"));
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod session;
pub mod status;

// Re-export commonly used types for convenience
pub use collections::{Conversation, RecipeSummaries, TimerList};
pub use datetime::LocalDateTime;
pub use results::{CreateResult, DeleteResult};
pub use session::StepCard;
pub use status::OperationStatus;
