//! The voice I/O boundary.
//!
//! Speech recognition and synthesis live outside this crate. The controller
//! only needs the operations of [`VoiceEngine`]; platform engines, the
//! terminal's console engine and test doubles all implement it.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;

use crate::error::Result;

/// How a single listen request behaves.
#[derive(Debug, Clone, PartialEq)]
pub struct ListenOptions {
    /// Upper bound on one listen; the engine returns `None` after it.
    pub max_duration: Duration,
    /// Hands-free mode: the engine may keep its recognizer warm between
    /// requests.
    pub continuous: bool,
}

impl Default for ListenOptions {
    fn default() -> Self {
        Self {
            max_duration: Duration::from_secs(30),
            continuous: true,
        }
    }
}

/// Speech-to-text and text-to-speech collaborator.
///
/// Listening and speaking are mutually exclusive on the engine's side; the
/// controller never starts a listen while another is in flight.
#[async_trait]
pub trait VoiceEngine: Send + Sync {
    /// Whether microphone and speech permissions are already granted.
    async fn check_permissions(&self) -> Result<bool>;

    /// Asks the platform for permissions; returns whether they were granted.
    async fn request_permissions(&self) -> Result<bool>;

    /// Waits for one finalized utterance.
    ///
    /// Returns `Ok(None)` when nothing was recognized within
    /// [`ListenOptions::max_duration`].
    async fn listen(&self, options: &ListenOptions) -> Result<Option<String>>;

    /// Aborts an in-flight listen.
    async fn stop_listening(&self) -> Result<()>;

    /// Starts speaking, interrupting any current utterance.
    async fn speak(&self, text: &str) -> Result<()>;

    /// Speaks and returns once playback finished.
    async fn speak_and_wait(&self, text: &str) -> Result<()>;

    /// Stops any current utterance.
    async fn stop_speaking(&self) -> Result<()>;

    /// Live input or output level in `0.0..=1.0`, for visualization only.
    fn audio_levels(&self) -> watch::Receiver<f32>;
}
