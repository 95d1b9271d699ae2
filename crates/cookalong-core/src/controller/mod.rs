//! Orchestration of one cook-along session with voice and the assistant.
//!
//! [`CookAlongController`] owns the current [`CookAlongSession`] and mediates
//! between it, a [`VoiceEngine`] and an [`Assistant`]. Front ends drive it with
//! async calls and re-render from the [`ControllerEvent`]s it broadcasts or
//! from a [`ControllerSnapshot`].
//!
//! ```text
//! ┌───────────┐  call   ┌─────────────────────┐  mutate  ┌──────────────────┐
//! │ front end │────────▶│ CookAlongController │─────────▶│ CookAlongSession │
//! └───────────┘         └─────────────────────┘          └──────────────────┘
//!       ▲                  │ await       │ await
//!       │ events           ▼             ▼
//!       └──────────── VoiceEngine     Assistant
//! ```
//!
//! The controller is cheap to clone. State lives behind one async mutex that
//! is never held across an await into a collaborator, so speech or a slow
//! answer never blocks snapshots or timer ticks.

use std::sync::Arc;

use jiff::Timestamp;
use log::{debug, info, warn};
use serde::Serialize;
use tokio::{
    sync::{broadcast, watch, Mutex, MutexGuard, Notify},
    task::JoinHandle,
};
use tokio_util::sync::CancellationToken;

use crate::{
    assistant::Assistant,
    config::CookAlongConfig,
    error::{CookAlongError, Result},
    models::{ChatMessage, CookMode, RecipeStep, SessionStatus},
    session::{CompletionSummary, CookAlongSession},
    timer::CookTimer,
    voice::{ListenOptions, VoiceEngine},
};

mod conversation;
mod session_ops;


pub use conversation::UtteranceOutcome;

const EVENT_CAPACITY: usize = 64;

/// Transient voice activity shown to the cook.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct VoiceFlags {
    pub is_listening: bool,
    pub is_speaking: bool,
    pub is_processing_question: bool,
}

/// Everything a front end needs to react to.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    ModeChanged(CookMode),
    StepChanged {
        /// 0-based position in the recipe
        index: usize,
        step: RecipeStep,
        total_steps: usize,
    },
    Paused,
    Resumed,
    Completed(CompletionSummary),
    TimerStarted(CookTimer),
    TimerUpdated(CookTimer),
    TimerCompleted(CookTimer),
    MessageAdded(ChatMessage),
    FlagsChanged(VoiceFlags),
    /// A transient message for the cook, usually a recovered failure
    Notice(String),
    Exited,
}

/// Point-in-time view of the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControllerSnapshot {
    pub status: SessionStatus,
    /// When the session was set up
    pub created_at: Timestamp,
    pub current_step_index: Option<usize>,
    pub current_step: Option<RecipeStep>,
    pub total_steps: usize,
    pub progress: f64,
    pub has_next_step: bool,
    pub has_previous_step: bool,
    pub mode: CookMode,
    pub flags: VoiceFlags,
    /// Latest microphone or speaker level in `0.0..=1.0`
    pub audio_level: f32,
    /// Running and paused timers
    pub timers: Vec<CookTimer>,
    pub conversation: Vec<ChatMessage>,
    pub ended: bool,
}

/// Tunables taken from the `[voice]` configuration section.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerSettings {
    pub listen: ListenOptions,
    /// Spoken on exit in voice mode; empty to stay silent
    pub goodbye: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self::from_config(&CookAlongConfig::default())
    }
}

impl ControllerSettings {
    pub fn from_config(config: &CookAlongConfig) -> Self {
        Self {
            listen: config.voice.listen_options(),
            goodbye: config.voice.goodbye.clone(),
        }
    }
}

/// How narration is handed to the voice engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Delivery {
    /// Cut off whatever is being said and return once speech has started
    Interrupt,
    /// Return only after the text has been spoken
    Wait,
}

struct HandsFree {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

struct State {
    session: CookAlongSession,
    mode: CookMode,
    flags: VoiceFlags,
    conversation: Vec<ChatMessage>,
    hands_free: Option<HandsFree>,
    ended: bool,
}

struct Shared {
    state: Mutex<State>,
    /// Held while listening or speaking; the two never overlap
    turn: Mutex<()>,
    /// Asks the hands-free loop to give up the turn
    yield_turn: Notify,
    voice: Arc<dyn VoiceEngine>,
    assistant: Arc<dyn Assistant>,
    events: broadcast::Sender<ControllerEvent>,
    audio: watch::Receiver<f32>,
    settings: ControllerSettings,
}

/// Drives one cook-along session.
#[derive(Clone)]
pub struct CookAlongController {
    shared: Arc<Shared>,
}

impl CookAlongController {
    /// Takes ownership of a session in manual mode.
    pub fn new(
        session: CookAlongSession,
        voice: Arc<dyn VoiceEngine>,
        assistant: Arc<dyn Assistant>,
        settings: ControllerSettings,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let audio = voice.audio_levels();
        Self {
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    session,
                    mode: CookMode::Manual,
                    flags: VoiceFlags::default(),
                    conversation: Vec::new(),
                    hands_free: None,
                    ended: false,
                }),
                turn: Mutex::new(()),
                yield_turn: Notify::new(),
                voice,
                assistant,
                events,
                audio,
                settings,
            }),
        }
    }

    /// Receives every event sent after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<ControllerEvent> {
        self.shared.events.subscribe()
    }

    /// Latest audio level from the voice engine, clamped to `0.0..=1.0`.
    pub fn audio_level(&self) -> f32 {
        self.shared.audio.borrow().clamp(0.0, 1.0)
    }

    pub async fn mode(&self) -> CookMode {
        self.shared.state.lock().await.mode
    }

    pub async fn snapshot(&self) -> ControllerSnapshot {
        let state = self.shared.state.lock().await;
        let session = &state.session;
        ControllerSnapshot {
            status: session.status(),
            created_at: session.created_at(),
            current_step_index: session.current_step_index(),
            current_step: session.current_step().cloned(),
            total_steps: session.total_steps(),
            progress: session.progress(),
            has_next_step: session.has_next_step(),
            has_previous_step: session.has_previous_step(),
            mode: state.mode,
            flags: state.flags,
            audio_level: self.audio_level(),
            timers: session.timers().visible().into_iter().cloned().collect(),
            conversation: state.conversation.clone(),
            ended: state.ended,
        }
    }

    /// Switches between voice and manual mode.
    ///
    /// Any hands-free listening and in-flight speech are stopped and the
    /// voice flags are reset. The step position is never touched. Entering
    /// voice mode checks, and if needed requests, microphone permission.
    ///
    /// # Errors
    ///
    /// Returns `PermissionDenied` when voice mode is refused; the controller
    /// then stays in manual mode.
    pub async fn set_mode(&self, mode: CookMode) -> Result<()> {
        if self.live().await?.mode == mode {
            return Ok(());
        }

        if mode == CookMode::Voice && !self.ensure_permission().await? {
            warn!("Microphone permission denied, staying in manual mode");
            self.emit(ControllerEvent::Notice(
                "Microphone access was denied. Manual mode is still available.".to_string(),
            ));
            return Err(CookAlongError::PermissionDenied {
                message: "microphone access was not granted".to_string(),
            });
        }

        {
            let mut state = self.live().await?;
            state.mode = mode;
            state.flags = VoiceFlags::default();
            if let Some(hands_free) = state.hands_free.take() {
                hands_free.token.cancel();
            }
        }
        self.silence_voice().await;

        info!("Cook mode set to {}", mode.as_str());
        self.emit(ControllerEvent::ModeChanged(mode));
        self.emit(ControllerEvent::FlagsChanged(VoiceFlags::default()));
        Ok(())
    }

    /// Leaves the session.
    ///
    /// Stops listening and speaking, optionally says goodbye in voice mode,
    /// clears the conversation and timers, and sends
    /// [`ControllerEvent::Exited`]. Every later operation returns
    /// `SessionEnded`.
    pub async fn exit(&self, say_goodbye: bool) -> Result<()> {
        let mode = {
            let mut state = self.live().await?;
            state.ended = true;
            state.flags = VoiceFlags::default();
            state.conversation.clear();
            state.session.timers_mut().clear();
            if let Some(hands_free) = state.hands_free.take() {
                hands_free.token.cancel();
            }
            state.mode
        };
        self.silence_voice().await;

        let goodbye = &self.shared.settings.goodbye;
        if say_goodbye && mode == CookMode::Voice && !goodbye.is_empty() {
            if let Err(e) = self.shared.voice.speak_and_wait(goodbye).await {
                warn!("Failed to say goodbye: {e}");
            }
        }

        info!("Cook-along session exited");
        self.emit(ControllerEvent::Exited);
        Ok(())
    }

    /// Whether the hands-free task is still running.
    pub async fn is_hands_free(&self) -> bool {
        self.shared
            .state
            .lock()
            .await
            .hands_free
            .as_ref()
            .is_some_and(|hands_free| !hands_free.handle.is_finished())
    }

    /// Locks the state unless the session has been exited.
    async fn live(&self) -> Result<MutexGuard<'_, State>> {
        let state = self.shared.state.lock().await;
        if state.ended {
            return Err(CookAlongError::SessionEnded);
        }
        Ok(state)
    }

    fn emit(&self, event: ControllerEvent) {
        // No subscribers is fine.
        let _ = self.shared.events.send(event);
    }

    fn notice(&self, message: impl Into<String>) {
        self.emit(ControllerEvent::Notice(message.into()));
    }

    async fn ensure_permission(&self) -> Result<bool> {
        let voice = &self.shared.voice;
        if voice.check_permissions().await? {
            return Ok(true);
        }
        debug!("Requesting microphone permission");
        voice.request_permissions().await
    }

    async fn silence_voice(&self) {
        if let Err(e) = self.shared.voice.stop_listening().await {
            warn!("Failed to stop listening: {e}");
        }
        if let Err(e) = self.shared.voice.stop_speaking().await {
            warn!("Failed to stop speaking: {e}");
        }
    }

    /// Speaks `text` in voice mode; does nothing in manual mode.
    ///
    /// Speech failures are reported as a notice and never fail the caller.
    async fn say(&self, text: &str, delivery: Delivery) {
        let _turn = self.take_turn().await;
        {
            let mut state = self.shared.state.lock().await;
            if state.ended || state.mode != CookMode::Voice {
                return;
            }
            state.flags.is_speaking = true;
            self.emit(ControllerEvent::FlagsChanged(state.flags));
        }

        let voice = &self.shared.voice;
        let result = match delivery {
            Delivery::Interrupt => voice.speak(text).await,
            Delivery::Wait => voice.speak_and_wait(text).await,
        };

        {
            let mut state = self.shared.state.lock().await;
            state.flags.is_speaking = false;
            self.emit(ControllerEvent::FlagsChanged(state.flags));
        }
        if let Err(e) = result {
            warn!("Speech failed: {e}");
            self.notice(format!("Could not speak: {e}"));
        }
    }

    /// Waits for the voice engine to be free, interrupting a hands-free
    /// listen in progress.
    async fn take_turn(&self) -> MutexGuard<'_, ()> {
        match self.shared.turn.try_lock() {
            Ok(turn) => turn,
            Err(_) => {
                self.shared.yield_turn.notify_one();
                self.shared.turn.lock().await
            }
        }
    }
}
