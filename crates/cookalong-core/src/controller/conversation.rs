//! Questions to the assistant and the hands-free listening loop.

use log::{debug, info, warn};
use tokio_util::sync::CancellationToken;

use super::{
    session_ops::StepMove, ControllerEvent, CookAlongController, Delivery, HandsFree,
};
use crate::{
    assistant::StepContext,
    commands::VoiceCommand,
    error::{CookAlongError, Result},
    models::{ChatMessage, CookMode, SessionStatus},
};

/// What an utterance turned into.
#[derive(Debug, Clone, PartialEq)]
pub enum UtteranceOutcome {
    Command(VoiceCommand),
    /// The utterance was asked as a question; holds the answer
    Answer(String),
}

impl CookAlongController {
    /// Asks the assistant about the current step.
    ///
    /// The question and the reply are appended to the conversation, and the
    /// reply is spoken in voice mode. If the assistant fails the question is
    /// removed again and the conversation is left as it was.
    pub async fn ask_question(&self, question: &str) -> Result<String> {
        self.ask_with(question, Delivery::Interrupt).await
    }

    /// Routes one finalized utterance: a known command runs, anything else
    /// is asked as a question.
    pub async fn handle_utterance(&self, utterance: &str) -> Result<UtteranceOutcome> {
        self.handle_with(utterance, Delivery::Interrupt).await
    }

    /// Starts listening continuously in the background.
    ///
    /// Each utterance is handled and spoken replies are waited for before
    /// listening resumes. The loop ends on [`stop_hands_free`], a mode
    /// switch, completion or exit.
    ///
    /// [`stop_hands_free`]: CookAlongController::stop_hands_free
    pub async fn start_hands_free(&self) -> Result<()> {
        let mut state = self.live().await?;
        if state.mode != CookMode::Voice {
            return Err(CookAlongError::invalid_input("mode")
                .with_reason("Hands-free listening needs voice mode"));
        }
        if state
            .hands_free
            .as_ref()
            .is_some_and(|hands_free| !hands_free.handle.is_finished())
        {
            return Ok(());
        }

        let token = CancellationToken::new();
        let handle = tokio::spawn(self.clone().run_hands_free(token.clone()));
        state.hands_free = Some(HandsFree { token, handle });
        info!("Hands-free listening started");
        Ok(())
    }

    pub async fn stop_hands_free(&self) -> Result<()> {
        let was_running = {
            let mut state = self.live().await?;
            state.flags.is_listening = false;
            self.emit(ControllerEvent::FlagsChanged(state.flags));
            match state.hands_free.take() {
                Some(hands_free) => {
                    hands_free.token.cancel();
                    true
                }
                None => false,
            }
        };
        if was_running {
            if let Err(e) = self.shared.voice.stop_listening().await {
                warn!("Failed to stop listening: {e}");
            }
            info!("Hands-free listening stopped");
        }
        Ok(())
    }

    pub(super) async fn ask_with(&self, question: &str, delivery: Delivery) -> Result<String> {
        let question = question.trim();
        if question.is_empty() {
            return Err(CookAlongError::invalid_input("question")
                .with_reason("Question cannot be empty"));
        }

        let asked = ChatMessage::user(question);
        let context = {
            let mut state = self.live().await?;
            if state.flags.is_processing_question {
                return Err(CookAlongError::invalid_input("question")
                    .with_reason("Still answering the previous question"));
            }
            state.conversation.push(asked.clone());
            state.flags.is_processing_question = true;
            self.emit(ControllerEvent::MessageAdded(asked.clone()));
            self.emit(ControllerEvent::FlagsChanged(state.flags));
            StepContext::from_session(&state.session)
        };

        debug!("Asking assistant: {question}");
        let answer = self.shared.assistant.answer(question, &context).await;

        let mut state = self.shared.state.lock().await;
        state.flags.is_processing_question = false;
        self.emit(ControllerEvent::FlagsChanged(state.flags));
        match answer {
            Ok(reply) => {
                if state.ended {
                    return Err(CookAlongError::SessionEnded);
                }
                let message = ChatMessage::assistant(reply.trim());
                state.conversation.push(message.clone());
                drop(state);

                self.emit(ControllerEvent::MessageAdded(message.clone()));
                self.say(&message.content, delivery).await;
                Ok(message.content)
            }
            Err(e) => {
                if let Some(position) = state.conversation.iter().rposition(|m| *m == asked) {
                    state.conversation.remove(position);
                }
                drop(state);

                warn!("Assistant failed: {e}");
                self.notice(format!("Couldn't get an answer right now: {e}"));
                Err(e)
            }
        }
    }

    pub(super) async fn handle_with(
        &self,
        utterance: &str,
        delivery: Delivery,
    ) -> Result<UtteranceOutcome> {
        let Some(command) = VoiceCommand::parse(utterance) else {
            let answer = self.ask_with(utterance, delivery).await?;
            return Ok(UtteranceOutcome::Answer(answer));
        };

        debug!("Voice command: {command}");
        match command {
            VoiceCommand::Next => {
                let (status, has_next) = {
                    let state = self.live().await?;
                    (state.session.status(), state.session.has_next_step())
                };
                match status {
                    SessionStatus::NotStarted => {
                        self.move_to(StepMove::Start, delivery).await?;
                    }
                    SessionStatus::Active if !has_next => {
                        self.complete_with(delivery).await?;
                    }
                    _ => {
                        self.move_to(StepMove::Next, delivery).await?;
                    }
                }
            }
            VoiceCommand::Previous => {
                self.move_to(StepMove::Previous, delivery).await?;
            }
            VoiceCommand::Repeat => {
                self.move_to(StepMove::Repeat, delivery).await?;
            }
            VoiceCommand::Pause => self.pause_with(delivery).await?,
            VoiceCommand::Resume => self.resume_with(delivery).await?,
            VoiceCommand::StartTimer => {
                self.start_step_timer_with(None, delivery).await?;
            }
            VoiceCommand::Finish => {
                self.complete_with(delivery).await?;
            }
        }
        Ok(UtteranceOutcome::Command(command))
    }

    async fn run_hands_free(self, token: CancellationToken) {
        loop {
            let turn = self.shared.turn.lock().await;
            if !self.begin_listening(&token).await {
                break;
            }
            let heard = tokio::select! {
                _ = token.cancelled() => break,
                _ = self.shared.yield_turn.notified() => None,
                heard = self.shared.voice.listen(&self.shared.settings.listen) => Some(heard),
            };
            self.end_listening().await;

            let Some(heard) = heard else {
                debug!("Listening paused for narration");
                if let Err(e) = self.shared.voice.stop_listening().await {
                    warn!("Failed to stop listening: {e}");
                }
                continue;
            };
            drop(turn);

            match heard {
                Ok(Some(utterance)) => {
                    if token.is_cancelled() {
                        break;
                    }
                    if let Err(e) = self.handle_with(&utterance, Delivery::Wait).await {
                        if matches!(e, CookAlongError::SessionEnded) {
                            break;
                        }
                        // Assistant failures already sent a notice.
                        if !matches!(e, CookAlongError::Assistant { .. }) {
                            self.notice(e.to_string());
                        }
                        warn!("Could not handle \"{utterance}\": {e}");
                    }
                }
                Ok(None) => debug!("Nothing heard, listening again"),
                Err(e) => {
                    warn!("Listening failed: {e}");
                    self.notice(format!("Listening stopped: {e}"));
                    break;
                }
            }
        }
        debug!("Hands-free loop finished");
    }

    /// Marks the controller as listening unless the loop should stop.
    async fn begin_listening(&self, token: &CancellationToken) -> bool {
        let mut state = self.shared.state.lock().await;
        let keep_going = !token.is_cancelled()
            && !state.ended
            && state.mode == CookMode::Voice
            && state.session.status() != SessionStatus::Completed;
        if keep_going {
            state.flags.is_listening = true;
            self.emit(ControllerEvent::FlagsChanged(state.flags));
        }
        keep_going
    }

    async fn end_listening(&self) {
        let mut state = self.shared.state.lock().await;
        if state.flags.is_listening {
            state.flags.is_listening = false;
            self.emit(ControllerEvent::FlagsChanged(state.flags));
        }
    }
}
