//! The interactive `cook start` session.
//!
//! Input is read line by line from stdin. In manual mode every line is a
//! command. In voice mode plain lines are utterances for the voice engine and
//! `/command` runs a command. Controller events are printed by a separate
//! task, and another task advances timers once per second.

use std::{str::FromStr, sync::Arc, time::Duration};

use anyhow::{anyhow, Context, Result};
use cookalong_core::{
    config::API_KEY_ENV,
    display::{Conversation, LocalDateTime, OperationStatus, StepCard, TimerList},
    params::Id,
    timer::{detect_duration, MAX_TIMER_DURATION},
    ControllerEvent, ControllerSettings, CookAlongConfig, CookAlongController, CookAlongError,
    CookAlongSession, CookMode, HttpAssistant, RecipeLibrary, RecipeSource, SessionStatus,
    UtteranceOutcome,
};
use log::{debug, info, warn};
use tokio::{
    io::{self, AsyncBufReadExt, BufReader},
    sync::{broadcast, mpsc},
    time::{self, MissedTickBehavior},
};

use crate::{args::StartArgs, console::ConsoleVoice, renderer::TerminalRenderer};

const TICK: Duration = Duration::from_secs(1);

const HELP: &str = "\
## Commands

- `next`, `back`, `repeat`: move through the steps
- `pause`, `resume`: take a break
- `finish`: finish the recipe
- `timer [DURATION]`: start the step's suggested timer, or one like `timer 5m`
- `timers`: list running timers
- `timer-pause ID`, `timer-resume ID`, `timer-cancel ID`, `timer-dismiss ID`
- `ask QUESTION`: ask the cooking assistant
- `history`: show the conversation
- `status`: show the current step
- `voice`, `manual`: switch mode
- `listen`, `stop`: start or stop hands-free listening in voice mode
- `exit`: leave the session

In voice mode, type what you would say; prefix commands with `/`.
";

/// One line of input, parsed.
#[derive(Debug, Clone, PartialEq)]
enum Command {
    Next,
    Back,
    Repeat,
    Pause,
    Resume,
    Finish,
    Timer(Option<Duration>),
    Timers,
    TimerPause(u64),
    TimerResume(u64),
    TimerCancel(u64),
    TimerDismiss(u64),
    Ask(String),
    Voice,
    Manual,
    Listen,
    Stop,
    Status,
    History,
    Help,
    Exit,
}

impl FromStr for Command {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, rest) = line
            .split_once(char::is_whitespace)
            .map(|(word, rest)| (word, rest.trim()))
            .unwrap_or((line, ""));
        let timer_id = || {
            rest.parse::<u64>()
                .map_err(|_| format!("`{word}` needs a timer number"))
        };

        match word.to_lowercase().as_str() {
            "next" | "n" => Ok(Command::Next),
            "back" | "b" | "previous" | "prev" => Ok(Command::Back),
            "repeat" | "r" => Ok(Command::Repeat),
            "pause" | "p" => Ok(Command::Pause),
            "resume" => Ok(Command::Resume),
            "finish" | "done" => Ok(Command::Finish),
            "timer" | "t" if rest.is_empty() => Ok(Command::Timer(None)),
            "timer" | "t" => parse_duration(rest)
                .map(|d| Command::Timer(Some(d)))
                .ok_or_else(|| format!("`{rest}` is not a duration")),
            "timers" => Ok(Command::Timers),
            "timer-pause" => timer_id().map(Command::TimerPause),
            "timer-resume" => timer_id().map(Command::TimerResume),
            "timer-cancel" => timer_id().map(Command::TimerCancel),
            "timer-dismiss" => timer_id().map(Command::TimerDismiss),
            "ask" if rest.is_empty() => Err("`ask` needs a question".to_string()),
            "ask" => Ok(Command::Ask(rest.to_string())),
            "voice" => Ok(Command::Voice),
            "manual" => Ok(Command::Manual),
            "listen" => Ok(Command::Listen),
            "stop" => Ok(Command::Stop),
            "status" | "s" => Ok(Command::Status),
            "history" => Ok(Command::History),
            "help" | "h" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => Err(format!("Unknown command `{word}`. Type `help` for commands.")),
        }
    }
}

/// `5m`, `90 seconds`, `1 hour 10 minutes`, or a bare number of minutes.
fn parse_duration(text: &str) -> Option<Duration> {
    detect_duration(text).or_else(|| {
        text.parse::<u64>()
            .ok()
            .filter(|minutes| *minutes > 0)
            .and_then(|minutes| minutes.checked_mul(60))
            .map(Duration::from_secs)
            .filter(|duration| *duration <= MAX_TIMER_DURATION)
    })
}

#[derive(Debug, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Runs a cook-along session until `exit`, `finish` or end of input.
pub async fn run(
    library: &RecipeLibrary,
    config: &CookAlongConfig,
    renderer: &TerminalRenderer,
    args: StartArgs,
) -> Result<()> {
    let recipe = library
        .load_recipe(args.id)
        .await
        .with_context(|| format!("Cannot start recipe {}", args.id))?;
    library
        .record_view(&Id { id: args.id })
        .await
        .context("Failed to record recipe view")?;

    let title = recipe.title.clone();
    let mut session = CookAlongSession::new(recipe).context("This recipe cannot be cooked")?;
    session.on_complete(|summary| {
        info!(
            "Recipe {} finished on step {} of {}",
            summary.recipe_id, summary.finished_on_step, summary.steps_total
        );
    });

    if !config.assistant.is_configured() {
        warn!("No assistant API key configured; set {API_KEY_ENV} to ask questions");
    }
    let assistant = HttpAssistant::new(config.assistant.clone())
        .context("Failed to set up the cooking assistant")?;
    let (voice, utterances) = ConsoleVoice::new();
    let controller = CookAlongController::new(
        session,
        voice,
        Arc::new(assistant),
        ControllerSettings::from_config(config),
    );

    let printer = tokio::spawn(print_events(controller.subscribe(), renderer.clone()));
    let ticker = tokio::spawn(tick_timers(controller.clone()));

    renderer.render(&format!(
        "# Cooking {title}\n\nType `help` for commands.\n"
    ))?;

    let cook = CookLoop {
        controller,
        renderer,
        utterances,
        hands_free: config.voice.hands_free,
    };
    let outcome = cook.run(args.voice).await;

    if let Err(e) = cook.controller.exit(true).await {
        debug!("Session already closed: {e}");
    }
    ticker.abort();
    if let Err(e) = printer.await {
        warn!("Event printer failed: {e}");
    }
    outcome
}

struct CookLoop<'a> {
    controller: CookAlongController,
    renderer: &'a TerminalRenderer,
    utterances: mpsc::UnboundedSender<String>,
    hands_free: bool,
}

impl CookLoop<'_> {
    async fn run(&self, start_in_voice: bool) -> Result<()> {
        self.controller.start().await?;
        if start_in_voice {
            if let Err(e) = self.run_command(Command::Voice).await {
                self.report(&e)?;
            }
        }

        let mut lines = BufReader::new(io::stdin()).lines();
        while let Some(line) = lines.next_line().await.context("Failed to read input")? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let flow = match line.strip_prefix('/') {
                Some(command) => self.parse_and_run(command).await,
                None if self.controller.mode().await == CookMode::Voice => self.hear(line).await,
                None => self.parse_and_run(line).await,
            };
            match flow {
                Ok(Flow::Exit) => break,
                Ok(Flow::Continue) => {}
                Err(e) => self.report(&e)?,
            }
        }
        Ok(())
    }

    async fn parse_and_run(&self, line: &str) -> Result<Flow> {
        let command = Command::from_str(line).map_err(|e| anyhow!(e))?;
        self.run_command(command).await
    }

    /// Treats a line as speech.
    async fn hear(&self, line: &str) -> Result<Flow> {
        if self.controller.is_hands_free().await {
            self.utterances
                .send(line.to_string())
                .map_err(|_| anyhow!("Hands-free listening has stopped"))?;
            return Ok(Flow::Continue);
        }

        let outcome = self.controller.handle_utterance(line).await?;
        debug!("Utterance handled as {outcome:?}");
        let finished = matches!(outcome, UtteranceOutcome::Command(_))
            && self.controller.snapshot().await.status == SessionStatus::Completed;
        Ok(if finished { Flow::Exit } else { Flow::Continue })
    }

    async fn run_command(&self, command: Command) -> Result<Flow> {
        let controller = &self.controller;
        match command {
            Command::Next => {
                controller.next_step().await?;
            }
            Command::Back => {
                controller.previous_step().await?;
            }
            Command::Repeat => {
                controller.repeat_step().await?;
            }
            Command::Pause => controller.pause().await?,
            Command::Resume => controller.resume().await?,
            Command::Finish => {
                controller.complete().await?;
                return Ok(Flow::Exit);
            }
            Command::Timer(duration) => {
                controller.start_step_timer(duration).await?;
            }
            Command::Timers => {
                let snapshot = controller.snapshot().await;
                self.renderer
                    .show(&TimerList(snapshot.timers.iter().collect()))?;
            }
            Command::TimerPause(id) => {
                controller.pause_timer(id).await?;
            }
            Command::TimerResume(id) => {
                controller.resume_timer(id).await?;
            }
            Command::TimerCancel(id) => {
                controller.cancel_timer(id).await?;
            }
            Command::TimerDismiss(id) => {
                controller.dismiss_timer(id).await?;
                self.renderer
                    .show(&OperationStatus::success(format!("Timer {id} dismissed")))?;
            }
            Command::Ask(question) => {
                controller.ask_question(&question).await?;
            }
            Command::Voice => {
                controller.set_mode(CookMode::Voice).await?;
                if self.hands_free {
                    controller.start_hands_free().await?;
                }
            }
            Command::Manual => controller.set_mode(CookMode::Manual).await?,
            Command::Listen => controller.start_hands_free().await?,
            Command::Stop => controller.stop_hands_free().await?,
            Command::Status => {
                let snapshot = controller.snapshot().await;
                self.renderer.render(&format!(
                    "Cooking since {}\n",
                    LocalDateTime(&snapshot.created_at)
                ))?;
                if let Some(step) = &snapshot.current_step {
                    self.renderer.show(&StepCard {
                        step,
                        total_steps: snapshot.total_steps,
                        progress: snapshot.progress,
                        status: snapshot.status,
                    })?;
                }
                self.renderer
                    .show(&TimerList(snapshot.timers.iter().collect()))?;
            }
            Command::History => {
                let snapshot = controller.snapshot().await;
                self.renderer.show(&Conversation(&snapshot.conversation))?;
            }
            Command::Help => self.renderer.render(HELP)?,
            Command::Exit => return Ok(Flow::Exit),
        }
        Ok(Flow::Continue)
    }

    /// Prints a failed command. Failures the controller already announced as
    /// a notice are only logged.
    fn report(&self, error: &anyhow::Error) -> Result<()> {
        let announced = matches!(
            error.downcast_ref::<CookAlongError>(),
            Some(CookAlongError::Assistant { .. } | CookAlongError::PermissionDenied { .. })
        );
        if announced {
            debug!("{error}");
            return Ok(());
        }
        self.renderer.show(&OperationStatus::failure(error.to_string()))
    }
}

async fn print_events(mut events: broadcast::Receiver<ControllerEvent>, renderer: TerminalRenderer) {
    loop {
        let event = match events.recv().await {
            Ok(ControllerEvent::Exited) | Err(broadcast::error::RecvError::Closed) => break,
            Ok(event) => event,
            Err(broadcast::error::RecvError::Lagged(missed)) => {
                warn!("Missed {missed} session events");
                continue;
            }
        };
        if let Some(markdown) = describe_event(&event) {
            if let Err(e) = renderer.render(&markdown) {
                warn!("Failed to print event: {e}");
            }
        }
    }
}

fn describe_event(event: &ControllerEvent) -> Option<String> {
    let markdown = match event {
        ControllerEvent::StepChanged {
            index,
            step,
            total_steps,
        } => StepCard {
            step,
            total_steps: *total_steps,
            progress: (*index + 1) as f64 / *total_steps as f64,
            status: SessionStatus::Active,
        }
        .to_string(),
        ControllerEvent::Paused => "⏸ Paused. Type `resume` to continue.\n".to_string(),
        ControllerEvent::Resumed => "▶ Resumed.\n".to_string(),
        ControllerEvent::Completed(summary) => summary.to_string(),
        ControllerEvent::TimerStarted(timer) => format!("⏲ Started timer {timer}\n"),
        ControllerEvent::TimerUpdated(timer) => format!("⏲ Timer {timer}\n"),
        ControllerEvent::TimerCompleted(timer) => {
            format!("⏰ **{} timer is done!**\n", timer.label())
        }
        ControllerEvent::MessageAdded(message) => format!("{message}\n"),
        ControllerEvent::ModeChanged(mode) => format!("Mode: **{mode}**\n"),
        ControllerEvent::Notice(text) => format!("⚠ {text}\n"),
        ControllerEvent::FlagsChanged(_) | ControllerEvent::Exited => return None,
    };
    Some(markdown)
}

async fn tick_timers(controller: CookAlongController) {
    let mut interval = time::interval(TICK);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first tick completes immediately
    interval.tick().await;
    loop {
        interval.tick().await;
        if let Err(e) = controller.tick_timers(TICK).await {
            debug!("Timer ticker stopped: {e}");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_navigation_commands() {
        assert_eq!(Command::from_str("next").unwrap(), Command::Next);
        assert_eq!(Command::from_str(" B ").unwrap(), Command::Back);
        assert_eq!(Command::from_str("done").unwrap(), Command::Finish);
        assert_eq!(Command::from_str("quit").unwrap(), Command::Exit);
    }

    #[test]
    fn test_parse_timer_commands() {
        assert_eq!(Command::from_str("timer").unwrap(), Command::Timer(None));
        assert_eq!(
            Command::from_str("timer 5m").unwrap(),
            Command::Timer(Some(Duration::from_secs(300)))
        );
        assert_eq!(
            Command::from_str("t 12").unwrap(),
            Command::Timer(Some(Duration::from_secs(720)))
        );
        assert_eq!(
            Command::from_str("timer-cancel 3").unwrap(),
            Command::TimerCancel(3)
        );
        assert!(Command::from_str("timer soon").is_err());
        assert!(Command::from_str("timer-pause x").is_err());
    }

    #[test]
    fn test_oversized_timer_is_not_a_duration() {
        assert!(Command::from_str("timer 999999999999999999").is_err());
        assert!(Command::from_str("timer 99999999999999999999h").is_err());
        assert!(Command::from_str("timer 2000").is_err());
        assert_eq!(
            Command::from_str("timer 1440").unwrap(),
            Command::Timer(Some(MAX_TIMER_DURATION))
        );
    }

    #[test]
    fn test_parse_ask_keeps_question_text() {
        assert_eq!(
            Command::from_str("ask Can I use Greek yogurt?").unwrap(),
            Command::Ask("Can I use Greek yogurt?".to_string())
        );
        assert!(Command::from_str("ask").is_err());
    }

    #[test]
    fn test_unknown_command() {
        let err = Command::from_str("flambé").unwrap_err();
        assert!(err.contains("Unknown command"));
    }

    #[test]
    fn test_describe_events() {
        let step = cookalong_core::RecipeStep::new(2, "Stir");
        let text = describe_event(&ControllerEvent::StepChanged {
            index: 1,
            step,
            total_steps: 4,
        })
        .unwrap();
        assert!(text.contains("## Step 2 of 4"));
        assert!(text.contains("50%"));
        assert!(describe_event(&ControllerEvent::Exited).is_none());
    }
}
