//! Keyword dispatch for spoken navigation commands.
//!
//! Recognized speech is normalized (lowercased, punctuation stripped) and
//! looked up in [`COMMAND_TABLE`]. Utterances that match no phrase are treated
//! as questions for the assistant by the controller.

use std::fmt;

/// Actions a cook can trigger by voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceCommand {
    Next,
    Previous,
    Repeat,
    Pause,
    Resume,
    StartTimer,
    Finish,
}

impl VoiceCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceCommand::Next => "next",
            VoiceCommand::Previous => "previous",
            VoiceCommand::Repeat => "repeat",
            VoiceCommand::Pause => "pause",
            VoiceCommand::Resume => "resume",
            VoiceCommand::StartTimer => "start timer",
            VoiceCommand::Finish => "finish",
        }
    }

    /// Maps an utterance to a command, if it is one.
    ///
    /// ```rust
    /// use cookalong_core::commands::VoiceCommand;
    ///
    /// assert_eq!(VoiceCommand::parse("Next step, please"), Some(VoiceCommand::Next));
    /// assert_eq!(VoiceCommand::parse("What is next after the sauce?"), None);
    /// ```
    pub fn parse(utterance: &str) -> Option<Self> {
        let normalized = normalize(utterance);
        let words = normalized.split_whitespace().count();
        if words == 0 {
            return None;
        }

        COMMAND_TABLE.iter().find_map(|(phrase, command)| {
            let matches = normalized == *phrase
                || (words <= MAX_COMMAND_WORDS
                    && normalized
                        .strip_prefix(phrase)
                        .is_some_and(|rest| rest.starts_with(' ')));
            matches.then_some(*command)
        })
    }
}

impl fmt::Display for VoiceCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Longest utterance still treated as a command when it only starts with a
/// phrase ("next step please").
const MAX_COMMAND_WORDS: usize = 4;

/// Phrase table, longest phrases first so "go back" wins over "go".
pub const COMMAND_TABLE: &[(&str, VoiceCommand)] = &[
    ("say that again", VoiceCommand::Repeat),
    ("start the timer", VoiceCommand::StartTimer),
    ("start a timer", VoiceCommand::StartTimer),
    ("set a timer", VoiceCommand::StartTimer),
    ("i'm done cooking", VoiceCommand::Finish),
    ("im done cooking", VoiceCommand::Finish),
    ("done cooking", VoiceCommand::Finish),
    ("previous step", VoiceCommand::Previous),
    ("start timer", VoiceCommand::StartTimer),
    ("set timer", VoiceCommand::StartTimer),
    ("next step", VoiceCommand::Next),
    ("keep going", VoiceCommand::Next),
    ("hold on", VoiceCommand::Pause),
    ("go back", VoiceCommand::Previous),
    ("continue", VoiceCommand::Next),
    ("previous", VoiceCommand::Previous),
    ("unpause", VoiceCommand::Resume),
    ("resume", VoiceCommand::Resume),
    ("repeat", VoiceCommand::Repeat),
    ("finish", VoiceCommand::Finish),
    ("again", VoiceCommand::Repeat),
    ("pause", VoiceCommand::Pause),
    ("next", VoiceCommand::Next),
    ("back", VoiceCommand::Previous),
    ("wait", VoiceCommand::Pause),
];

fn normalize(utterance: &str) -> String {
    utterance
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '\'' {
                c.to_ascii_lowercase()
            } else {
                ' '
            }
        })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}
