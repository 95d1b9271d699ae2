//! A voice engine for the terminal: typed lines stand in for speech.

use std::sync::Arc;

use async_trait::async_trait;
use cookalong_core::{CookAlongError, ListenOptions, Result, VoiceEngine};
use log::debug;
use tokio::{
    sync::{mpsc, watch, Mutex},
    time,
};

/// "Hears" lines sent through its channel and "speaks" by printing.
pub struct ConsoleVoice {
    heard: Mutex<mpsc::UnboundedReceiver<String>>,
    levels: watch::Sender<f32>,
}

impl ConsoleVoice {
    /// Returns the engine and the sender the input loop feeds utterances to.
    pub fn new() -> (Arc<Self>, mpsc::UnboundedSender<String>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let voice = Arc::new(Self {
            heard: Mutex::new(rx),
            levels: watch::channel(0.0).0,
        });
        (voice, tx)
    }
}

#[async_trait]
impl VoiceEngine for ConsoleVoice {
    async fn check_permissions(&self) -> Result<bool> {
        Ok(true)
    }

    async fn request_permissions(&self) -> Result<bool> {
        Ok(true)
    }

    async fn listen(&self, options: &ListenOptions) -> Result<Option<String>> {
        let mut heard = self.heard.lock().await;
        match time::timeout(options.max_duration, heard.recv()).await {
            Ok(Some(line)) => {
                self.levels.send_replace(1.0);
                Ok(Some(line))
            }
            Ok(None) => Err(CookAlongError::voice("console input closed")),
            Err(_) => {
                debug!("Nothing typed within {:?}", options.max_duration);
                self.levels.send_replace(0.0);
                Ok(None)
            }
        }
    }

    async fn stop_listening(&self) -> Result<()> {
        self.levels.send_replace(0.0);
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<()> {
        println!("🔊 {text}");
        Ok(())
    }

    async fn speak_and_wait(&self, text: &str) -> Result<()> {
        self.speak(text).await
    }

    async fn stop_speaking(&self) -> Result<()> {
        Ok(())
    }

    fn audio_levels(&self) -> watch::Receiver<f32> {
        self.levels.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn test_listen_returns_typed_line() {
        let (voice, tx) = ConsoleVoice::new();
        tx.send("next".to_string()).unwrap();
        let heard = voice.listen(&ListenOptions::default()).await.unwrap();
        assert_eq!(heard.as_deref(), Some("next"));
    }

    #[tokio::test]
    async fn test_listen_times_out_with_silence() {
        let (voice, _tx) = ConsoleVoice::new();
        let options = ListenOptions {
            max_duration: Duration::from_millis(10),
            continuous: true,
        };
        assert_eq!(voice.listen(&options).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_closed_input_is_an_error() {
        let (voice, tx) = ConsoleVoice::new();
        drop(tx);
        assert!(voice.listen(&ListenOptions::default()).await.is_err());
    }
}
