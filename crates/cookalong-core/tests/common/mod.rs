#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use cookalong_core::{
    params::CreateRecipe, Assistant, Ingredient, ListenOptions, RecipeLibrary,
    RecipeLibraryBuilder, Result, StepContext, VoiceEngine,
};
use tempfile::TempDir;
use tokio::sync::watch;

/// Helper function to create a test library
pub async fn create_test_library() -> (TempDir, RecipeLibrary) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let library = RecipeLibraryBuilder::new()
        .with_database_path(Some(&db_path))
        .build()
        .await
        .expect("Failed to create library");
    (temp_dir, library)
}

pub fn risotto() -> CreateRecipe {
    CreateRecipe {
        title: "Mushroom Risotto".to_string(),
        summary: Some("Creamy and slow".to_string()),
        servings: Some(2),
        ready_minutes: Some(45),
        ingredients: vec![
            Ingredient {
                name: "arborio rice".to_string(),
                amount: Some("200 g".to_string()),
            },
            Ingredient {
                name: "mushrooms".to_string(),
                amount: Some("250 g".to_string()),
            },
        ],
        steps: vec![
            "Fry the mushrooms until golden".to_string(),
            "Toast the rice for 2 minutes".to_string(),
            "Add stock ladle by ladle for 18-20 minutes".to_string(),
            "Stir in butter and parmesan".to_string(),
        ],
        ..Default::default()
    }
}

/// Voice engine that never hears anything and records what it says.
pub struct QuietVoice {
    pub spoken: Mutex<Vec<String>>,
    levels: watch::Sender<f32>,
}

impl QuietVoice {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            spoken: Mutex::new(Vec::new()),
            levels: watch::channel(0.0).0,
        })
    }

    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

#[async_trait]
impl VoiceEngine for QuietVoice {
    async fn check_permissions(&self) -> Result<bool> {
        Ok(true)
    }

    async fn request_permissions(&self) -> Result<bool> {
        Ok(true)
    }

    async fn listen(&self, _options: &ListenOptions) -> Result<Option<String>> {
        Ok(None)
    }

    async fn stop_listening(&self) -> Result<()> {
        Ok(())
    }

    async fn speak(&self, text: &str) -> Result<()> {
        self.spoken.lock().unwrap().push(text.to_string());
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

/// Assistant that answers with the step it was told about.
pub struct EchoAssistant;

#[async_trait]
impl Assistant for EchoAssistant {
    async fn answer(&self, _question: &str, context: &StepContext) -> Result<String> {
        Ok(match context.step_number {
            Some(number) => format!("You are on step {number} of {}.", context.total_steps),
            None => "You have not started yet.".to_string(),
        })
    }
}
