//! Assistant backed by an OpenAI-compatible chat-completion endpoint.

use async_trait::async_trait;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::{Assistant, StepContext};
use crate::{
    config::AssistantConfig,
    error::{CookAlongError, Result},
};

const SYSTEM_PROMPT: &str = "You are a friendly kitchen assistant helping someone cook a recipe \
step by step. Answer briefly in one to three sentences of plain text that can be read aloud. \
Stick to the recipe at hand and suggest safe substitutions when asked.";

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<RequestMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Serialize)]
struct RequestMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Calls a chat-completion API with the question and step context.
pub struct HttpAssistant {
    client: reqwest::Client,
    config: AssistantConfig,
}

impl HttpAssistant {
    /// Builds the HTTP client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `CookAlongError::Configuration` if the client cannot be built.
    pub fn new(config: AssistantConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| CookAlongError::Configuration {
                message: format!("Failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, config })
    }

    fn request<'a>(&'a self, question: &str, context: &StepContext) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![
                RequestMessage {
                    role: "system",
                    content: format!("{SYSTEM_PROMPT}\n\n{}", context.describe()),
                },
                RequestMessage {
                    role: "user",
                    content: question.to_string(),
                },
            ],
            temperature: 0.3,
            max_tokens: 300,
        }
    }
}

#[async_trait]
impl Assistant for HttpAssistant {
    async fn answer(&self, question: &str, context: &StepContext) -> Result<String> {
        if !self.config.is_configured() {
            return Err(CookAlongError::assistant(
                "no API key configured; set COOKALONG_API_KEY or [assistant].api_key",
            ));
        }

        debug!("Asking assistant at {}", self.config.endpoint);
        let resp = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&self.request(question, context))
            .send()
            .await
            .map_err(|e| CookAlongError::assistant(format!("request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(CookAlongError::assistant(format!("API error {status}: {text}")));
        }

        let body: ChatResponse = resp
            .json()
            .await
            .map_err(|e| CookAlongError::assistant(format!("invalid response: {e}")))?;

        let answer = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| CookAlongError::assistant("empty answer"))?;

        info!("Assistant answered ({} chars)", answer.len());
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context() -> StepContext {
        StepContext {
            recipe_title: "Risotto".to_string(),
            ingredients: vec![],
            step_number: Some(3),
            total_steps: 6,
            instruction: Some("Add stock one ladle at a time".to_string()),
        }
    }

    #[tokio::test]
    async fn test_unconfigured_assistant_fails_without_network() {
        let assistant = HttpAssistant::new(AssistantConfig::default()).unwrap();
        let err = assistant.answer("Can I use water?", &context()).await.unwrap_err();
        assert!(matches!(err, CookAlongError::Assistant { .. }));
        assert!(err.is_transient());
    }

    #[test]
    fn test_request_carries_context_and_question() {
        let assistant = HttpAssistant::new(AssistantConfig::default()).unwrap();
        let request = assistant.request("Can I use water?", &context());
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json["model"], "gpt-4o-mini");
        assert_eq!(json["messages"][0]["role"], "system");
        assert!(json["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("step 3 of 6"));
        assert_eq!(json["messages"][1]["content"], "Can I use water?");
    }

    #[test]
    fn test_response_parsing_tolerates_missing_content() {
        let body: ChatResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant"}}]}"#).unwrap();
        assert!(body.choices[0].message.content.is_none());
    }
}
