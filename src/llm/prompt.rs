//! Prompt configuration and request body.

use serde::Serialize;

/// Persona used when the caller does not supply one.
pub const DEFAULT_PROMPT: &str = "You are a friendly teacher named Jane who is 28 years old. You teach 10 year old children. Always give helpful, educational responses in simple words that children can understand. Keep your answers between 20-40 words. Be encouraging and enthusiastic but never use emojis(ever). If you notice spelling mistakes, gently correct them. Stay focused on the topic and give relevant answers.";

pub const DEFAULT_MAX_LENGTH: u32 = 200;

/// Generation settings sent with every question.
///
/// Sampling is kept tight (low temperature, small `top_k`) so answers stay short
/// and predictable. Values are passed through unchecked; range checking is the
/// service's job.
#[derive(Debug, Clone, PartialEq)]
pub struct PromptConfig {
    pub system_prompt: String,
    pub max_length: u32,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub repetition_penalty: f64,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_PROMPT.to_string(),
            max_length: DEFAULT_MAX_LENGTH,
            temperature: 0.3,
            top_p: 0.8,
            top_k: 20,
            repetition_penalty: 1.2,
        }
    }
}

impl PromptConfig {
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = max_length;
        self
    }
}

/// One question paired with the settings it is asked under.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryRequest {
    pub question: String,
    pub config: PromptConfig,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>, config: PromptConfig) -> Self {
        Self { question: question.into(), config }
    }

    pub(crate) fn payload(&self) -> AskPayload<'_> {
        AskPayload {
            question: &self.question,
            custom_prompt: &self.config.system_prompt,
            max_length: self.config.max_length,
            truncation: true,
            repetition_penalty: self.config.repetition_penalty,
            temperature: self.config.temperature,
            top_p: self.config.top_p,
            top_k: self.config.top_k,
        }
    }
}

/// JSON body of `POST /ask-llm-prompted`.
#[derive(Debug, Serialize)]
pub struct AskPayload<'a> {
    pub question: &'a str,
    pub custom_prompt: &'a str,
    pub max_length: u32,
    pub truncation: bool,
    pub repetition_penalty: f64,
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_payload() {
        let request = QueryRequest::new("What is the capital of France?", PromptConfig::default());
        let body = serde_json::to_value(request.payload()).unwrap();

        assert_eq!(
            body,
            json!({
                "question": "What is the capital of France?",
                "custom_prompt": DEFAULT_PROMPT,
                "max_length": 200,
                "truncation": true,
                "repetition_penalty": 1.2,
                "temperature": 0.3,
                "top_p": 0.8,
                "top_k": 20,
            })
        );
    }

    #[test]
    fn test_custom_prompt_replaces_default() {
        let config = PromptConfig::default().with_system_prompt("Answer like a pirate.").with_max_length(50);
        let request = QueryRequest::new("Hi", config);
        let payload = request.payload();

        assert_eq!(payload.custom_prompt, "Answer like a pirate.");
        assert_eq!(payload.max_length, 50);
        assert_eq!(payload.temperature, 0.3);
    }
}
