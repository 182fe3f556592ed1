use async_trait::async_trait;
use llm::builder::{LLMBackend, LLMBuilder};
use llm::chat::ChatMessage;

use ideaswipe_core::AiSettings;

use crate::{IdeaError, TextGenerator};

pub(crate) fn map_backend(provider: &str) -> Result<LLMBackend, String> {
    match provider {
        "openai" => Ok(LLMBackend::OpenAI),
        "anthropic" => Ok(LLMBackend::Anthropic),
        "google" => Ok(LLMBackend::Google),
        "ollama" => Ok(LLMBackend::Ollama),
        "groq" => Ok(LLMBackend::Groq),
        "mistral" => Ok(LLMBackend::Mistral),
        "deepseek" => Ok(LLMBackend::DeepSeek),
        other => Err(format!("unknown provider: {other}")),
    }
}

/// Send one prompt as a single user message and return the reply text.
pub async fn generate(settings: &AiSettings, prompt: &str) -> Result<String, IdeaError> {
    let backend = map_backend(&settings.provider).map_err(IdeaError::NotConfigured)?;

    let mut builder = LLMBuilder::new()
        .backend(backend)
        .model(&settings.model)
        .max_tokens(settings.max_tokens);

    if !settings.api_key.is_empty() {
        builder = builder.api_key(&settings.api_key);
    }

    let llm = builder
        .build()
        .map_err(|e| IdeaError::NotConfigured(format!("build LLM: {e}")))?;

    let messages = vec![ChatMessage::user().content(prompt).build()];

    let response = llm
        .chat(&messages)
        .await
        .map_err(|e| IdeaError::RemoteCallFailed(format!("chat: {e}")))?;

    match response.text() {
        Some(text) if !text.trim().is_empty() => Ok(text),
        Some(_) => Err(IdeaError::RemoteCallFailed("LLM returned empty text".to_string())),
        None => Err(IdeaError::RemoteCallFailed("LLM returned no text".to_string())),
    }
}

/// [`TextGenerator`] backed by the `llm` crate.
#[derive(Debug, Clone)]
pub struct LlmEngine {
    settings: AiSettings,
}

impl LlmEngine {
    pub fn new(settings: AiSettings) -> Result<Self, IdeaError> {
        map_backend(&settings.provider).map_err(IdeaError::NotConfigured)?;
        Ok(Self { settings })
    }

    pub fn settings(&self) -> &AiSettings {
        &self.settings
    }
}

#[async_trait]
impl TextGenerator for LlmEngine {
    async fn complete(&self, prompt: &str) -> Result<String, IdeaError> {
        generate(&self.settings, prompt).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_providers_map() {
        for provider in ["openai", "anthropic", "google", "ollama", "groq", "mistral", "deepseek"] {
            assert!(map_backend(provider).is_ok(), "{provider}");
        }
    }

    #[test]
    fn unknown_provider_is_not_configured() {
        let settings = AiSettings {
            provider: "carrier-pigeon".into(),
            ..Default::default()
        };
        let err = LlmEngine::new(settings).unwrap_err();
        assert!(matches!(err, IdeaError::NotConfigured(ref m) if m.contains("carrier-pigeon")));
    }
}
