pub mod engine;
mod parse;
mod prompt;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ideaswipe_core::{AiSettings, Idea};
use thiserror::Error;

pub use parse::extract_idea;
pub use prompt::{build_prompt, PromptKind};

#[derive(Debug, Error)]
pub enum IdeaError {
    /// Refine was asked for without an idea to refine.
    #[error("Current idea is required")]
    InvalidInput,
    #[error("text generation request failed: {0}")]
    RemoteCallFailed(String),
    #[error("text generation timed out after {0:?}")]
    TimedOut(Duration),
    #[error("No valid JSON found in model response")]
    ExtractionFailed,
    #[error("AI provider not configured: {0}")]
    NotConfigured(String),
}

/// One outbound text-generation call.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, IdeaError>;
}

/// Prompt → remote model → extraction. Holds no mutable state, so one
/// instance can serve any number of concurrent requests.
#[derive(Clone)]
pub struct IdeaService {
    generator: Arc<dyn TextGenerator>,
    deadline: Option<Duration>,
}

impl IdeaService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            generator,
            deadline: None,
        }
    }

    /// Build a service around the `llm` engine. `timeout_secs == 0` means no deadline.
    pub fn from_settings(settings: AiSettings) -> Result<Self, IdeaError> {
        let deadline = (settings.timeout_secs > 0).then(|| Duration::from_secs(settings.timeout_secs));
        let engine = engine::LlmEngine::new(settings)?;
        Ok(Self::new(Arc::new(engine)).with_deadline(deadline))
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    pub async fn generate(&self) -> Result<Idea, IdeaError> {
        self.run(PromptKind::Generate).await
    }

    pub async fn refine(&self, current: Option<&Idea>) -> Result<Idea, IdeaError> {
        let current = current.ok_or(IdeaError::InvalidInput)?;
        self.run(PromptKind::Refine(current)).await
    }

    async fn run(&self, kind: PromptKind<'_>) -> Result<Idea, IdeaError> {
        let prompt = build_prompt(kind);
        let raw = self.call(&prompt).await?;
        tracing::debug!("[ideaswipe-suggest] raw LLM output:\n{raw}");

        let Some(idea) = extract_idea(&raw) else {
            tracing::error!("[ideaswipe-suggest] no valid JSON found in response:\n{raw}");
            return Err(IdeaError::ExtractionFailed);
        };

        let missing = idea.missing_fields();
        if !missing.is_empty() {
            let keys: Vec<&str> = missing.iter().map(|f| f.key()).collect();
            tracing::warn!("[ideaswipe-suggest] idea is missing fields: {}", keys.join(", "));
        }
        Ok(idea)
    }

    async fn call(&self, prompt: &str) -> Result<String, IdeaError> {
        let pending = self.generator.complete(prompt);
        match self.deadline {
            Some(limit) => tokio::time::timeout(limit, pending)
                .await
                .map_err(|_| IdeaError::TimedOut(limit))?,
            None => pending.await,
        }
    }
}
