use async_trait::async_trait;
use ideaswipe_core::Idea;
use ideaswipe_suggest::{IdeaError, IdeaService};
use reqwest::header::CONTENT_TYPE;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("API request failed: {status} - {body}")]
    Status { status: u16, body: String },
    #[error("Response is not JSON: {0}")]
    NotJson(String),
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error(transparent)]
    Service(#[from] IdeaError),
}

/// Where the client gets ideas from.
#[async_trait]
pub trait IdeaSource: Send + Sync {
    async fn generate(&self) -> Result<Idea, SourceError>;
    async fn refine(&self, current: &Idea) -> Result<Idea, SourceError>;
}

/// Talks to a running `ideaswipe-server`.
#[derive(Debug, Clone)]
pub struct HttpIdeaSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpIdeaSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    async fn post(&self, path: &str, body: Option<serde_json::Value>) -> Result<Idea, SourceError> {
        let url = format!("{}/{path}", self.base_url);
        tracing::debug!("POST {url}");

        let mut request = self.client.post(&url).header(CONTENT_TYPE, "application/json");
        if let Some(body) = body {
            request = request.json(&body);
        }
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("API error response: {status} {body}");
            return Err(SourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let is_json = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json"));
        let text = response.text().await?;
        if !is_json {
            return Err(SourceError::NotJson(text));
        }

        let value: serde_json::Value =
            serde_json::from_str(&text).map_err(|_| SourceError::NotJson(text.clone()))?;
        Idea::from_json(&value).ok_or(SourceError::NotJson(text))
    }
}

#[async_trait]
impl IdeaSource for HttpIdeaSource {
    async fn generate(&self) -> Result<Idea, SourceError> {
        self.post("generate-idea", None).await
    }

    async fn refine(&self, current: &Idea) -> Result<Idea, SourceError> {
        self.post("refine-idea", Some(json!({ "currentIdea": current })))
            .await
    }
}

/// In-process mode: call the idea service directly.
#[async_trait]
impl IdeaSource for IdeaService {
    async fn generate(&self) -> Result<Idea, SourceError> {
        Ok(IdeaService::generate(self).await?)
    }

    async fn refine(&self, current: &Idea) -> Result<Idea, SourceError> {
        Ok(IdeaService::refine(self, Some(current)).await?)
    }
}
