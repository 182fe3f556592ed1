use std::sync::Arc;

use ideaswipe_suggest::{IdeaError, IdeaService};
use tracing::warn;

use super::config::Config;

pub struct AppState {
    pub config: Config,
    pub ideas: IdeaService,
}

impl AppState {
    pub fn new(config: Config) -> Result<Arc<Self>, IdeaError> {
        if !ideaswipe_core::ai_configured(&config.ai) {
            warn!(
                "No API key configured for {}; requests will fail until one is set",
                config.ai.provider
            );
        }
        let ideas = IdeaService::from_settings(config.ai.clone())?;
        Ok(Self::with_service(config, ideas))
    }

    pub fn with_service(config: Config, ideas: IdeaService) -> Arc<Self> {
        Arc::new(Self { config, ideas })
    }
}
