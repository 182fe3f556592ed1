use std::sync::Arc;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};
use ideaswipe_core::Idea;
use serde::Deserialize;
use serde_json::Value;
use tracing::{error, info};

use crate::{error::ApiError, state::AppState};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RefineRequest {
    #[serde(default)]
    current_idea: Option<Value>,
}

pub async fn generate_idea(State(state): State<Arc<AppState>>) -> Result<Json<Idea>, ApiError> {
    info!("Generating idea");
    let idea = state.ideas.generate().await.map_err(|e| {
        error!("Error generating idea: {e}");
        ApiError::Generate(e)
    })?;
    Ok(Json(idea))
}

pub async fn refine_idea(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<Idea>, ApiError> {
    let current = current_idea(&body);
    info!("Refining idea {:?}", current.as_ref().and_then(|i| i.name.as_deref()));
    let idea = state.ideas.refine(current.as_ref()).await.map_err(|e| {
        error!("Error refining idea: {e}");
        ApiError::Refine(e)
    })?;
    Ok(Json(idea))
}

/// `currentIdea` from the request body; `None` for an empty or malformed body,
/// a missing or null field, or anything that is not an object.
fn current_idea(body: &[u8]) -> Option<Idea> {
    let request: RefineRequest = serde_json::from_slice(body).ok()?;
    Idea::from_json(&request.current_idea?)
}

pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> ApiError {
    ApiError::MethodNotAllowed
}
