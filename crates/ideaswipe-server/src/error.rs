use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use ideaswipe_suggest::IdeaError;
use serde_json::json;
use thiserror::Error;

const GENERATE_DETAILS: &str = "Check server logs for more information";

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error(transparent)]
    Generate(IdeaError),

    #[error(transparent)]
    Refine(IdeaError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Generate(IdeaError::InvalidInput) | ApiError::Refine(IdeaError::InvalidInput) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Generate(_) | ApiError::Refine(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            ApiError::Generate(e) if status.is_server_error() => json!({
                "error": e.to_string(),
                "details": GENERATE_DETAILS,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
