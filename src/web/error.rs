use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::warn;

use crate::services::activities_service::RegistryError;

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl RegistryError {
    pub fn status(&self) -> StatusCode {
        match self {
            RegistryError::ActivityNotFound => StatusCode::NOT_FOUND,
            RegistryError::AlreadyRegistered | RegistryError::NotRegistered => {
                StatusCode::BAD_REQUEST
            }
            RegistryError::InvalidEmail | RegistryError::InvalidQuery => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            RegistryError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RegistryError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            RegistryError::Database(e) => {
                warn!(error = %e, "activity registry query failed");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { detail })).into_response()
    }
}
