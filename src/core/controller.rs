use std::sync::Arc;
use axum::http::StatusCode;
use crate::core::command::{CommandError, StatusKind};
use crate::core::domain::Configuration;
use crate::core::repository::CatalogRepository;

// AppState is shared by every handler; all of them go through the same repository
// so the single catalog lock covers every request.
#[derive(Clone)]
pub struct AppState {
    pub config: Configuration,
    pub repository: Arc<CatalogRepository>,
}

impl AppState {
    pub fn new(config: Configuration, repository: Arc<CatalogRepository>) -> AppState {
        AppState {
            config,
            repository,
        }
    }
}

pub type ServerError = (StatusCode, String);

pub fn json_to_server_error(err: serde_json::Error) -> ServerError {
    ServerError::from(CommandError::from(err))
}

pub fn status_code(kind: StatusKind) -> StatusCode {
    match kind {
        StatusKind::InvalidArgument => StatusCode::BAD_REQUEST,
        StatusKind::NotFound => StatusCode::NOT_FOUND,
        StatusKind::FailedPrecondition => StatusCode::CONFLICT,
        StatusKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<CommandError> for ServerError {
    fn from(err: CommandError) -> Self {
        (status_code(err.status_kind()), err.to_string())
    }
}
