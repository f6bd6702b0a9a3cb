use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;
use crate::lending::dto::ReturnDto;

pub struct ReturnBookCommand {
    lending_service: Box<dyn LendingService>,
}

impl ReturnBookCommand {
    pub fn new(lending_service: Box<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ReturnBookCommandRequest {
    pub isbn: String,
}

impl ReturnBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub returned: ReturnDto,
}

impl ReturnBookCommandResponse {
    pub fn new(returned: ReturnDto) -> Self {
        Self {
            returned,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        self.lending_service.return_by_isbn(req.isbn.as_str())
            .await.map_err(CommandError::from).map(ReturnBookCommandResponse::new)
    }
}
