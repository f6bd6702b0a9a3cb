use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::lending::domain::LendingService;

pub struct QueryBookCommand {
    lending_service: Box<dyn LendingService>,
}

impl QueryBookCommand {
    pub fn new(lending_service: Box<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct QueryBookCommandRequest {
    pub isbn: String,
}

impl QueryBookCommandRequest {
    pub fn new(isbn: &str) -> Self {
        Self {
            isbn: isbn.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct QueryBookCommandResponse {
    pub book: BookDto,
}

impl QueryBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<QueryBookCommandRequest, QueryBookCommandResponse> for QueryBookCommand {
    async fn execute(&self, req: QueryBookCommandRequest) -> Result<QueryBookCommandResponse, CommandError> {
        self.lending_service.query(req.isbn.as_str())
            .await.map_err(CommandError::from).map(QueryBookCommandResponse::new)
    }
}
