use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::core::command::{Command, CommandError};
use crate::lending::domain::{LendingService, LoanBy};
use crate::lending::dto::LoanDto;

pub struct LoanBookCommand {
    lending_service: Box<dyn LendingService>,
}

impl LoanBookCommand {
    pub fn new(lending_service: Box<dyn LendingService>) -> Self {
        Self {
            lending_service,
        }
    }
}

// exactly one of isbn or title must be set
#[derive(Debug, Default, Deserialize)]
pub struct LoanBookCommandRequest {
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl LoanBookCommandRequest {
    pub fn by_isbn(isbn: &str) -> Self {
        Self {
            isbn: Some(isbn.to_string()),
            title: None,
        }
    }

    pub fn by_title(title: &str) -> Self {
        Self {
            isbn: None,
            title: Some(title.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoanBookCommandResponse {
    pub loan: LoanDto,
}

impl LoanBookCommandResponse {
    pub fn new(loan: LoanDto) -> Self {
        Self {
            loan,
        }
    }
}

#[async_trait]
impl Command<LoanBookCommandRequest, LoanBookCommandResponse> for LoanBookCommand {
    async fn execute(&self, req: LoanBookCommandRequest) -> Result<LoanBookCommandResponse, CommandError> {
        let res = match LoanBy::from_request(req.isbn.as_deref(), req.title.as_deref())? {
            LoanBy::Isbn(isbn) => self.lending_service.loan_by_isbn(isbn.as_str()).await,
            LoanBy::Title(title) => self.lending_service.loan_by_title(title.as_str()).await,
        };
        res.map_err(CommandError::from).map(LoanBookCommandResponse::new)
    }
}
