use async_trait::async_trait;
use crate::books::domain::{validate_isbn, validate_title};
use crate::books::dto::BookDto;
use crate::core::library::{LibraryError, LibraryResult};
use crate::lending::dto::{LoanDto, ReturnDto};

pub mod service;

// LendingService applies the loan rules on top of the catalog repository. It never
// touches the backing store itself; every call is one repository critical section.
#[async_trait]
pub trait LendingService: Sync + Send {
    async fn query(&self, isbn: &str) -> LibraryResult<BookDto>;
    async fn loan_by_isbn(&self, isbn: &str) -> LibraryResult<LoanDto>;
    async fn loan_by_title(&self, title: &str) -> LibraryResult<LoanDto>;
    async fn return_by_isbn(&self, isbn: &str) -> LibraryResult<ReturnDto>;
}

// LoanBy is how a caller names the book to lend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoanBy {
    Isbn(String),
    Title(String),
}

impl LoanBy {
    // from_request accepts exactly one of isbn or title, already validated.
    pub fn from_request(isbn: Option<&str>, title: Option<&str>) -> LibraryResult<LoanBy> {
        match (isbn, title) {
            (Some(isbn), None) => Ok(LoanBy::Isbn(validate_isbn(isbn)?.to_string())),
            (None, Some(title)) => Ok(LoanBy::Title(validate_title(title)?.to_string())),
            (Some(_), Some(_)) => Err(LibraryError::invalid_argument("give either isbn or title, not both")),
            (None, None) => Err(LibraryError::invalid_argument("isbn or title is required")),
        }
    }

    pub fn key(&self) -> &str {
        match self {
            LoanBy::Isbn(isbn) => isbn.as_str(),
            LoanBy::Title(title) => title.as_str(),
        }
    }
}
