use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::utils::date::serializer;

// LoanDto is the outcome of a successful loan.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct LoanDto {
    pub isbn: String,
    pub title: String,
    #[serde(with = "serializer")]
    pub due_date: NaiveDate,
    pub available_after: u32,
}

impl LoanDto {
    pub fn new(book: &BookEntity, due_date: NaiveDate) -> Self {
        Self {
            isbn: book.isbn().to_string(),
            title: book.title().to_string(),
            due_date,
            available_after: book.available(),
        }
    }
}

// ReturnDto is the outcome of a successful return.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct ReturnDto {
    pub isbn: String,
    pub title: String,
    pub available_after: u32,
}

impl From<&BookEntity> for ReturnDto {
    fn from(book: &BookEntity) -> Self {
        Self {
            isbn: book.isbn().to_string(),
            title: book.title().to_string(),
            available_after: book.available(),
        }
    }
}
