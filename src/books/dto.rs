use serde::{Deserialize, Serialize};
use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;
use crate::core::domain::Identifiable;

// BookDto is the query payload: the stored fields plus the computed available count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDto {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub total_copies: u32,
    pub borrowed_copies: u32,
    pub available: u32,
}

impl From<&BookEntity> for BookDto {
    fn from(other: &BookEntity) -> Self {
        Self {
            isbn: other.id(),
            title: other.title().to_string(),
            author: other.author().to_string(),
            total_copies: other.total_copies(),
            borrowed_copies: other.borrowed_copies(),
            available: Book::available(other),
        }
    }
}
