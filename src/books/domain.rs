use crate::core::domain::Identifiable;
use crate::core::library::{LibraryError, LibraryResult};

pub mod catalog;
pub mod model;

pub const ISBN_LEN: usize = 13;

// Book is the read side of a catalog record; counts only change through the entity.
pub trait Book: Identifiable {
    fn isbn(&self) -> &str;
    fn title(&self) -> &str;
    fn author(&self) -> &str;
    fn total_copies(&self) -> u32;
    fn borrowed_copies(&self) -> u32;

    // available is derived, never stored
    fn available(&self) -> u32 {
        self.total_copies() - self.borrowed_copies()
    }
}

pub fn is_valid_isbn(isbn: &str) -> bool {
    isbn.len() == ISBN_LEN && isbn.bytes().all(|b| b.is_ascii_digit())
}

// validate_isbn trims caller input and returns the normalized isbn.
pub fn validate_isbn(isbn: &str) -> LibraryResult<&str> {
    let isbn = isbn.trim();
    if is_valid_isbn(isbn) {
        Ok(isbn)
    } else {
        Err(LibraryError::invalid_argument(
            format!("isbn {:?} must be exactly {} digits", isbn, ISBN_LEN).as_str()))
    }
}

pub fn validate_title(title: &str) -> LibraryResult<&str> {
    let title = title.trim();
    if title.is_empty() {
        Err(LibraryError::invalid_argument("title must not be empty"))
    } else {
        Ok(title)
    }
}
