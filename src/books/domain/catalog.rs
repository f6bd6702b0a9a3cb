use crate::books::domain::Book;
use crate::books::domain::model::BookEntity;

// Catalog keeps records in backing-store order so a save re-serializes
// deterministically. No two records share an isbn.
#[derive(Debug, Default, PartialEq, Eq, Clone)]
pub struct Catalog {
    books: Vec<BookEntity>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    // push appends a record unless its isbn is already present.
    pub fn push(&mut self, book: BookEntity) -> bool {
        if self.find_by_isbn(book.isbn()).is_some() {
            return false;
        }
        self.books.push(book);
        true
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item=&BookEntity> {
        self.books.iter()
    }

    pub fn find_by_isbn(&self, isbn: &str) -> Option<&BookEntity> {
        self.books.iter().find(|b| b.isbn() == isbn)
    }

    pub fn find_by_isbn_mut(&mut self, isbn: &str) -> Option<&mut BookEntity> {
        self.books.iter_mut().find(|b| b.isbn() == isbn)
    }

    // exact, case-sensitive; duplicate titles resolve to the first in order
    pub fn find_by_title(&self, title: &str) -> Option<&BookEntity> {
        self.books.iter().find(|b| b.title() == title)
    }

    pub fn find_by_title_mut(&mut self, title: &str) -> Option<&mut BookEntity> {
        self.books.iter_mut().find(|b| b.title() == title)
    }
}
