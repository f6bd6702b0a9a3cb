use crate::books::domain::{is_valid_isbn, Book};
use crate::core::domain::Identifiable;

// characters the record line format cannot carry in a text field
const RESERVED_CHARS: [char; 3] = ['|', '\n', '\r'];

// BookEntity is one catalog record: a title the library owns total_copies of,
// borrowed_copies of which are currently on loan. Fields are only set through
// new, lend and take_back, so 0 <= borrowed_copies <= total_copies always holds.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BookEntity {
    isbn: String,
    title: String,
    author: String,
    total_copies: u32,
    borrowed_copies: u32,
}

impl BookEntity {
    // new checks every field invariant and reports the first violation.
    // Title and author are stored trimmed.
    pub fn new(isbn: &str, title: &str, author: &str,
               total_copies: u32, borrowed_copies: u32) -> Result<Self, String> {
        if !is_valid_isbn(isbn) {
            return Err(format!("isbn {:?} is not 13 digits", isbn));
        }
        let title = text_field("title", title)?;
        let author = text_field("author", author)?;
        if borrowed_copies > total_copies {
            return Err(format!("borrowed {} exceeds total {}", borrowed_copies, total_copies));
        }
        Ok(Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            total_copies,
            borrowed_copies,
        })
    }

    pub fn available(&self) -> u32 {
        Book::available(self)
    }

    // lend moves one copy out; refused at the total_copies ceiling.
    pub fn lend(&mut self) -> bool {
        if self.borrowed_copies < self.total_copies {
            self.borrowed_copies += 1;
            true
        } else {
            false
        }
    }

    // take_back moves one copy in; refused at the zero floor.
    pub fn take_back(&mut self) -> bool {
        if self.borrowed_copies > 0 {
            self.borrowed_copies -= 1;
            true
        } else {
            false
        }
    }
}

fn text_field<'a>(name: &str, value: &'a str) -> Result<&'a str, String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(format!("{} is empty", name));
    }
    if value.contains(RESERVED_CHARS) {
        return Err(format!("{} {:?} contains a field separator or line break", name, value));
    }
    Ok(value)
}

impl Identifiable for BookEntity {
    fn id(&self) -> String {
        self.isbn.to_string()
    }
}

impl Book for BookEntity {
    fn isbn(&self) -> &str {
        self.isbn.as_str()
    }

    fn title(&self) -> &str {
        self.title.as_str()
    }

    fn author(&self) -> &str {
        self.author.as_str()
    }

    fn total_copies(&self) -> u32 {
        self.total_copies
    }

    fn borrowed_copies(&self) -> u32 {
        self.borrowed_copies
    }
}
