pub mod loan_book_cmd;
pub mod query_book_cmd;
pub mod return_book_cmd;
