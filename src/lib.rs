//! Shared book catalog kept in one flat text file, with loan and return rules
//! applied under a single repository lock.

pub mod books;
pub mod core;
pub mod lending;
pub mod utils;
