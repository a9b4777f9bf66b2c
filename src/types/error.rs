use thiserror::Error;

use crate::types::PageIndex;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Table is full ({max_rows} rows)")]
    TableFull { max_rows: usize },

    #[error("Page index {page_index} out of bounds (max: {max_pages})")]
    PageIndexOutOfBounds {
        page_index: PageIndex,
        max_pages: usize,
    },

    #[error("Page {page_index} is not resident, cannot flush")]
    PageNotResident { page_index: PageIndex },

    #[error("Value for '{column}' is too long: {actual} bytes (max: {max})")]
    ValueTooLong {
        column: &'static str,
        max: usize,
        actual: usize,
    },
}

pub type Result<T> = std::result::Result<T, DatabaseError>;
