use crate::{
    storage::table::Table,
    types::{error::DatabaseError, row::Row},
};

/// Trait for inserting rows into a table.
pub trait Inserter {
    /// Insert a single row at the end of the table.
    fn insert(&mut self, row: &Row) -> Result<(), DatabaseError>;

    /// Insert rows until the slice is exhausted or the table fills up.
    /// Returns how many rows made it in.
    fn insert_batch(&mut self, rows: &[Row]) -> Result<usize, DatabaseError>;
}

pub struct TableInserter<'a> {
    table: &'a mut Table,
}

impl<'a> TableInserter<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        Self { table }
    }
}

impl Inserter for TableInserter<'_> {
    fn insert(&mut self, row: &Row) -> Result<(), DatabaseError> {
        self.table.append(row)
    }

    fn insert_batch(&mut self, rows: &[Row]) -> Result<usize, DatabaseError> {
        for (index, row) in rows.iter().enumerate() {
            match self.table.append(row) {
                Ok(()) => {}
                Err(DatabaseError::TableFull { .. }) => return Ok(index),
                Err(e) => return Err(e),
            }
        }
        Ok(rows.len())
    }
}
