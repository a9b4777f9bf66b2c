use crate::{
    storage::table::Table,
    types::{error::DatabaseError, row::Row},
};

/// Pull-based row scan in insertion order.
pub trait Scanner {
    fn scan(&mut self) -> Result<Option<Row>, DatabaseError>;
    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<Row>, DatabaseError>;
    fn reset(&mut self);
}

/// Full-table scanner: walks row indices `0..num_rows`, decoding each row
/// from its computed page slot. Reads only; safe to run repeatedly.
pub struct TableScanner<'a> {
    table: &'a mut Table,
    next_row_index: usize,
}

impl<'a> TableScanner<'a> {
    pub fn new(table: &'a mut Table) -> Self {
        Self {
            table,
            next_row_index: 0,
        }
    }
}

impl Scanner for TableScanner<'_> {
    fn scan(&mut self) -> Result<Option<Row>, DatabaseError> {
        if self.next_row_index >= self.table.num_rows() {
            return Ok(None);
        }
        let row = self.table.row_at(self.next_row_index)?;
        self.next_row_index += 1;
        Ok(Some(row))
    }

    fn scan_batch(&mut self, batch_size: usize) -> Result<Vec<Row>, DatabaseError> {
        let mut rows = Vec::with_capacity(batch_size);
        for _ in 0..batch_size {
            match self.scan()? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }

    fn reset(&mut self) {
        self.next_row_index = 0;
    }
}

pub struct ScanIterator<S: Scanner> {
    scanner: S,
}

impl<S: Scanner> ScanIterator<S> {
    pub fn new(scanner: S) -> Self {
        Self { scanner }
    }
}

impl<S: Scanner> Iterator for ScanIterator<S> {
    type Item = Result<Row, DatabaseError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.scanner.scan() {
            Ok(Some(row)) => Some(Ok(row)),
            Ok(None) => None,
            Err(e) => Some(Err(e)),
        }
    }
}
