use std::path::Path;

use crate::{
    executor::scan::TableScanner,
    storage::pager::Pager,
    types::{
        PAGE_SIZE, PageIndex, ROWS_PER_PAGE, TABLE_MAX_PAGES,
        error::{DatabaseError, Result},
        row::{ROW_SIZE, Row},
    },
};

/// Append-only array of rows layered over the page cache. Row addresses are
/// pure arithmetic over the insertion index; there is no index structure.
pub struct Table {
    pager: Pager,
    num_rows: usize,
    max_rows: usize,
}

impl Table {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_max_pages(path, TABLE_MAX_PAGES)
    }

    /// Opens the table with an explicit page-count ceiling.
    pub fn open_with_max_pages<P: AsRef<Path>>(path: P, max_pages: usize) -> Result<Self> {
        let pager = Pager::open(path, max_pages)?;
        let num_rows = row_count_from_file_length(pager.file_length());
        Ok(Self {
            pager,
            num_rows,
            max_rows: max_pages * ROWS_PER_PAGE,
        })
    }

    pub fn num_rows(&self) -> usize {
        self.num_rows
    }

    pub fn max_rows(&self) -> usize {
        self.max_rows
    }

    pub fn is_full(&self) -> bool {
        self.num_rows >= self.max_rows
    }

    /// Appends a row at the next free slot. Fails with `TableFull` at the
    /// capacity ceiling, leaving the row count unchanged.
    pub fn append(&mut self, row: &Row) -> Result<()> {
        if self.is_full() {
            return Err(DatabaseError::TableFull {
                max_rows: self.max_rows,
            });
        }
        let (page_index, byte_offset) = row_slot(self.num_rows);
        let page = self.pager.get_page(page_index)?;
        row.serialize_into(&mut page[byte_offset..byte_offset + ROW_SIZE]);
        self.num_rows += 1;
        Ok(())
    }

    pub(crate) fn row_at(&mut self, row_index: usize) -> Result<Row> {
        debug_assert!(row_index < self.num_rows);
        let (page_index, byte_offset) = row_slot(row_index);
        let page = self.pager.get_page(page_index)?;
        Ok(Row::deserialize_from(&page[byte_offset..byte_offset + ROW_SIZE]))
    }

    /// Creates a scanner positioned at the first row.
    pub fn create_scanner(&mut self) -> TableScanner<'_> {
        TableScanner::new(self)
    }

    /// Flushes all resident pages and closes the backing file. Consumes the
    /// table; no operation is possible afterwards.
    pub fn close(mut self) -> Result<()> {
        self.pager.close(self.num_rows)
    }
}

fn row_slot(row_index: usize) -> (PageIndex, usize) {
    let page_index = row_index / ROWS_PER_PAGE;
    let byte_offset = (row_index % ROWS_PER_PAGE) * ROW_SIZE;
    (page_index, byte_offset)
}

/// Derives the row count of an existing file from its length alone. Whole
/// pages are written at full page size on close, so the count is computed
/// per page; a trailing partial row (from an interrupted write) is dropped.
fn row_count_from_file_length(file_length: u64) -> usize {
    let full_pages = (file_length / PAGE_SIZE as u64) as usize;
    let trailing_bytes = (file_length % PAGE_SIZE as u64) as usize;
    full_pages * ROWS_PER_PAGE + trailing_bytes / ROW_SIZE
}
