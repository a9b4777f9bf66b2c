use std::{
    collections::{HashMap, hash_map::Entry},
    fs::{File, OpenOptions},
    io::{self, Read, Seek, SeekFrom, Write},
    path::Path,
};

use crate::types::{
    PAGE_SIZE, PageIndex, ROWS_PER_PAGE,
    error::{DatabaseError, Result},
    row::ROW_SIZE,
};

/// Page cache over a single backing file. Pages are loaded lazily on first
/// access and held until `close`, which writes every resident page back.
/// There is no eviction: the page count is bounded by `max_pages` and
/// exceeding it is an error, not a cache miss.
pub struct Pager {
    file: File,
    file_length: u64,
    max_pages: usize,
    pages: HashMap<PageIndex, Box<[u8; PAGE_SIZE]>>,
}

impl Pager {
    /// Opens the backing file (creating it if absent) and records its length.
    pub fn open<P: AsRef<Path>>(path: P, max_pages: usize) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(path)?;
        let file_length = file.metadata()?.len();
        Ok(Self {
            file,
            file_length,
            max_pages,
            pages: HashMap::new(),
        })
    }

    pub fn file_length(&self) -> u64 {
        self.file_length
    }

    pub fn max_pages(&self) -> usize {
        self.max_pages
    }

    pub fn is_resident(&self, page_index: PageIndex) -> bool {
        self.pages.contains_key(&page_index)
    }

    /// Returns the in-memory buffer for `page_index`, reading it from disk
    /// on first touch. Pages past the on-disk extent come back zeroed.
    pub fn get_page(&mut self, page_index: PageIndex) -> Result<&mut [u8; PAGE_SIZE]> {
        if page_index >= self.max_pages {
            return Err(DatabaseError::PageIndexOutOfBounds {
                page_index,
                max_pages: self.max_pages,
            });
        }
        // A trailing partial page still counts as existing on disk
        let pages_on_disk = self.file_length.div_ceil(PAGE_SIZE as u64) as usize;
        let page = match self.pages.entry(page_index) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let mut buffer = Box::new([0u8; PAGE_SIZE]);
                if page_index < pages_on_disk {
                    self.file
                        .seek(SeekFrom::Start((page_index * PAGE_SIZE) as u64))?;
                    read_full_page(&mut self.file, &mut buffer[..])?;
                }
                entry.insert(buffer)
            }
        };
        Ok(&mut **page)
    }

    /// Writes `byte_count` bytes of the resident page at `page_index` back
    /// to the file. The partial count is used for the trailing page only.
    pub fn flush(&mut self, page_index: PageIndex, byte_count: usize) -> Result<()> {
        let page = self
            .pages
            .get(&page_index)
            .ok_or(DatabaseError::PageNotResident { page_index })?;
        self.file
            .seek(SeekFrom::Start((page_index * PAGE_SIZE) as u64))?;
        self.file.write_all(&page[..byte_count])?;
        Ok(())
    }

    /// Flushes every resident page covered by `num_rows` and releases all
    /// buffers. Fully occupied pages are written whole; the trailing
    /// partially occupied page is written up to its last row.
    pub fn close(&mut self, num_rows: usize) -> Result<()> {
        let full_pages = num_rows / ROWS_PER_PAGE;
        for page_index in 0..full_pages {
            if !self.is_resident(page_index) {
                continue;
            }
            self.flush(page_index, PAGE_SIZE)?;
            self.pages.remove(&page_index);
        }

        let trailing_rows = num_rows % ROWS_PER_PAGE;
        if trailing_rows > 0 && self.is_resident(full_pages) {
            self.flush(full_pages, trailing_rows * ROW_SIZE)?;
            self.pages.remove(&full_pages);
        }

        // Anything still resident was allocated but never covered by a row;
        // release it without writing.
        self.pages.clear();

        self.file.sync_all()?;
        Ok(())
    }
}

/// Reads up to one page; a short read at end of file leaves the rest of the
/// buffer zeroed.
fn read_full_page(file: &mut File, buffer: &mut [u8]) -> io::Result<()> {
    let mut filled = 0;
    while filled < buffer.len() {
        match file.read(&mut buffer[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(())
}
