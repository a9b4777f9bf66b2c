use std::{
    fs,
    path::PathBuf,
    sync::atomic::{AtomicU64, Ordering},
    time::{SystemTime, UNIX_EPOCH},
};

use tempfile::env::temp_dir;

use crate::{
    storage::table::Table,
    types::{TABLE_MAX_PAGES, error::DatabaseError},
};

static NEXT_DB_ID: AtomicU64 = AtomicU64::new(0);

pub fn get_unix_timestamp_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis()
}

pub fn create_temp_db_path() -> PathBuf {
    create_temp_db_path_with_prefix("lumbung_test")
}

pub fn create_temp_db_path_with_prefix(prefix: &str) -> PathBuf {
    let mut temp_path = temp_dir();
    // Counter keeps paths unique when two fixtures land in the same millisecond
    temp_path.push(format!(
        "{}_{}_{}.db",
        prefix,
        get_unix_timestamp_millis(),
        NEXT_DB_ID.fetch_add(1, Ordering::Relaxed)
    ));
    temp_path
}

pub struct TempDatabase {
    pub path: PathBuf,
    pub table: Option<Table>,
}

impl TempDatabase {
    pub fn new() -> Self {
        Self {
            path: create_temp_db_path(),
            table: None,
        }
    }

    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            path: create_temp_db_path_with_prefix(prefix),
            table: None,
        }
    }

    pub fn open_table(&mut self) -> Result<&mut Table, Box<dyn std::error::Error>> {
        self.open_table_with_max_pages(TABLE_MAX_PAGES)
    }

    pub fn open_table_with_max_pages(
        &mut self,
        max_pages: usize,
    ) -> Result<&mut Table, Box<dyn std::error::Error>> {
        let table = Table::open_with_max_pages(&self.path, max_pages)?;
        self.table = Some(table);
        Ok(self.table.as_mut().unwrap())
    }

    pub fn get_table(&mut self) -> Option<&mut Table> {
        self.table.as_mut()
    }

    /// Closes the currently open table, flushing it to the backing file.
    pub fn close_table(&mut self) -> Result<(), DatabaseError> {
        if let Some(table) = self.table.take() {
            table.close()?;
        }
        Ok(())
    }
}

impl Default for TempDatabase {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TempDatabase {
    fn drop(&mut self) {
        self.table = None;
        if self.path.exists() {
            let _ = fs::remove_file(&self.path);
        }
    }
}
