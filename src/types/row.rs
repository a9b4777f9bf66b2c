use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{RowId, error::DatabaseError};

pub const COLUMN_USERNAME_SIZE: usize = 32;
pub const COLUMN_EMAIL_SIZE: usize = 255;

// Reserved widths include one byte of mandatory zero padding
pub const ID_SIZE: usize = size_of::<RowId>();
pub const USERNAME_SIZE: usize = COLUMN_USERNAME_SIZE + 1;
pub const EMAIL_SIZE: usize = COLUMN_EMAIL_SIZE + 1;

pub const ID_OFFSET: usize = 0;
pub const USERNAME_OFFSET: usize = ID_OFFSET + ID_SIZE;
pub const EMAIL_OFFSET: usize = USERNAME_OFFSET + USERNAME_SIZE;
pub const ROW_SIZE: usize = ID_SIZE + USERNAME_SIZE + EMAIL_SIZE;

/*
 * Row layout on disk (fixed offsets, no delimiters)
 * ┌──────────┬──────────────────────┬──────────────────────┐
 * │ id (4)   │ username (33)        │ email (256)          │
 * │ u32 LE   │ text, zero padded    │ text, zero padded    │
 * └──────────┴──────────────────────┴──────────────────────┘
 * Total: 293 bytes. Content shorter than the reserved width is
 * padded with zero bytes; longer content never reaches this layer.
 */

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    pub id: RowId,
    pub username: String,
    pub email: String,
}

impl Row {
    /// Builds a row, rejecting field content longer than the reserved bounds.
    pub fn new(id: RowId, username: &str, email: &str) -> Result<Self, DatabaseError> {
        if username.len() > COLUMN_USERNAME_SIZE {
            return Err(DatabaseError::ValueTooLong {
                column: "username",
                max: COLUMN_USERNAME_SIZE,
                actual: username.len(),
            });
        }
        if email.len() > COLUMN_EMAIL_SIZE {
            return Err(DatabaseError::ValueTooLong {
                column: "email",
                max: COLUMN_EMAIL_SIZE,
                actual: email.len(),
            });
        }
        Ok(Self {
            id,
            username: username.to_string(),
            email: email.to_string(),
        })
    }

    /// Writes the row into the first `ROW_SIZE` bytes of `buffer`.
    /// No allocation, no side effects beyond the byte write.
    pub fn serialize_into(&self, buffer: &mut [u8]) {
        assert!(
            buffer.len() >= ROW_SIZE,
            "buffer too small for row: {} bytes",
            buffer.len()
        );
        buffer[ID_OFFSET..ID_OFFSET + ID_SIZE].copy_from_slice(&self.id.to_le_bytes());
        write_padded_text(
            &mut buffer[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE],
            &self.username,
        );
        write_padded_text(&mut buffer[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE], &self.email);
    }

    /// Reconstructs a row from the first `ROW_SIZE` bytes of `buffer`.
    pub fn deserialize_from(buffer: &[u8]) -> Self {
        assert!(
            buffer.len() >= ROW_SIZE,
            "buffer too small for row: {} bytes",
            buffer.len()
        );
        let id = RowId::from_le_bytes([
            buffer[ID_OFFSET],
            buffer[ID_OFFSET + 1],
            buffer[ID_OFFSET + 2],
            buffer[ID_OFFSET + 3],
        ]);
        let username = read_padded_text(&buffer[USERNAME_OFFSET..USERNAME_OFFSET + USERNAME_SIZE]);
        let email = read_padded_text(&buffer[EMAIL_OFFSET..EMAIL_OFFSET + EMAIL_SIZE]);
        Self { id, username, email }
    }
}

impl fmt::Display for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.id, self.username, self.email)
    }
}

fn write_padded_text(region: &mut [u8], text: &str) {
    let bytes = text.as_bytes();
    region[..bytes.len()].copy_from_slice(bytes);
    region[bytes.len()..].fill(0);
}

fn read_padded_text(region: &[u8]) -> String {
    let end = region.iter().position(|&b| b == 0).unwrap_or(region.len());
    String::from_utf8_lossy(&region[..end]).into_owned()
}
