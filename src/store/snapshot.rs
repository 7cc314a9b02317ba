//! Byte layout of a stored account.
//!
//! ```text
//! magic "ACCT" | version u8 | field count u8
//! holder name    u32 len + utf-8
//! account number u32 len + utf-8
//! account type   i32
//! balance        16 bytes (Decimal::serialize)
//! ```
//!
//! Integers are little-endian, independent of the host platform.

use std::io::{self, Write};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::account::AccountSnapshot;

pub const MAGIC: [u8; 4] = *b"ACCT";
pub const VERSION: u8 = 1;
pub const FIELD_COUNT: u8 = 4;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("Snapshot ended before all fields were read")]
    Truncated,
    #[error("Snapshot does not start with the expected magic bytes")]
    BadMagic,
    #[error("Unsupported snapshot version {0}")]
    UnsupportedVersion(u8),
    #[error("Expected {FIELD_COUNT} fields, snapshot declares {0}")]
    FieldCount(u8),
    #[error("Text field is not valid UTF-8")]
    InvalidUtf8,
    #[error("{0} unexpected bytes after the last field")]
    TrailingBytes(usize),
}

pub fn encode<W: Write>(snapshot: &AccountSnapshot, writer: &mut W) -> io::Result<()> {
    writer.write_all(&MAGIC)?;
    writer.write_all(&[VERSION, FIELD_COUNT])?;
    write_text(writer, &snapshot.holder_name)?;
    write_text(writer, &snapshot.account_number)?;
    writer.write_all(&snapshot.account_type.to_le_bytes())?;
    writer.write_all(&snapshot.balance.serialize())
}

/// Encodes into a fresh buffer. Fails without returning partial bytes when a
/// text field does not fit its `u32` length prefix.
pub fn to_bytes(snapshot: &AccountSnapshot) -> io::Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode(snapshot, &mut buf)?;
    Ok(buf)
}

pub fn decode(bytes: &[u8]) -> Result<AccountSnapshot, SnapshotError> {
    let mut reader = Reader { rest: bytes };

    if reader.take_array::<4>()? != MAGIC {
        return Err(SnapshotError::BadMagic);
    }
    let [version, field_count] = reader.take_array::<2>()?;
    if version != VERSION {
        return Err(SnapshotError::UnsupportedVersion(version));
    }
    if field_count != FIELD_COUNT {
        return Err(SnapshotError::FieldCount(field_count));
    }

    let holder_name = reader.take_text()?;
    let account_number = reader.take_text()?;
    let account_type = i32::from_le_bytes(reader.take_array()?);
    let balance = Decimal::deserialize(reader.take_array()?);

    if !reader.rest.is_empty() {
        return Err(SnapshotError::TrailingBytes(reader.rest.len()));
    }

    Ok(AccountSnapshot {
        holder_name,
        account_number,
        account_type,
        balance,
    })
}

fn write_text<W: Write>(writer: &mut W, text: &str) -> io::Result<()> {
    write_len(writer, text.len())?;
    writer.write_all(text.as_bytes())
}

fn write_len<W: Write>(writer: &mut W, len: usize) -> io::Result<()> {
    let len = u32::try_from(len)
        .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "text field too long"))?;
    writer.write_all(&len.to_le_bytes())
}

struct Reader<'a> {
    rest: &'a [u8],
}

impl<'a> Reader<'a> {
    fn take(&mut self, len: usize) -> Result<&'a [u8], SnapshotError> {
        if self.rest.len() < len {
            return Err(SnapshotError::Truncated);
        }
        let (head, tail) = self.rest.split_at(len);
        self.rest = tail;
        Ok(head)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N], SnapshotError> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        Ok(out)
    }

    fn take_text(&mut self) -> Result<String, SnapshotError> {
        let len = u32::from_le_bytes(self.take_array()?) as usize;
        let bytes = self.take(len)?;
        String::from_utf8(bytes.to_vec()).map_err(|_| SnapshotError::InvalidUtf8)
    }
}
