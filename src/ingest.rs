//! Line-delimited JSON ingestion.
//!
//! One record per line, `\n` or `\r\n` terminated. Blank lines are
//! skipped; any other line that fails to parse, invalid UTF-8 included,
//! aborts the whole read with its file and 1-based line number.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::{Error, Result};

/// Read every record in a `.jsonl` file.
pub fn read_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = File::open(path).map_err(|source| Error::ReadInput {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse_records(BufReader::new(file), path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "read records");
    Ok(records)
}

/// Parse records from any buffered reader. `origin` only labels errors.
pub fn parse_records<T, R>(reader: R, origin: &Path) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    R: BufRead,
{
    let mut records = Vec::new();
    // Split on raw bytes so invalid UTF-8 surfaces as a parse error on its line.
    for (index, bytes) in reader.split(b'\n').enumerate() {
        let bytes = bytes.map_err(|source| Error::ReadInput {
            path: origin.to_path_buf(),
            source,
        })?;
        let line = bytes.strip_suffix(b"\r").unwrap_or(&bytes);
        if line.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        let record = serde_json::from_slice(line).map_err(|source| Error::MalformedInput {
            path: origin.to_path_buf(),
            line: index + 1,
            source,
        })?;
        records.push(record);
    }
    Ok(records)
}
