use std::fs::File;
use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use thiserror::Error;
use tracing::info;

pub mod columns;

use crate::model::table::Table;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Csv(#[from] csv::Error),
    #[error("no columns to parse from file")]
    Empty,
}

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

pub fn read_catalogue(bytes: &[u8]) -> Result<Table, InputError> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let table = Table::from_csv(bytes)?;
    if table.columns.iter().all(String::is_empty) {
        return Err(InputError::Empty);
    }
    Ok(table)
}

pub fn read_maybe_gz(path: &Path) -> Result<Vec<u8>, InputError> {
    let mut file = File::open(path)?;
    let mut out = Vec::new();
    if path.extension().is_some_and(|ext| ext == "gz") {
        GzDecoder::new(file).read_to_end(&mut out)?;
    } else {
        file.read_to_end(&mut out)?;
    }
    info!(
        "read {} bytes of catalogue data from {}",
        out.len(),
        path.display()
    );
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
