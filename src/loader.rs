use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use thiserror::Error;
use tracing::info;

use crate::types::{REQUIRED_COLUMNS, RawRecord, Table};

/// Errors surfaced while reading a measurements file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("the file '{}' was not found", path.display())]
    NotFound { path: PathBuf },
    #[error("failed to open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Reads the measurements CSV at `path` into a table, preserving row order.
pub fn load_table(path: impl AsRef<Path>) -> Result<Table, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let table = read_table(file)?;
    info!(path = %path.display(), rows = table.len(), "loaded measurements");
    Ok(table)
}

/// Parses CSV data with a header row. Columns beyond the required ones are ignored.
pub fn read_table<R: Read>(reader: R) -> Result<Table, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?;
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|header| header == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    reader
        .deserialize::<RawRecord>()
        .map(|row| row.map_err(LoadError::from))
        .collect()
}
