use std::fs::{self, File};
use std::io::ErrorKind;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tempfile::NamedTempFile;
use tracing::debug;

use super::StoreError;

/// A row parsed from a table, tagged with the line it started on.
pub(crate) struct Row<T> {
    pub line: u64,
    pub value: T,
}

/// Read every row of a CSV table with a header line.
/// A missing file reads as an empty table.
pub(crate) fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<Row<T>>, StoreError> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "table not found, starting empty");
            return Ok(Vec::new());
        }
        Err(source) => {
            return Err(StoreError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut reader = csv::Reader::from_reader(file);
    let headers = reader
        .headers()
        .map_err(|source| classify(path, source))?
        .clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| classify(path, source))?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();
        let value = record
            .deserialize(Some(&headers))
            .map_err(|source| classify(path, source))?;
        rows.push(Row { line, value });
    }

    debug!(path = %path.display(), rows = rows.len(), "table loaded");
    Ok(rows)
}

/// Replace a CSV table with `header` followed by `rows`.
///
/// Rows go to a temporary file next to the target, which is renamed over
/// the target once fully written. Readers see either the old table or the
/// new one. The parent directory is created if missing.
pub(crate) fn write_table<T, I>(path: &Path, header: &[&str], rows: I) -> Result<usize, StoreError>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let io_err = |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    };
    let csv_err = |source| StoreError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let mut temp = NamedTempFile::new_in(dir).map_err(io_err)?;
    let mut count = 0;
    {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(temp.as_file_mut());
        writer.write_record(header).map_err(csv_err)?;
        for row in rows {
            writer.serialize(row).map_err(csv_err)?;
            count += 1;
        }
        writer.flush().map_err(io_err)?;
    }
    temp.as_file_mut().sync_all().map_err(io_err)?;

    temp.persist(path).map_err(|e| StoreError::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    debug!(path = %path.display(), rows = count, "table written");
    Ok(count)
}

/// I/O failures stay I/O failures; anything else means the file content is bad.
fn classify(path: &Path, source: csv::Error) -> StoreError {
    if source.is_io_error() {
        return StoreError::Csv {
            path: path.to_path_buf(),
            source,
        };
    }

    let line = source.position().map(|p| p.line()).unwrap_or_default();
    let reason = match source.kind() {
        csv::ErrorKind::Deserialize { err, .. } => err.to_string(),
        _ => source.to_string(),
    };
    StoreError::MalformedRow {
        path: path.to_path_buf(),
        line,
        reason,
    }
}
