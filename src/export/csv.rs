//! CSV export functionality

use serde::Serialize;
use std::fs::File;
use std::path::Path;

use crate::error::{AppError, Result};

/// Export records to a headerless CSV file, replacing any existing file.
///
/// Uses the `csv` crate defaults: `,` delimiter, quoting only when needed,
/// `\n` line terminator.
pub fn export_to_csv<T, P>(data: &[T], path: P) -> Result<usize>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    let file = File::create(path).map_err(|e| AppError::filesystem(path, e))?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    let mut count = 0;
    for item in data {
        writer.serialize(item).map_err(|e| csv_error(path, e))?;
        count += 1;
    }

    writer.flush().map_err(|e| AppError::filesystem(path, e))?;

    Ok(count)
}

fn csv_error(path: &Path, e: csv::Error) -> AppError {
    match e.into_kind() {
        csv::ErrorKind::Io(io) => AppError::filesystem(path, io),
        kind => AppError::Export(format!("CSV serialization error: {:?}", kind)),
    }
}
