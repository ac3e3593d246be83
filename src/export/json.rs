//! JSON export functionality

use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::{AppError, Result};

/// Export records to a compact JSON array, replacing any existing file
pub fn export_to_json_compact<T, P>(data: &[T], path: P) -> Result<usize>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let count = data.len();

    let file = File::create(path).map_err(|e| AppError::filesystem(path, e))?;
    let mut writer = BufWriter::new(file);

    serde_json::to_writer(&mut writer, data).map_err(|e| {
        if e.is_io() {
            AppError::filesystem(path, e.into())
        } else {
            AppError::Export(format!("JSON serialization error: {}", e))
        }
    })?;

    writer.flush().map_err(|e| AppError::filesystem(path, e))?;

    Ok(count)
}
