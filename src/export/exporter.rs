//! Customer export orchestration
//!
//! Fetches every customer from the store, projects each one into an
//! [`ExportRow`], and writes the rows to a timestamped file in the export
//! directory.

use chrono::{Local, NaiveDateTime};
use std::path::{Path, PathBuf};

use super::{export_to_csv, export_to_json_compact};
use crate::api::{get_all_customers, CustomerStore};
use crate::error::{AppError, Result};
use crate::models::{ExportFormat, ExportRow};

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Prefix of every export file name
const FILE_PREFIX: &str = "customers";

/// Exports all customers of a store to CSV or JSON
pub struct Exporter<S> {
    store: S,
    export_dir: PathBuf,
    page_size: u32,
}

impl<S: CustomerStore> Exporter<S> {
    /// Create an exporter writing into `export_dir`
    pub fn new(store: S, export_dir: impl Into<PathBuf>) -> Self {
        Self {
            store,
            export_dir: export_dir.into(),
            page_size: DEFAULT_PAGE_SIZE,
        }
    }

    /// Set the store page size; 0 fetches with a single unpaged request
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Run the export and return the path of the written file.
    ///
    /// `output_format` is the raw `--output` value; see
    /// [`ExportFormat::from_flag`] for how it is resolved.
    pub async fn run(&self, output_format: Option<&str>) -> Result<PathBuf> {
        self.run_at(
            ExportFormat::from_flag(output_format),
            Local::now().naive_local(),
        )
        .await
    }

    /// Run the export as if the current local time were `now`
    pub async fn run_at(&self, format: ExportFormat, now: NaiveDateTime) -> Result<PathBuf> {
        let customers = get_all_customers(&self.store, self.page_size).await?;
        tracing::info!("Fetched {} customers", customers.len());

        let rows: Vec<ExportRow> = customers.iter().map(ExportRow::from).collect();

        ensure_dir(&self.export_dir)?;
        let path = export_file_path(&self.export_dir, now, format);

        let count = match format {
            ExportFormat::Json => export_to_json_compact(&rows, &path)?,
            ExportFormat::Csv => export_to_csv(&rows, &path)?,
        };
        tracing::info!("Wrote {} rows to {}", count, path.display());

        Ok(path)
    }
}

/// Create the directory and any missing parents; no-op if it exists
pub fn ensure_dir(dir: &Path) -> Result<()> {
    if !dir.is_dir() {
        tracing::debug!("Creating export directory {}", dir.display());
        std::fs::create_dir_all(dir).map_err(|e| AppError::filesystem(dir, e))?;
    }
    Ok(())
}

/// `YYYYMMDDHHMMSS` label for the export file name
pub fn timestamp_label(now: NaiveDateTime) -> String {
    now.format("%Y%m%d%H%M%S").to_string()
}

/// Full path of the export file for the given instant and format
pub fn export_file_path(dir: &Path, now: NaiveDateTime, format: ExportFormat) -> PathBuf {
    dir.join(format!(
        "{}-{}.{}",
        FILE_PREFIX,
        timestamp_label(now),
        format.extension()
    ))
}

/// Status line printed once an export file has been written
pub fn finished_message(path: &Path) -> String {
    format!("[INFO] Export finished. Export file generated: {}", path.display())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::store::fake::MemoryStore;
    use crate::models::Customer;
    use chrono::{Duration, NaiveDate};
    use tempfile::TempDir;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn sample_customers() -> Vec<Customer> {
        vec![
            Customer::new("Ada", "Lovelace", "ada@example.com"),
            Customer::new("Grace", "Hopper", "grace@example.com"),
            Customer::new("", "Solo", "solo@example.com"),
        ]
    }

    fn is_export_file_name(name: &str) -> bool {
        let Some(rest) = name.strip_prefix("customers-") else {
            return false;
        };
        let Some((stamp, ext)) = rest.split_once('.') else {
            return false;
        };
        stamp.len() == 14 && stamp.chars().all(|c| c.is_ascii_digit()) && (ext == "csv" || ext == "json")
    }

    #[tokio::test]
    async fn test_single_customer_csv() {
        let dir = TempDir::new().unwrap();
        let export_dir = dir.path().join("var").join("export");
        let store = MemoryStore::new(vec![Customer::new("Ada", "Lovelace", "ada@example.com")]);

        let path = Exporter::new(store, &export_dir).run(None).await.unwrap();

        assert_eq!(path.parent().unwrap(), export_dir);
        assert_eq!(path.extension().unwrap(), "csv");
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Ada Lovelace,ada@example.com\n"
        );
    }

    #[tokio::test]
    async fn test_csv_rows_follow_store_order() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(sample_customers()), dir.path());

        let path = exporter.run_at(ExportFormat::Csv, at(8, 0, 0)).await.unwrap();

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .unwrap();
        let records: Vec<Vec<String>> = reader
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect();
        assert_eq!(
            records,
            vec![
                vec!["Ada Lovelace", "ada@example.com"],
                vec!["Grace Hopper", "grace@example.com"],
                vec![" Solo", "solo@example.com"],
            ]
        );
    }

    #[tokio::test]
    async fn test_json_output() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(sample_customers()), dir.path());

        let path = exporter.run(Some("json")).await.unwrap();
        assert_eq!(path.extension().unwrap(), "json");

        let parsed: Vec<Vec<String>> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 3);
        assert_eq!(parsed[0], vec!["Ada Lovelace", "ada@example.com"]);
        assert_eq!(parsed[2], vec![" Solo", "solo@example.com"]);
    }

    #[tokio::test]
    async fn test_empty_store_json_is_empty_array() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(Vec::new()), dir.path());

        let path = exporter.run(Some("json")).await.unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }

    #[tokio::test]
    async fn test_empty_store_csv_is_empty_file() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(Vec::new()), dir.path());

        let path = exporter.run(None).await.unwrap();
        assert_eq!(path.extension().unwrap(), "csv");
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
    }

    #[tokio::test]
    async fn test_unknown_output_values_fall_back_to_csv() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(sample_customers()), dir.path());
        let expected = "Ada Lovelace,ada@example.com\nGrace Hopper,grace@example.com\n Solo,solo@example.com\n";

        for value in ["", "CSV", "xml", "JSON"] {
            let path = exporter.run(Some(value)).await.unwrap();
            assert_eq!(path.extension().unwrap(), "csv", "{value:?}");
            assert_eq!(std::fs::read_to_string(&path).unwrap(), expected);
        }
    }

    #[tokio::test]
    async fn test_repeated_runs_reuse_directory() {
        let dir = TempDir::new().unwrap();
        let export_dir = dir.path().join("export");
        let exporter = Exporter::new(MemoryStore::new(sample_customers()), &export_dir);

        let first = exporter.run_at(ExportFormat::Csv, at(9, 0, 0)).await.unwrap();
        let second = exporter
            .run_at(ExportFormat::Csv, at(9, 0, 0) + Duration::seconds(1))
            .await
            .unwrap();

        assert_ne!(first, second);
        assert!(first.exists());
        assert!(second.exists());
    }

    #[tokio::test]
    async fn test_same_second_overwrites() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(sample_customers()), dir.path());

        let first = exporter.run_at(ExportFormat::Json, at(10, 0, 0)).await.unwrap();
        let second = exporter.run_at(ExportFormat::Json, at(10, 0, 0)).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_writes_nothing() {
        let dir = TempDir::new().unwrap();
        let export_dir = dir.path().join("export");
        let exporter = Exporter::new(MemoryStore::failing(), &export_dir);

        let err = exporter.run(None).await.unwrap_err();
        assert!(matches!(err, AppError::Api(_)));
        assert!(!export_dir.exists());
    }

    #[tokio::test]
    async fn test_directory_creation_failure() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("var");
        std::fs::write(&blocker, "not a directory").unwrap();
        let exporter = Exporter::new(MemoryStore::new(sample_customers()), blocker.join("export"));

        let err = exporter.run(None).await.unwrap_err();
        assert!(matches!(err, AppError::Filesystem { .. }));
    }

    #[tokio::test]
    async fn test_pages_through_large_store() {
        let dir = TempDir::new().unwrap();
        let customers: Vec<Customer> = (0..25)
            .map(|i| Customer::new("C", &i.to_string(), &format!("c{i}@example.com")))
            .collect();
        let exporter = Exporter::new(MemoryStore::new(customers), dir.path()).with_page_size(10);

        let path = exporter.run(Some("json")).await.unwrap();
        let parsed: Vec<Vec<String>> =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed.len(), 25);
        assert_eq!(parsed[24], vec!["C 24", "c24@example.com"]);
    }

    #[test]
    fn test_file_name_format() {
        let path = export_file_path(Path::new("/srv/var/export"), at(7, 5, 3), ExportFormat::Csv);
        assert_eq!(path, PathBuf::from("/srv/var/export/customers-20240309070503.csv"));

        for format in [ExportFormat::Csv, ExportFormat::Json] {
            let path = export_file_path(Path::new("x"), at(23, 59, 59), format);
            let name = path.file_name().unwrap().to_str().unwrap();
            assert!(is_export_file_name(name), "{name}");
        }
    }

    #[test]
    fn test_timestamps_one_second_apart_differ() {
        let a = at(23, 59, 59);
        let b = a + Duration::seconds(1);
        assert_ne!(timestamp_label(a), timestamp_label(b));
        assert_eq!(timestamp_label(b), "20240310000000");
    }

    #[tokio::test]
    async fn test_run_uses_current_time_in_name() {
        let dir = TempDir::new().unwrap();
        let exporter = Exporter::new(MemoryStore::new(Vec::new()), dir.path());

        let path = exporter.run(Some("json")).await.unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(is_export_file_name(name), "{name}");
    }

    #[test]
    fn test_finished_message() {
        assert_eq!(
            finished_message(Path::new("/var/export/customers-20240309070503.csv")),
            "[INFO] Export finished. Export file generated: /var/export/customers-20240309070503.csv"
        );
    }
}
