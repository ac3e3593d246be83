use serde::{Deserialize, Serialize};

/// Search result envelope from list endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResults<T> {
    #[serde(default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(default)]
    pub total_count: Option<u64>,
}

impl<T> SearchResults<T> {
    pub fn new(items: Vec<T>, total_count: Option<u64>) -> Self {
        Self { items, total_count }
    }
}

/// Export format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    /// Resolve the `--output` flag value.
    ///
    /// Only the exact string `json` selects JSON. Everything else, including
    /// no value, an empty value or `JSON`, falls back to CSV without an error.
    pub fn from_flag(value: Option<&str>) -> Self {
        match value {
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }

    /// File extension without the leading dot
    pub fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}
