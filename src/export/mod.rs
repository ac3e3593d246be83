//! Data export functionality

pub mod csv;
pub mod exporter;
pub mod json;

pub use self::csv::*;
pub use self::exporter::*;
pub use self::json::*;
