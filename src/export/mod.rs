//! Export functionality for reporting
//!
//! This module writes learned values in tabular formats. Currently supports a
//! per-cell CSV of best actions and values.

mod values_csv;

pub use values_csv::{ValueCsvExporter, ValueCsvRecord};
