//! Storage helpers for the service layer
//!
//! File-level encoding shared by the record store: the pretty-printed JSON
//! state file and the CSV export.

pub mod csv_export;
pub mod json_file;
