//! Service layer for the person registry.
//! - `records`: input validation, the file-backed record store and its trait seam.
//! - `storage`: reusable JSON file and CSV helpers used by the store.
//! - `runtime`: startup environment checks.

pub mod errors;
pub mod records;
pub mod runtime;
pub mod storage;
