//! Runtime environment helpers
//!
//! Thin wrapper around `common::env` so the server crate can run the startup
//! checks through the service layer.

use std::path::Path;

/// Ensure the data/export directories exist; warn when the frontend is missing.
pub async fn ensure_env(frontend_dir: &str, data_file: &str, export_file: &str) -> anyhow::Result<()> {
    let dirs: Vec<&str> = [data_file, export_file]
        .into_iter()
        .filter_map(|f| Path::new(f).parent().and_then(|p| p.to_str()))
        .filter(|p| !p.is_empty())
        .collect();
    common::env::ensure_env(frontend_dir, &dirs).await
}
