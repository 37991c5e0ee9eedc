use std::path::Path;

use serde::Serialize;
use serde_json::{ser::PrettyFormatter, Serializer, Value};
use tokio::fs;

use crate::errors::ServiceError;

/// Read a JSON document from `path`.
///
/// Returns `Ok(None)` when the file does not exist. Any other I/O failure is a
/// persistence error; content that is not valid JSON is malformed data.
pub async fn read_json(path: &Path) -> Result<Option<Value>, ServiceError> {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(ServiceError::persistence(format!("read {}: {e}", path.display()))),
    };
    let value: Value = serde_json::from_slice(&bytes).map_err(|e| {
        models::errors::ModelError::malformed(format!("{}: {e}", path.display()))
    })?;
    Ok(Some(value))
}

/// Encode `value` as JSON indented with four spaces.
pub fn to_pretty_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, ServiceError> {
    let mut buf = Vec::new();
    let mut ser = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut ser).map_err(ServiceError::persistence)?;
    Ok(buf)
}

/// Rewrite the whole file at `path` with the pretty JSON form of `value`.
pub async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), ServiceError> {
    let data = to_pretty_vec(value)?;
    fs::write(path, data)
        .await
        .map_err(|e| ServiceError::persistence(format!("write {}: {e}", path.display())))
}
