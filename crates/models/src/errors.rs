use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("malformed data: {0}")]
    MalformedData(String),
}

impl ModelError {
    pub fn malformed(detail: impl Into<String>) -> Self { Self::MalformedData(detail.into()) }
}
