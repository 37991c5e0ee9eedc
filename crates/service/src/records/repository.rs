use async_trait::async_trait;
use models::record::Record;

use crate::errors::ServiceError;
use crate::records::input::RecordInput;

/// Trait abstraction over record storage, used by the HTTP layer.
#[async_trait]
pub trait RecordRepository: Send + Sync {
    async fn list(&self) -> Vec<Record>;
    async fn get(&self, id: u64) -> Result<Record, ServiceError>;
    async fn create(&self, input: RecordInput) -> Result<Record, ServiceError>;
    async fn update(&self, id: u64, input: RecordInput) -> Result<Record, ServiceError>;
    async fn delete(&self, id: u64) -> Result<(), ServiceError>;
    /// Export to the configured destination; returns the path written.
    async fn export(&self) -> Result<String, ServiceError>;
}
