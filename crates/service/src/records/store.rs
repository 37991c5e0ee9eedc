use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use models::{errors::ModelError, record::Record};
use serde_json::Value;
use tokio::{fs, sync::RwLock};
use tracing::{info, warn};

use crate::errors::ServiceError;
use crate::records::{input::RecordInput, repository::RecordRepository};
use crate::storage::{csv_export, json_file};

struct State {
    records: Vec<Record>,
    next_id: u64,
}

impl State {
    fn position(&self, id: u64) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn to_values(&self) -> Vec<Value> {
        self.records.iter().map(|r| Value::Object(r.to_map())).collect()
    }
}

/// File store: the record list persisted as a pretty JSON array.
///
/// Every mutation rewrites the whole file while holding the write lock, so
/// id assignment and file writes are serialized across concurrent requests.
pub struct RecordStore {
    state: RwLock<State>,
    file_path: PathBuf,
    export_path: PathBuf,
}

impl RecordStore {
    /// Load the store from `path`. A missing file means an empty store;
    /// malformed content is fatal.
    pub async fn open<P, E>(path: P, export_path: E) -> Result<Arc<Self>, ServiceError>
    where
        P: Into<PathBuf>,
        E: Into<PathBuf>,
    {
        let file_path = path.into();
        if let Some(parent) = file_path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await.map_err(ServiceError::persistence)?;
            }
        }

        let records = match json_file::read_json(&file_path).await? {
            Some(Value::Array(items)) => items
                .iter()
                .map(Record::from_value)
                .collect::<Result<Vec<_>, _>>()?,
            Some(_) => {
                return Err(ModelError::malformed(format!(
                    "{}: expected a JSON array of records",
                    file_path.display()
                ))
                .into())
            }
            None => Vec::new(),
        };
        let mut seen = HashSet::with_capacity(records.len());
        if let Some(dup) = records.iter().find(|r| !seen.insert(r.id)) {
            return Err(ModelError::malformed(format!(
                "{}: duplicate record id {}",
                file_path.display(),
                dup.id
            ))
            .into());
        }
        let next_id = match records.iter().map(|r| r.id).max() {
            Some(max) => max.checked_add(1).ok_or_else(|| ModelError::malformed("id space exhausted"))?,
            None => 1,
        };
        info!(path = %file_path.display(), count = records.len(), next_id, "records_loaded");

        Ok(Arc::new(Self {
            state: RwLock::new(State { records, next_id }),
            file_path,
            export_path: export_path.into(),
        }))
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn export_path(&self) -> &Path {
        &self.export_path
    }

    async fn save(&self, state: &State) -> Result<(), ServiceError> {
        let result = json_file::write_json(&self.file_path, &state.to_values()).await;
        if let Err(e) = &result {
            warn!(path = %self.file_path.display(), error = %e, "records_persist_failed");
        }
        result
    }

    /// All records in insertion order.
    pub async fn list(&self) -> Vec<Record> {
        self.state.read().await.records.clone()
    }

    pub async fn get(&self, id: u64) -> Result<Record, ServiceError> {
        let state = self.state.read().await;
        state
            .position(id)
            .map(|i| state.records[i].clone())
            .ok_or_else(|| ServiceError::not_found("record"))
    }

    pub async fn create(&self, input: RecordInput) -> Result<Record, ServiceError> {
        input.validate()?;
        let mut state = self.state.write().await;
        let following = state
            .next_id
            .checked_add(1)
            .ok_or_else(|| ModelError::malformed("id space exhausted"))?;
        let rec = Record::new(state.next_id, input.name.trim(), input.age);
        state.records.push(rec.clone());
        state.next_id = following;
        self.save(&state).await?;
        info!(id = rec.id, record = %rec, "record_created");
        Ok(rec)
    }

    /// Replace name and age in place; the id never changes.
    pub async fn update(&self, id: u64, input: RecordInput) -> Result<Record, ServiceError> {
        input.validate()?;
        let mut state = self.state.write().await;
        let idx = state.position(id).ok_or_else(|| ServiceError::not_found("record"))?;
        let rec = &mut state.records[idx];
        rec.name = input.name.trim().to_string();
        rec.age = input.age;
        let updated = rec.clone();
        self.save(&state).await?;
        info!(id, record = %updated, "record_updated");
        Ok(updated)
    }

    pub async fn delete(&self, id: u64) -> Result<(), ServiceError> {
        let mut state = self.state.write().await;
        let idx = state.position(id).ok_or_else(|| ServiceError::not_found("record"))?;
        let removed = state.records.remove(idx);
        self.save(&state).await?;
        info!(id, record = %removed, "record_deleted");
        Ok(())
    }

    /// Write the CSV export of the current collection to `dest`.
    pub async fn export(&self, dest: &Path) -> Result<(), ServiceError> {
        let state = self.state.read().await;
        csv_export::write_csv(dest, &state.records).await?;
        info!(path = %dest.display(), count = state.records.len(), "records_exported");
        Ok(())
    }

    /// Export to the fixed path this store was opened with.
    pub async fn export_default(&self) -> Result<(), ServiceError> {
        self.export(&self.export_path).await
    }
}

#[async_trait::async_trait]
impl RecordRepository for RecordStore {
    async fn list(&self) -> Vec<Record> { self.list().await }
    async fn get(&self, id: u64) -> Result<Record, ServiceError> { self.get(id).await }
    async fn create(&self, input: RecordInput) -> Result<Record, ServiceError> { self.create(input).await }
    async fn update(&self, id: u64, input: RecordInput) -> Result<Record, ServiceError> { self.update(id, input).await }
    async fn delete(&self, id: u64) -> Result<(), ServiceError> { self.delete(id).await }
    async fn export(&self) -> Result<String, ServiceError> {
        self.export_default().await?;
        Ok(self.export_path.display().to_string())
    }
}
