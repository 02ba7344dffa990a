use super::memory::upsert_into;
use super::{
    CalendarEntry, Coordinator, DocumentStore, Documents, InterventionRecord, MemoryStore,
    Participant, UpsertOutcome, UserLookup, UserRecord,
};
use crate::error::StoreError;
use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tokio::sync::Mutex;
use tracing::debug;

/// JSON document store backed by a single file.
///
/// Reads are served from memory. Every calendar upsert rewrites the file
/// atomically and is applied in memory only after the write succeeded.
pub struct FileStore {
    path: PathBuf,
    inner: MemoryStore,
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| StoreError::ReadFile {
            path: path.to_path_buf(),
            source: e,
        })?;
        let docs: Documents = serde_json::from_str(&content)?;

        debug!(
            "Opened store {:?}: {} participants, {} coordinators, {} interventions",
            path,
            docs.participants.len(),
            docs.coordinators.len(),
            docs.interventions.len()
        );

        Ok(Self {
            path: path.to_path_buf(),
            inner: MemoryStore::new(docs),
            write_lock: Mutex::new(()),
        })
    }

    fn write(&self, docs: &Documents) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(docs)?;

        let write_err = |source: std::io::Error| StoreError::WriteFile {
            path: self.path.clone(),
            source,
        };

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        let mut tmp = NamedTempFile::new_in(&dir).map_err(write_err)?;
        tmp.write_all(json.as_bytes()).map_err(write_err)?;
        tmp.persist(&self.path).map_err(|e| write_err(e.error))?;
        Ok(())
    }
}

#[async_trait]
impl DocumentStore for FileStore {
    async fn participants(&self) -> Result<Vec<Participant>, StoreError> {
        self.inner.participants().await
    }

    async fn coordinators(&self) -> Result<Vec<Coordinator>, StoreError> {
        self.inner.coordinators().await
    }

    async fn interventions_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<InterventionRecord>, StoreError> {
        self.inner.interventions_by_ids(ids).await
    }

    async fn interventions_by_alternate_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<InterventionRecord>, StoreError> {
        self.inner.interventions_by_alternate_ids(ids).await
    }

    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<UserRecord>, StoreError> {
        self.inner.find_user(lookup).await
    }

    async fn upsert_entry(&self, entry: CalendarEntry) -> Result<UpsertOutcome, StoreError> {
        // Memory only sees the entry once it is on disk.
        let _guard = self.write_lock.lock().await;
        let mut docs = self.inner.snapshot().await;
        upsert_into(&mut docs.indicative_calendar, entry.clone());
        self.write(&docs)?;
        self.inner.upsert_entry(entry).await
    }
}
