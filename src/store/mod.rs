mod documents;
mod file;
mod memory;

pub use documents::*;
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::error::StoreError;
use async_trait::async_trait;

/// Keys accepted by a single intervention lookup
pub const MAX_LOOKUP_KEYS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    Inserted,
    /// An entry with the same id already existed and was overwritten
    Replaced,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UserLookup {
    StaffId(String),
    Email(String),
}

/// Read/write contract of the incubation document store
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn participants(&self) -> Result<Vec<Participant>, StoreError>;

    async fn coordinators(&self) -> Result<Vec<Coordinator>, StoreError>;

    /// Look up interventions by native id. At most `MAX_LOOKUP_KEYS` ids.
    async fn interventions_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<InterventionRecord>, StoreError>;

    /// Look up interventions by their alternate `interventionId` field.
    /// At most `MAX_LOOKUP_KEYS` ids.
    async fn interventions_by_alternate_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<InterventionRecord>, StoreError>;

    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<UserRecord>, StoreError>;

    async fn upsert_entry(&self, entry: CalendarEntry) -> Result<UpsertOutcome, StoreError>;
}

pub(crate) fn check_lookup_size(ids: &[String]) -> Result<(), StoreError> {
    if ids.len() > MAX_LOOKUP_KEYS {
        return Err(StoreError::BatchTooLarge {
            got: ids.len(),
            max: MAX_LOOKUP_KEYS,
        });
    }
    Ok(())
}
