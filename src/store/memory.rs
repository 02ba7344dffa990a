use super::{
    check_lookup_size, CalendarEntry, Coordinator, DocumentStore, Documents, InterventionRecord,
    Participant, UpsertOutcome, UserLookup, UserRecord,
};
use crate::error::StoreError;
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

/// In-memory store, used directly in tests and as the engine behind `FileStore`
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Documents>,
    offline: AtomicBool,
    lookup_calls: AtomicUsize,
    rejected_participants: RwLock<HashSet<String>>,
}

impl MemoryStore {
    pub fn new(docs: Documents) -> Self {
        Self {
            docs: RwLock::new(docs),
            ..Default::default()
        }
    }

    #[cfg(test)]
    /// Make every read fail with `StoreError::Unavailable`
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    #[cfg(test)]
    /// Make calendar writes for this participant fail
    pub async fn reject_writes_for(&self, participant_id: &str) {
        self.rejected_participants
            .write()
            .await
            .insert(participant_id.to_string());
    }

    #[cfg(test)]
    /// Number of intervention lookup calls served so far
    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub async fn snapshot(&self) -> Documents {
        self.docs.read().await.clone()
    }

    #[cfg(test)]
    pub async fn calendar(&self) -> Vec<CalendarEntry> {
        self.docs.read().await.indicative_calendar.clone()
    }

    fn ensure_online(&self) -> Result<(), StoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }

    async fn lookup<F>(&self, ids: &[String], matches: F) -> Result<Vec<InterventionRecord>, StoreError>
    where
        F: Fn(&InterventionRecord, &str) -> bool,
    {
        self.ensure_online()?;
        check_lookup_size(ids)?;
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);

        let docs = self.docs.read().await;
        Ok(docs
            .interventions
            .iter()
            .filter(|record| ids.iter().any(|id| matches(*record, id.as_str())))
            .cloned()
            .collect())
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    async fn participants(&self) -> Result<Vec<Participant>, StoreError> {
        self.ensure_online()?;
        Ok(self.docs.read().await.participants.clone())
    }

    async fn coordinators(&self) -> Result<Vec<Coordinator>, StoreError> {
        self.ensure_online()?;
        Ok(self.docs.read().await.coordinators.clone())
    }

    async fn interventions_by_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<InterventionRecord>, StoreError> {
        self.lookup(ids, |record, id| record.id == id).await
    }

    async fn interventions_by_alternate_ids(
        &self,
        ids: &[String],
    ) -> Result<Vec<InterventionRecord>, StoreError> {
        self.lookup(ids, |record, id| {
            record
                .intervention_id
                .as_ref()
                .map(|alt| alt.as_str() == id)
                .unwrap_or(false)
        })
        .await
    }

    async fn find_user(&self, lookup: &UserLookup) -> Result<Option<UserRecord>, StoreError> {
        self.ensure_online()?;
        let docs = self.docs.read().await;
        let found = docs.users.iter().find(|user| match lookup {
            UserLookup::StaffId(id) => user.staff_id.as_deref() == Some(id.as_str()),
            UserLookup::Email(email) => user
                .email
                .as_deref()
                .map(|e| e.eq_ignore_ascii_case(email))
                .unwrap_or(false),
        });
        Ok(found.cloned())
    }

    async fn upsert_entry(&self, entry: CalendarEntry) -> Result<UpsertOutcome, StoreError> {
        self.ensure_online()?;
        if self
            .rejected_participants
            .read()
            .await
            .contains(&entry.participant_id)
        {
            return Err(StoreError::Unavailable(format!(
                "write rejected for participant {}",
                entry.participant_id
            )));
        }

        let mut docs = self.docs.write().await;
        Ok(upsert_into(&mut docs.indicative_calendar, entry))
    }
}

/// Insert `entry`, or replace the entry with the same id
pub(super) fn upsert_into(calendar: &mut Vec<CalendarEntry>, entry: CalendarEntry) -> UpsertOutcome {
    match calendar.iter_mut().find(|existing| existing.id == entry.id) {
        Some(existing) => {
            *existing = entry;
            UpsertOutcome::Replaced
        }
        None => {
            calendar.push(entry);
            UpsertOutcome::Inserted
        }
    }
}
