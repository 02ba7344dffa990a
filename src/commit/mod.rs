//! Turning approved sessions into indicative calendar entries.
//!
//! One entry per participant per row. Entry ids are derived from participant,
//! intervention and target date, so approving the same session twice
//! overwrites rather than duplicates. Validation runs before any write; after
//! that every write is attempted and failures are reported per entry.

mod identity;
mod retry;

pub use identity::IdentityCache;

use crate::config::{RetryConfig, Submitter};
use crate::error::CommitError;
use crate::planner::{RowKey, SuggestionRow};
use crate::store::{CalendarEntry, DocumentStore, EntryState, UpsertOutcome};
use chrono::{NaiveDate, NaiveTime};
use futures::stream::{FuturesUnordered, StreamExt};
use retry::retry_with_backoff;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Semaphore;
use tracing::{info, warn};
use uuid::Uuid;

/// Deterministic calendar entry id for a participant's session on a date
pub fn entry_id(participant_id: &str, intervention_id: &str, target_date: NaiveDate) -> String {
    let timestamp = target_date.and_time(NaiveTime::MIN).and_utc().timestamp_millis();
    let input = format!("{}|{}|{}", participant_id, intervention_id, timestamp);
    let hash = Sha256::digest(input.as_bytes());
    format!("ind-{}", &format!("{:x}", hash)[..16])
}

/// Check rows before anything is written.
///
/// Fails when there is nobody to commit or when a recurring row has no
/// subtitle.
pub fn validate_rows(rows: &[SuggestionRow]) -> Result<(), CommitError> {
    if rows.iter().all(|row| row.participants.is_empty()) {
        return Err(CommitError::NoParticipants);
    }
    if let Some(row) = rows.iter().find(|row| row.needs_subtitle()) {
        return Err(CommitError::MissingSubtitle {
            title: row.intervention_title.clone(),
            date: row.date,
        });
    }
    Ok(())
}

/// One pending write
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedEntry {
    pub row: RowKey,
    pub entry: CalendarEntry,
}

/// Build the calendar entries for `rows`.
///
/// `consultants` maps coordinator id to the resolved user id; rows without a
/// coordinator are recorded against the submitter.
pub fn build_entries(
    rows: &[SuggestionRow],
    consultants: &HashMap<String, String>,
    submitter: &Submitter,
    batch_id: Uuid,
) -> Vec<PlannedEntry> {
    let mut planned = Vec::new();
    for row in rows {
        let (consultant_id, consultant_name) = match &row.coordinator_id {
            Some(id) => (
                consultants.get(id).cloned().unwrap_or_else(|| id.clone()),
                row.coordinator()
                    .map(|c| c.name.clone())
                    .unwrap_or_else(|| id.clone()),
            ),
            None => (submitter.id.clone(), submitter.name.clone()),
        };
        let subtitle = Some(row.subtitle.trim().to_string()).filter(|s| !s.is_empty());

        for participant in &row.participants {
            planned.push(PlannedEntry {
                row: row.key.clone(),
                entry: CalendarEntry {
                    id: entry_id(&participant.id, row.intervention_id.as_str(), row.date),
                    participant_id: participant.id.clone(),
                    participant_name: participant.name.clone(),
                    intervention_id: row.intervention_id.clone(),
                    intervention_title: row.intervention_title.clone(),
                    area_of_support: row.area_of_support.clone(),
                    target_date: row.date,
                    implementation_date: row.date,
                    consultant_id: consultant_id.clone(),
                    consultant_name: consultant_name.clone(),
                    is_recurring: row.is_recurring,
                    frequency: row.frequency.clone(),
                    subtitle: subtitle.clone(),
                    status: EntryState::Planned,
                    created_by: submitter.id.clone(),
                    batch_id,
                },
            });
        }
    }
    planned
}

#[derive(Debug, Clone, PartialEq)]
pub enum EntryStatus {
    Created,
    /// Same id already present; the entry was overwritten
    Duplicate,
    Failed { error: String },
}

impl std::fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntryStatus::Created => write!(f, "created"),
            EntryStatus::Duplicate => write!(f, "duplicate"),
            EntryStatus::Failed { error } => write!(f, "failed: {}", error),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EntryResult {
    pub row: RowKey,
    pub entry_id: String,
    pub participant_id: String,
    pub participant_name: String,
    pub intervention_title: String,
    pub target_date: NaiveDate,
    pub status: EntryStatus,
}

impl EntryResult {
    pub fn is_ok(&self) -> bool {
        !matches!(self.status, EntryStatus::Failed { .. })
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CommitCounts {
    pub created: usize,
    pub duplicate: usize,
    pub failed: usize,
}

#[derive(Debug)]
pub struct CommitReport {
    pub batch_id: Uuid,
    pub results: Vec<EntryResult>,
    pub duration: Duration,
}

impl CommitReport {
    pub fn counts(&self) -> CommitCounts {
        let mut counts = CommitCounts::default();
        for result in &self.results {
            match result.status {
                EntryStatus::Created => counts.created += 1,
                EntryStatus::Duplicate => counts.duplicate += 1,
                EntryStatus::Failed { .. } => counts.failed += 1,
            }
        }
        counts
    }

    /// Ids of entries now in the store
    pub fn entry_ids(&self) -> Vec<String> {
        self.results
            .iter()
            .filter(|r| r.is_ok())
            .map(|r| r.entry_id.clone())
            .collect()
    }

    /// Rows whose every entry was written
    pub fn committed_rows(&self) -> Vec<RowKey> {
        let mut ok: HashMap<&RowKey, bool> = HashMap::new();
        for result in &self.results {
            let all_ok = ok.entry(&result.row).or_insert(true);
            *all_ok &= result.is_ok();
        }
        let mut rows: Vec<RowKey> = Vec::new();
        for result in &self.results {
            if ok.get(&result.row) == Some(&true) && !rows.contains(&result.row) {
                rows.push(result.row.clone());
            }
        }
        rows
    }
}

pub struct Committer {
    store: Arc<dyn DocumentStore>,
    concurrency: usize,
    retry: RetryConfig,
    submitter: Submitter,
}

impl Committer {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        concurrency: usize,
        retry: RetryConfig,
        submitter: Submitter,
    ) -> Self {
        Self {
            store,
            concurrency: concurrency.max(1),
            retry,
            submitter,
        }
    }

    pub async fn commit(&self, rows: &[SuggestionRow]) -> Result<CommitReport, CommitError> {
        validate_rows(rows)?;
        let start = Instant::now();
        let batch_id = Uuid::new_v4();

        let consultants = self.resolve_consultants(rows).await;
        let planned = build_entries(rows, &consultants, &self.submitter, batch_id);

        info!(
            "Committing {} entries from {} sessions (batch {})",
            planned.len(),
            rows.len(),
            batch_id
        );

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut writes = FuturesUnordered::new();

        for PlannedEntry { row, entry } in planned {
            let permit = semaphore
                .clone()
                .acquire_owned()
                .await
                .map_err(|e| CommitError::Semaphore(e.to_string()))?;
            let store = self.store.clone();
            let retry = self.retry.clone();

            writes.push(tokio::spawn(async move {
                let _permit = permit;
                let label = format!("entry {}", entry.id);
                let mut result = EntryResult {
                    row,
                    entry_id: entry.id.clone(),
                    participant_id: entry.participant_id.clone(),
                    participant_name: entry.participant_name.clone(),
                    intervention_title: entry.intervention_title.clone(),
                    target_date: entry.target_date,
                    status: EntryStatus::Created,
                };
                let outcome = retry_with_backoff(&retry, &label, || {
                    let store = store.clone();
                    let entry = entry.clone();
                    async move { store.upsert_entry(entry).await }
                })
                .await;
                result.status = match outcome {
                    Ok(UpsertOutcome::Inserted) => EntryStatus::Created,
                    Ok(UpsertOutcome::Replaced) => EntryStatus::Duplicate,
                    Err(e) => EntryStatus::Failed {
                        error: e.to_string(),
                    },
                };
                result
            }));
        }

        let mut results = Vec::new();
        while let Some(joined) = writes.next().await {
            match joined {
                Ok(result) => {
                    if let EntryStatus::Failed { error } = &result.status {
                        warn!(
                            "Failed to write {} for {}: {}",
                            result.entry_id, result.participant_id, error
                        );
                    }
                    results.push(result);
                }
                Err(e) => warn!("Write task panicked: {}", e),
            }
        }
        results.sort_by(|a, b| {
            (a.target_date, &a.intervention_title, &a.participant_id).cmp(&(
                b.target_date,
                &b.intervention_title,
                &b.participant_id,
            ))
        });

        let report = CommitReport {
            batch_id,
            results,
            duration: start.elapsed(),
        };
        let counts = report.counts();
        info!(
            "Commit done in {:.1}s: {} created, {} duplicate, {} failed",
            report.duration.as_secs_f64(),
            counts.created,
            counts.duplicate,
            counts.failed
        );
        Ok(report)
    }

    async fn resolve_consultants(&self, rows: &[SuggestionRow]) -> HashMap<String, String> {
        let roster = match self.store.coordinators().await {
            Ok(roster) => roster,
            Err(e) => {
                warn!("Could not read coordinator roster: {}", e);
                Vec::new()
            }
        };
        let mut cache = IdentityCache::new(&roster);
        let mut consultants = HashMap::new();
        for id in rows.iter().filter_map(|row| row.coordinator_id.as_ref()) {
            if !consultants.contains_key(id) {
                let uid = cache.resolve(self.store.as_ref(), id).await;
                consultants.insert(id.clone(), uid);
            }
        }
        consultants
    }
}
