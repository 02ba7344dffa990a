//! Resolve compulsory/recurring flags for clustered interventions.
//!
//! Lookups go by native id first, in chunks of at most `chunk_size` keys.
//! Ids that stay unresolved get a second round against the alternate
//! `interventionId` field. A failed lookup anywhere degrades the whole step
//! to defaults, so scheduling always proceeds.

use super::types::InterventionMeta;
use crate::error::StoreError;
use crate::store::{DocumentStore, InterventionId, InterventionRecord, MAX_LOOKUP_KEYS};
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Enrichment {
    meta: HashMap<InterventionId, InterventionMeta>,
}

impl Enrichment {
    /// Flags for an intervention; unresolved ids are neither compulsory nor recurring
    pub fn get(&self, id: &InterventionId) -> InterventionMeta {
        self.meta.get(id).cloned().unwrap_or_default()
    }

    #[cfg(test)]
    pub fn is_compulsory(&self, id: &InterventionId) -> bool {
        self.meta.get(id).map(|m| m.is_compulsory).unwrap_or(false)
    }

    pub fn resolved(&self) -> usize {
        self.meta.len()
    }

    #[cfg(test)]
    pub fn with(mut self, id: &str, meta: InterventionMeta) -> Self {
        self.meta.insert(InterventionId::new(id), meta);
        self
    }
}

/// Coerce a stored flag to a boolean.
///
/// `true`, the number `1`, and exactly the strings `"yes"`, `"true"`, `"1"` are
/// true. Everything else, including other spellings, null and missing values,
/// is false.
pub fn parse_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_i64() == Some(1) || n.as_u64() == Some(1),
        Value::String(s) => matches!(s.as_str(), "yes" | "true" | "1"),
        Value::Null | Value::Array(_) | Value::Object(_) => false,
    }
}

fn meta_from(record: &InterventionRecord) -> InterventionMeta {
    InterventionMeta {
        is_compulsory: parse_flag(&record.is_compulsory),
        is_recurring: parse_flag(&record.is_recurring),
        frequency: record
            .frequency
            .as_ref()
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty()),
    }
}

/// Resolve flags for `ids`, never failing.
pub async fn enrich<S>(store: &S, ids: &[InterventionId], chunk_size: usize) -> Enrichment
where
    S: DocumentStore + ?Sized,
{
    match try_enrich(store, ids, chunk_size).await {
        Ok(enrichment) => {
            debug!(
                "Resolved flags for {} of {} interventions",
                enrichment.resolved(),
                ids.len()
            );
            enrichment
        }
        Err(e) => {
            warn!("Intervention lookup failed, treating all as optional one-offs: {}", e);
            Enrichment::default()
        }
    }
}

async fn try_enrich<S>(
    store: &S,
    ids: &[InterventionId],
    chunk_size: usize,
) -> Result<Enrichment, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let chunk_size = chunk_size.clamp(1, MAX_LOOKUP_KEYS);
    let mut meta = HashMap::new();

    let keys: Vec<String> = ids.iter().map(|id| id.as_str().to_string()).collect();
    for chunk in keys.chunks(chunk_size) {
        for record in store.interventions_by_ids(chunk).await? {
            meta.insert(InterventionId::new(record.id.clone()), meta_from(&record));
        }
    }

    let unresolved: Vec<String> = ids
        .iter()
        .filter(|id| !meta.contains_key(*id))
        .map(|id| id.as_str().to_string())
        .collect();

    if !unresolved.is_empty() {
        debug!(
            "{} interventions unresolved by id, trying alternate field",
            unresolved.len()
        );
        for chunk in unresolved.chunks(chunk_size) {
            for record in store.interventions_by_alternate_ids(chunk).await? {
                if let Some(alt) = &record.intervention_id {
                    meta.entry(alt.clone()).or_insert_with(|| meta_from(&record));
                }
            }
        }
    }

    // Drop anything the store returned that was not asked for
    meta.retain(|id, _| ids.contains(id));
    Ok(Enrichment { meta })
}
