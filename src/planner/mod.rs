//! Session planning: cluster → enrich → schedule → review
//!
//! 1. Participants are grouped by required intervention (`cluster`)
//! 2. Each intervention's compulsory/recurring flags are looked up (`enrich`)
//! 3. Clusters become proposed sessions with a default coordinator and date
//!    (`rank`, `calendar`, `schedule`)
//! 4. Operators adjust proposed sessions before commit (`review`)
//!
//! Every step takes "today" as an argument; nothing in here reads the clock.

pub mod calendar;
pub mod cluster;
pub mod enrich;
pub mod rank;
pub mod review;
pub mod schedule;
pub mod types;

pub use cluster::build_clusters;
pub use enrich::enrich;
pub use review::ReviewSession;
pub use schedule::{suggest, ScheduleOptions};
pub use types::{Cluster, RowKey, SuggestionRow};

use crate::error::StoreError;
use crate::store::{DocumentStore, InterventionId};
use chrono::NaiveDate;
use tracing::info;

#[derive(Debug)]
pub struct Proposal {
    pub clusters: Vec<Cluster>,
    pub rows: Vec<SuggestionRow>,
}

/// Read participants and coordinators from the store and propose sessions.
///
/// Only the participant and roster reads can fail; intervention lookups
/// degrade to defaults.
pub async fn propose<S>(
    store: &S,
    options: &ScheduleOptions,
    lookup_batch_size: usize,
    today: NaiveDate,
) -> Result<Proposal, StoreError>
where
    S: DocumentStore + ?Sized,
{
    let participants = store.participants().await?;
    let roster = store.coordinators().await?;

    let clusters = build_clusters(&participants);
    let ids: Vec<InterventionId> = clusters.iter().map(|c| c.intervention_id.clone()).collect();
    let enrichment = enrich(store, &ids, lookup_batch_size).await;
    let rows = suggest(&clusters, &enrichment, &roster, today, options);

    info!(
        "Proposed {} sessions for {} interventions across {} participants",
        rows.len(),
        clusters.len(),
        participants.len()
    );

    Ok(Proposal { clusters, rows })
}
