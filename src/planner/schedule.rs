use super::calendar::{grouped_date, next_singular_day};
use super::enrich::Enrichment;
use super::rank::rank_coordinators;
use super::types::{
    session_subtitle, Cluster, InterventionMeta, ParticipantRef, RankedCoordinator, RowKey,
    RowSlot, SessionKind, SuggestionRow,
};
use crate::config::SchedulingConfig;
use crate::store::Coordinator;
use chrono::{NaiveDate, Weekday};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleOptions {
    pub max_batches: usize,
    pub grouped_day: Weekday,
    pub keyword_weight: f64,
}

impl Default for ScheduleOptions {
    fn default() -> Self {
        Self::from(&SchedulingConfig::default())
    }
}

impl From<&SchedulingConfig> for ScheduleOptions {
    fn from(config: &SchedulingConfig) -> Self {
        Self {
            max_batches: config.max_batches,
            grouped_day: config.grouped_day.into(),
            keyword_weight: config.keyword_weight,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchPlan {
    pub count: usize,
    pub size: usize,
}

fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}

/// Split `demand` participants into at most `max_batches` grouped sessions.
///
/// count = min(max, max(1, ⌈demand / ⌈demand / max⌉⌉)), size = ⌈demand / count⌉.
/// Demand 4 with max 3 gives two batches of two.
pub fn batch_plan(demand: usize, max_batches: usize) -> BatchPlan {
    let max_batches = max_batches.max(1);
    if demand == 0 {
        return BatchPlan { count: 0, size: 0 };
    }
    let per_batch = div_ceil(demand, max_batches);
    let count = max_batches.min(div_ceil(demand, per_batch).max(1));
    BatchPlan {
        count,
        size: div_ceil(demand, count),
    }
}

/// Turn one cluster into proposed sessions
pub fn schedule_cluster(
    cluster: &Cluster,
    meta: &InterventionMeta,
    roster: &[Coordinator],
    today: NaiveDate,
    options: &ScheduleOptions,
) -> Vec<SuggestionRow> {
    let ranked = rank_coordinators(roster, &cluster.title, options.keyword_weight);
    let row = |slot: RowSlot, kind: SessionKind, participants: &[ParticipantRef], date: NaiveDate| {
        new_row(cluster, meta, &ranked, slot, kind, participants.to_vec(), date)
    };

    if meta.is_compulsory {
        let date = grouped_date(today, options.grouped_day, 0);
        let mut compulsory = row(
            RowSlot::Compulsory,
            SessionKind::Grouped,
            &cluster.participants,
            date,
        );
        if compulsory.is_recurring {
            compulsory.subtitle = session_subtitle(date);
        }
        return vec![compulsory];
    }

    match cluster.demand() {
        0 => Vec::new(),
        1 => {
            let member = &cluster.participants[0];
            let date = next_singular_day(today, options.grouped_day);
            vec![row(
                RowSlot::Single(member.id.clone()),
                SessionKind::Singular,
                &cluster.participants,
                date,
            )]
        }
        demand => {
            let plan = batch_plan(demand, options.max_batches);
            debug!(
                "Splitting {} ({} participants) into {} batches of up to {}",
                cluster.intervention_id, demand, plan.count, plan.size
            );
            cluster
                .participants
                .chunks(plan.size)
                .enumerate()
                .map(|(index, batch)| {
                    row(
                        RowSlot::Batch(index),
                        SessionKind::Grouped,
                        batch,
                        grouped_date(today, options.grouped_day, index),
                    )
                })
                .collect()
        }
    }
}

fn new_row(
    cluster: &Cluster,
    meta: &InterventionMeta,
    ranked: &[RankedCoordinator],
    slot: RowSlot,
    kind: SessionKind,
    participants: Vec<ParticipantRef>,
    date: NaiveDate,
) -> SuggestionRow {
    SuggestionRow {
        key: RowKey {
            intervention_id: cluster.intervention_id.clone(),
            slot,
            date,
        },
        intervention_id: cluster.intervention_id.clone(),
        intervention_title: cluster.title.clone(),
        area_of_support: cluster.area_of_support.clone(),
        kind,
        participants,
        date,
        coordinator_id: ranked.first().map(|c| c.id.clone()),
        ranked_coordinators: ranked.to_vec(),
        is_recurring: meta.is_recurring,
        frequency: meta.frequency.clone(),
        subtitle: String::new(),
    }
}

/// Propose sessions for every cluster
pub fn suggest(
    clusters: &[Cluster],
    enrichment: &Enrichment,
    roster: &[Coordinator],
    today: NaiveDate,
    options: &ScheduleOptions,
) -> Vec<SuggestionRow> {
    clusters
        .iter()
        .flat_map(|cluster| {
            let meta = enrichment.get(&cluster.intervention_id);
            schedule_cluster(cluster, &meta, roster, today, options)
        })
        .collect()
}
