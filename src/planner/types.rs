//! Types flowing through the clustering → enrichment → scheduling pipeline

use crate::store::InterventionId;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A participant as carried on clusters and session rows
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ParticipantRef {
    pub id: String,
    pub name: String,
}

/// Participants sharing a required intervention
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Cluster {
    pub intervention_id: InterventionId,
    pub title: String,
    pub area_of_support: String,
    pub participants: Vec<ParticipantRef>,
}

impl Cluster {
    pub fn demand(&self) -> usize {
        self.participants.len()
    }
}

/// Per-intervention flags resolved from the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InterventionMeta {
    pub is_compulsory: bool,
    pub is_recurring: bool,
    pub frequency: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Singular,
    Grouped,
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionKind::Singular => write!(f, "singular"),
            SessionKind::Grouped => write!(f, "grouped"),
        }
    }
}

/// Where a row came from within its intervention
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(tag = "slot", content = "value", rename_all = "snake_case")]
pub enum RowSlot {
    /// The single combined session of a compulsory intervention
    Compulsory,
    /// Nth grouped batch of a non-compulsory intervention
    Batch(usize),
    /// A one-to-one session for this participant
    Single(String),
}

/// Typed identity of a suggestion row
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct RowKey {
    pub intervention_id: InterventionId,
    pub slot: RowSlot,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RankedCoordinator {
    pub id: String,
    pub name: String,
    pub score: f64,
}

/// A proposed session awaiting approval
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SuggestionRow {
    pub key: RowKey,
    pub intervention_id: InterventionId,
    pub intervention_title: String,
    pub area_of_support: String,
    pub kind: SessionKind,
    pub participants: Vec<ParticipantRef>,
    pub date: NaiveDate,
    pub coordinator_id: Option<String>,
    pub ranked_coordinators: Vec<RankedCoordinator>,
    pub is_recurring: bool,
    pub frequency: Option<String>,
    #[serde(default)]
    pub subtitle: String,
}

impl SuggestionRow {
    pub fn coordinator(&self) -> Option<&RankedCoordinator> {
        let id = self.coordinator_id.as_deref()?;
        self.ranked_coordinators.iter().find(|c| c.id == id)
    }

    /// Recurring sessions are committed under a subtitle naming the occurrence
    pub fn needs_subtitle(&self) -> bool {
        self.is_recurring && self.subtitle.trim().is_empty()
    }
}

/// Default subtitle for an occurrence of a recurring session
pub fn session_subtitle(date: NaiveDate) -> String {
    format!("Session - {}", date.format("%Y-%m-%d"))
}
