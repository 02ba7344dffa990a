use chrono::Weekday;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::defaults::*;

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,

    /// JSON document store holding participants, coordinators and interventions
    #[serde(default = "default_store")]
    pub store: PathBuf,

    /// Where the suggestion board is kept between commands
    #[serde(default = "default_state_dir")]
    pub state_dir: PathBuf,

    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,

    /// Maximum parallel calendar writes during a commit
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Keys per intervention lookup call
    #[serde(default = "default_lookup_batch_size")]
    pub lookup_batch_size: usize,

    #[serde(default)]
    pub scheduling: SchedulingConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub submitter: Submitter,
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct SchedulingConfig {
    /// Upper bound on grouped sessions per non-compulsory intervention
    #[serde(default = "default_max_batches")]
    pub max_batches: usize,

    /// Weekday reserved for grouped sessions
    #[serde(default = "default_grouped_day")]
    pub grouped_day: SessionDay,

    /// Score added per expertise keyword found in the intervention title
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_batches: default_max_batches(),
            grouped_day: default_grouped_day(),
            keyword_weight: default_keyword_weight(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_backoff_base_ms")]
    pub backoff_base_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            backoff_base_ms: default_backoff_base_ms(),
        }
    }
}

/// Identity recorded on calendar entries that have no coordinator
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, JsonSchema)]
pub struct Submitter {
    #[serde(default = "default_submitter_id")]
    pub id: String,

    #[serde(default = "default_submitter_name")]
    pub name: String,
}

impl Default for Submitter {
    fn default() -> Self {
        Self {
            id: default_submitter_id(),
            name: default_submitter_name(),
        }
    }
}

impl std::str::FromStr for Submitter {
    type Err = String;

    /// Parses `id:name`; a bare id doubles as the name
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, name) = match s.split_once(':') {
            Some((id, name)) => (id.trim(), name.trim()),
            None => (s.trim(), s.trim()),
        };
        if id.is_empty() {
            return Err(format!("Invalid submitter: '{}'", s));
        }
        Ok(Submitter {
            id: id.to_string(),
            name: if name.is_empty() { id } else { name }.to_string(),
        })
    }
}

/// Working days a grouped session may be pinned to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SessionDay {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
}

impl From<SessionDay> for Weekday {
    fn from(day: SessionDay) -> Self {
        match day {
            SessionDay::Monday => Weekday::Mon,
            SessionDay::Tuesday => Weekday::Tue,
            SessionDay::Wednesday => Weekday::Wed,
            SessionDay::Thursday => Weekday::Thu,
            SessionDay::Friday => Weekday::Fri,
        }
    }
}

impl std::fmt::Display for SessionDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionDay::Monday => write!(f, "monday"),
            SessionDay::Tuesday => write!(f, "tuesday"),
            SessionDay::Wednesday => write!(f, "wednesday"),
            SessionDay::Thursday => write!(f, "thursday"),
            SessionDay::Friday => write!(f, "friday"),
        }
    }
}
