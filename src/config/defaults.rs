use std::path::PathBuf;

use super::types::SessionDay;

pub fn default_version() -> u32 {
    1
}

pub fn default_store() -> PathBuf {
    PathBuf::from("incubation.json")
}

pub fn default_state_dir() -> PathBuf {
    PathBuf::from(".incusched")
}

pub fn default_report_dir() -> PathBuf {
    PathBuf::from("reports")
}

pub fn default_concurrency() -> usize {
    4
}

/// The backing query accepts at most ten keys per call
pub fn default_lookup_batch_size() -> usize {
    10
}

pub fn default_max_batches() -> usize {
    3
}

pub fn default_grouped_day() -> SessionDay {
    SessionDay::Tuesday
}

pub fn default_keyword_weight() -> f64 {
    2.0
}

pub fn default_max_attempts() -> u32 {
    3
}

pub fn default_backoff_base_ms() -> u64 {
    200
}

pub fn default_submitter_id() -> String {
    "operations".to_string()
}

pub fn default_submitter_name() -> String {
    "Operations".to_string()
}
