use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("lookup_batch_size must be between 1 and {max}, got {got}")]
    LookupBatchSize { got: usize, max: usize },

    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Failed to read store '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write store '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed store document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Lookup of {got} keys exceeds the limit of {max} per call")]
    BatchTooLarge { got: usize, max: usize },

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

#[derive(Error, Debug, PartialEq)]
pub enum BoardError {
    #[error("No row at position {0}")]
    NoSuchRow(usize),

    #[error("Participant '{participant}' is not in row {row}")]
    UnknownParticipant { row: usize, participant: String },

    #[error("Coordinator '{0}' is not in the roster")]
    UnknownCoordinator(String),

    #[error("Date {0} falls on a weekend")]
    WeekendDate(chrono::NaiveDate),
}

#[derive(Error, Debug, PartialEq)]
pub enum CommitError {
    #[error("No participants selected for commit")]
    NoParticipants,

    #[error("Recurring session '{title}' on {date} needs a subtitle before it can be approved")]
    MissingSubtitle {
        title: String,
        date: chrono::NaiveDate,
    },

    #[error("Failed to acquire write slot: {0}")]
    Semaphore(String),
}

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to create output directory: {0}")]
    CreateDir(std::io::Error),

    #[error("Failed to write report: {0}")]
    WriteReport(std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
