//! The suggestion board: proposed sessions kept between commands.
//!
//! Every command returns a new board; callers persist it in one write once the
//! command has succeeded, so a rejected edit never leaves a half-applied board.

use crate::error::BoardError;
use crate::planner::calendar::is_weekend;
use crate::planner::review::row_at;
use crate::planner::types::session_subtitle;
use crate::planner::{ReviewSession, RowKey, SuggestionRow};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::warn;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Board {
    #[serde(default)]
    pub generated_at: Option<DateTime<Utc>>,

    /// The "today" the proposal was computed for
    #[serde(default)]
    pub planned_from: Option<NaiveDate>,

    #[serde(default)]
    pub rows: Vec<SuggestionRow>,
}

impl Board {
    pub fn new(rows: Vec<SuggestionRow>, planned_from: NaiveDate) -> Self {
        Self {
            generated_at: Some(Utc::now()),
            planned_from: Some(planned_from),
            rows,
        }
    }

    /// Load the board; a missing or unreadable file is an empty board
    pub fn load(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                warn!("Ignoring unreadable board {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row at 1-based `position`
    pub fn row(&self, position: usize) -> Result<&SuggestionRow, BoardError> {
        row_at(&self.rows, position)
    }

    /// Rows at `positions`, in the order given; repeated positions count once
    pub fn select(&self, positions: &[usize]) -> Result<Vec<SuggestionRow>, BoardError> {
        let mut seen = HashSet::new();
        let mut selected = Vec::new();
        for &position in positions {
            let row = self.row(position)?;
            if seen.insert(position) {
                selected.push(row.clone());
            }
        }
        Ok(selected)
    }

    /// Remove participants from a row, moving each into a one-to-one session
    pub fn review(
        &self,
        position: usize,
        remove: &[String],
        today: NaiveDate,
    ) -> Result<Self, BoardError> {
        let mut session = ReviewSession::open(&self.rows, position)?;
        for participant_id in remove {
            session = session.remove(participant_id)?;
        }
        Ok(self.with_rows(session.save(&self.rows, today)?))
    }

    /// Assign one of the row's ranked coordinators
    pub fn assign_coordinator(&self, position: usize, coordinator_id: &str) -> Result<Self, BoardError> {
        let row = self.row(position)?;
        if !row.ranked_coordinators.iter().any(|c| c.id == coordinator_id) {
            return Err(BoardError::UnknownCoordinator(coordinator_id.to_string()));
        }
        self.edit(position, |row| row.coordinator_id = Some(coordinator_id.to_string()))
    }

    /// Move a row to another weekday
    pub fn reschedule(&self, position: usize, date: NaiveDate) -> Result<Self, BoardError> {
        if is_weekend(date) {
            return Err(BoardError::WeekendDate(date));
        }
        self.edit(position, |row| {
            // A generated subtitle follows the date; an operator's stays put.
            if row.subtitle == session_subtitle(row.date) {
                row.subtitle = session_subtitle(date);
            }
            row.date = date;
            row.key.date = date;
        })
    }

    pub fn set_subtitle(&self, position: usize, subtitle: &str) -> Result<Self, BoardError> {
        let subtitle = subtitle.trim().to_string();
        self.edit(position, |row| row.subtitle = subtitle)
    }

    /// Drop rows that have been committed
    pub fn without(&self, committed: &[RowKey]) -> Self {
        let committed: HashSet<&RowKey> = committed.iter().collect();
        self.with_rows(
            self.rows
                .iter()
                .filter(|row| !committed.contains(&row.key))
                .cloned()
                .collect(),
        )
    }

    fn edit<F>(&self, position: usize, apply: F) -> Result<Self, BoardError>
    where
        F: FnOnce(&mut SuggestionRow),
    {
        self.row(position)?;
        let mut rows = self.rows.clone();
        apply(&mut rows[position - 1]);
        Ok(self.with_rows(rows))
    }

    fn with_rows(&self, rows: Vec<SuggestionRow>) -> Self {
        Self {
            generated_at: self.generated_at,
            planned_from: self.planned_from,
            rows,
        }
    }
}
