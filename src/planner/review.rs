use super::calendar::next_business_day;
use super::types::{session_subtitle, ParticipantRef, RowKey, RowSlot, SessionKind, SuggestionRow};
use crate::error::BoardError;
use chrono::NaiveDate;
use tracing::debug;

/// Editable copy of one row's participant list.
///
/// Removals only touch the working set; the board changes on `save`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewSession {
    position: usize,
    original: Vec<ParticipantRef>,
    working: Vec<ParticipantRef>,
}

impl ReviewSession {
    /// Open the row at 1-based `position`
    pub fn open(rows: &[SuggestionRow], position: usize) -> Result<Self, BoardError> {
        let row = row_at(rows, position)?;
        Ok(Self {
            position,
            original: row.participants.clone(),
            working: row.participants.clone(),
        })
    }

    #[cfg(test)]
    pub fn position(&self) -> usize {
        self.position
    }

    #[cfg(test)]
    pub fn working(&self) -> &[ParticipantRef] {
        &self.working
    }

    pub fn remove(&self, participant_id: &str) -> Result<Self, BoardError> {
        if !self.working.iter().any(|p| p.id == participant_id) {
            return Err(BoardError::UnknownParticipant {
                row: self.position,
                participant: participant_id.to_string(),
            });
        }
        Ok(Self {
            position: self.position,
            original: self.original.clone(),
            working: self
                .working
                .iter()
                .filter(|p| p.id != participant_id)
                .cloned()
                .collect(),
        })
    }

    /// Participants in the original list that are no longer in the working set
    pub fn removed(&self) -> Vec<ParticipantRef> {
        self.original
            .iter()
            .filter(|p| !self.working.iter().any(|w| w.id == p.id))
            .cloned()
            .collect()
    }

    /// Apply the review to `rows`.
    ///
    /// The reviewed row keeps the working set. Each removed participant gets a
    /// singular row on consecutive weekdays starting the first weekday after
    /// `today`. A row left with nobody in it is dropped.
    pub fn save(
        &self,
        rows: &[SuggestionRow],
        today: NaiveDate,
    ) -> Result<Vec<SuggestionRow>, BoardError> {
        let source = row_at(rows, self.position)?;
        let removed = self.removed();

        let mut updated = source.clone();
        updated.participants = self.working.clone();

        let mut next_rows: Vec<SuggestionRow> = Vec::with_capacity(rows.len() + removed.len());
        for (idx, row) in rows.iter().enumerate() {
            if idx + 1 == self.position {
                if !updated.participants.is_empty() {
                    next_rows.push(updated.clone());
                }
            } else {
                next_rows.push(row.clone());
            }
        }

        let mut cursor = today;
        for participant in removed {
            cursor = next_business_day(cursor);
            debug!(
                "Moving {} out of {} to a one-to-one on {}",
                participant.id, source.intervention_id, cursor
            );
            next_rows.push(singular_from(source, participant, cursor));
        }

        Ok(next_rows)
    }
}

fn singular_from(source: &SuggestionRow, participant: ParticipantRef, date: NaiveDate) -> SuggestionRow {
    SuggestionRow {
        key: RowKey {
            intervention_id: source.intervention_id.clone(),
            slot: RowSlot::Single(participant.id.clone()),
            date,
        },
        kind: SessionKind::Singular,
        participants: vec![participant],
        date,
        subtitle: if source.is_recurring {
            session_subtitle(date)
        } else {
            String::new()
        },
        ..source.clone()
    }
}

pub(crate) fn row_at(rows: &[SuggestionRow], position: usize) -> Result<&SuggestionRow, BoardError> {
    position
        .checked_sub(1)
        .and_then(|idx| rows.get(idx))
        .ok_or(BoardError::NoSuchRow(position))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::calendar::is_weekend;
    use crate::store::InterventionId;

    // Friday
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    fn grouped(ids: &[&str], recurring: bool) -> SuggestionRow {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        SuggestionRow {
            key: RowKey {
                intervention_id: InterventionId::new("i1"),
                slot: RowSlot::Batch(0),
                date,
            },
            intervention_id: InterventionId::new("i1"),
            intervention_title: "Pitch Coaching".to_string(),
            area_of_support: "Marketing".to_string(),
            kind: SessionKind::Grouped,
            participants: ids
                .iter()
                .map(|id| ParticipantRef {
                    id: id.to_string(),
                    name: id.to_uppercase(),
                })
                .collect(),
            date,
            coordinator_id: Some("c1".to_string()),
            ranked_coordinators: vec![],
            is_recurring: recurring,
            frequency: None,
            subtitle: "Session - 2026-10-20".to_string(),
        }
    }

    #[test]
    fn test_remove_does_not_touch_rows_until_save() {
        let rows = vec![grouped(&["a", "b", "c"], false)];
        let session = ReviewSession::open(&rows, 1).unwrap().remove("b").unwrap();
        assert_eq!(session.working().len(), 2);
        assert_eq!(rows[0].participants.len(), 3);
    }

    #[test]
    fn test_save_moves_removed_participant_to_singular_row() {
        let rows = vec![grouped(&["a", "b", "c"], false)];
        let session = ReviewSession::open(&rows, 1).unwrap().remove("b").unwrap();
        let saved = session.save(&rows, today()).unwrap();

        assert_eq!(saved.len(), 2);
        let ids: Vec<&str> = saved[0].participants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);

        let single = &saved[1];
        assert_eq!(single.kind, SessionKind::Singular);
        assert_eq!(single.participants[0].id, "b");
        assert_eq!(single.key.slot, RowSlot::Single("b".to_string()));
        // Friday → Monday
        assert_eq!(single.date, NaiveDate::from_ymd_opt(2026, 10, 19).unwrap());
        assert!(single.subtitle.is_empty());
        assert_eq!(single.coordinator_id.as_deref(), Some("c1"));
    }

    #[test]
    fn test_removed_participants_take_consecutive_weekdays() {
        let rows = vec![grouped(&["a", "b", "c", "d", "e", "f", "g"], true)];
        let mut session = ReviewSession::open(&rows, 1).unwrap();
        for id in ["b", "c", "d", "e", "f"] {
            session = session.remove(id).unwrap();
        }
        let saved = session.save(&rows, today()).unwrap();

        assert_eq!(saved[0].participants.len(), 2);
        let singles: Vec<&SuggestionRow> = saved[1..].iter().collect();
        assert_eq!(singles.len(), 5);

        let dates: Vec<NaiveDate> = singles.iter().map(|r| r.date).collect();
        let expected: Vec<NaiveDate> = [19, 20, 21, 22, 23]
            .iter()
            .map(|d| NaiveDate::from_ymd_opt(2026, 10, *d).unwrap())
            .collect();
        assert_eq!(dates, expected);
        assert!(dates.iter().all(|d| !is_weekend(*d)));

        // Recurring source: subtitle follows each row's own date
        assert_eq!(singles[0].subtitle, "Session - 2026-10-19");
        assert_eq!(singles[4].subtitle, "Session - 2026-10-23");
    }

    #[test]
    fn test_weekday_walk_crosses_weekend() {
        let rows = vec![grouped(&["a", "b", "c", "d", "e", "f", "g"], false)];
        let mut session = ReviewSession::open(&rows, 1).unwrap();
        for id in ["a", "b", "c", "d", "e", "f"] {
            session = session.remove(id).unwrap();
        }
        let saved = session.save(&rows, today()).unwrap();
        // 19..23 then skip 24/25 → 26
        assert_eq!(
            saved.last().unwrap().date,
            NaiveDate::from_ymd_opt(2026, 10, 26).unwrap()
        );
    }

    #[test]
    fn test_save_without_removals_is_identity() {
        let rows = vec![grouped(&["a", "b"], false), grouped(&["c"], false)];
        let saved = ReviewSession::open(&rows, 2).unwrap().save(&rows, today()).unwrap();
        assert_eq!(saved, rows);
    }

    #[test]
    fn test_emptied_row_is_dropped() {
        let rows = vec![grouped(&["a"], false)];
        let saved = ReviewSession::open(&rows, 1)
            .unwrap()
            .remove("a")
            .unwrap()
            .save(&rows, today())
            .unwrap();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].kind, SessionKind::Singular);
    }

    #[test]
    fn test_unknown_row_and_participant() {
        let rows = vec![grouped(&["a"], false)];
        assert_eq!(
            ReviewSession::open(&rows, 0).unwrap_err(),
            BoardError::NoSuchRow(0)
        );
        assert_eq!(
            ReviewSession::open(&rows, 2).unwrap_err(),
            BoardError::NoSuchRow(2)
        );
        let err = ReviewSession::open(&rows, 1).unwrap().remove("zz").unwrap_err();
        assert_eq!(
            err,
            BoardError::UnknownParticipant {
                row: 1,
                participant: "zz".to_string()
            }
        );
    }
}
