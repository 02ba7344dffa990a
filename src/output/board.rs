use crate::state::Board;

/// Plain-text table of the board, one line per row, positions 1-based
pub fn render_board(board: &Board) -> String {
    let mut out = String::new();

    if board.is_empty() {
        out.push_str("No proposed sessions. Run `incusched suggest` to create some.\n");
        return out;
    }

    if let Some(planned_from) = board.planned_from {
        out.push_str(&format!("Proposed sessions (planned from {})\n\n", planned_from));
    }

    for (idx, row) in board.rows.iter().enumerate() {
        let coordinator = row
            .coordinator()
            .map(|c| c.name.as_str())
            .or(row.coordinator_id.as_deref())
            .unwrap_or("-");
        out.push_str(&format!(
            "{:>3}. {} {} [{}] {} ({} participant{}) coordinator: {}\n",
            idx + 1,
            row.date.format("%a %Y-%m-%d"),
            row.intervention_title,
            row.kind,
            row.area_of_support,
            row.participants.len(),
            if row.participants.len() == 1 { "" } else { "s" },
            coordinator,
        ));

        if row.is_recurring {
            let frequency = row.frequency.as_deref().unwrap_or("recurring");
            if row.needs_subtitle() {
                out.push_str(&format!("     {} - subtitle required before approval\n", frequency));
            } else {
                out.push_str(&format!("     {} - {}\n", frequency, row.subtitle));
            }
        }

        let names: Vec<String> = row
            .participants
            .iter()
            .map(|p| format!("{} ({})", p.name, p.id))
            .collect();
        out.push_str(&format!("     {}\n", names.join(", ")));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::types::{ParticipantRef, RowKey, RowSlot, SessionKind, SuggestionRow};
    use crate::store::InterventionId;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_board_hint() {
        assert!(render_board(&Board::default()).contains("incusched suggest"));
    }

    #[test]
    fn test_flags_missing_subtitle() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        let row = SuggestionRow {
            key: RowKey {
                intervention_id: InterventionId::new("i1"),
                slot: RowSlot::Single("p1".to_string()),
                date,
            },
            intervention_id: InterventionId::new("i1"),
            intervention_title: "Mentoring".to_string(),
            area_of_support: "Leadership".to_string(),
            kind: SessionKind::Singular,
            participants: vec![ParticipantRef {
                id: "p1".to_string(),
                name: "Kasi Foods".to_string(),
            }],
            date,
            coordinator_id: None,
            ranked_coordinators: vec![],
            is_recurring: true,
            frequency: Some("Monthly".to_string()),
            subtitle: String::new(),
        };
        let text = render_board(&Board::new(vec![row], date));
        assert!(text.contains("  1. Tue 2026-10-20 Mentoring [singular]"));
        assert!(text.contains("(1 participant)"));
        assert!(text.contains("Monthly - subtitle required"));
        assert!(text.contains("Kasi Foods (p1)"));
    }
}
