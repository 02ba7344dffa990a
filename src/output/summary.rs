use crate::commit::{CommitReport, EntryStatus};
use crate::error::OutputError;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize)]
pub struct CommitSummary {
    pub timestamp: String,
    pub batch_id: String,
    pub submitted_by: String,
    pub duration_sec: f64,
    pub created: usize,
    pub duplicate: usize,
    pub failed: usize,
    pub entries: Vec<EntrySummary>,
    pub exit_code: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EntrySummary {
    pub id: String,
    pub participant: String,
    pub intervention: String,
    pub date: NaiveDate,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Write `commit-<batch>.json` and `.md` under `report_dir/<date>/`.
/// Returns the JSON path.
pub fn write_commit_summary(
    report_dir: &Path,
    date: NaiveDate,
    report: &CommitReport,
    submitted_by: &str,
) -> Result<PathBuf, OutputError> {
    let dir = report_dir.join(date.format("%Y-%m-%d").to_string());
    fs::create_dir_all(&dir).map_err(OutputError::CreateDir)?;

    let summary = build_summary(report, submitted_by);
    let stem = format!("commit-{}", &summary.batch_id[..8]);

    let json_path = dir.join(format!("{}.json", stem));
    let json = serde_json::to_string_pretty(&summary)?;
    fs::write(&json_path, json).map_err(OutputError::WriteReport)?;

    let md_path = dir.join(format!("{}.md", stem));
    fs::write(&md_path, build_summary_markdown(&summary)).map_err(OutputError::WriteReport)?;

    Ok(json_path)
}

fn build_summary(report: &CommitReport, submitted_by: &str) -> CommitSummary {
    let counts = report.counts();
    let entries = report
        .results
        .iter()
        .map(|result| {
            let (status, error) = match &result.status {
                EntryStatus::Created => ("created".to_string(), None),
                EntryStatus::Duplicate => ("duplicate".to_string(), None),
                EntryStatus::Failed { error } => ("failed".to_string(), Some(error.clone())),
            };
            EntrySummary {
                id: result.entry_id.clone(),
                participant: result.participant_name.clone(),
                intervention: result.intervention_title.clone(),
                date: result.target_date,
                status,
                error,
            }
        })
        .collect();

    CommitSummary {
        timestamp: Utc::now().to_rfc3339(),
        batch_id: report.batch_id.to_string(),
        submitted_by: submitted_by.to_string(),
        duration_sec: report.duration.as_secs_f64(),
        created: counts.created,
        duplicate: counts.duplicate,
        failed: counts.failed,
        entries,
        exit_code: if counts.failed > 0 { 1 } else { 0 },
    }
}

fn build_summary_markdown(summary: &CommitSummary) -> String {
    let mut md = String::new();

    md.push_str("# incusched Commit Summary\n\n");
    md.push_str(&format!("**Generated:** {}\n", summary.timestamp));
    md.push_str(&format!("**Batch:** {}\n", summary.batch_id));
    md.push_str(&format!("**Submitted by:** {}\n", summary.submitted_by));
    md.push_str(&format!("**Duration:** {:.1}s\n\n", summary.duration_sec));

    md.push_str("## Totals\n\n");
    md.push_str("| Status | Count |\n");
    md.push_str("|--------|-------|\n");
    md.push_str(&format!("| Created | {} |\n", summary.created));
    md.push_str(&format!("| Duplicate (overwritten) | {} |\n", summary.duplicate));
    md.push_str(&format!("| Failed | {} |\n\n", summary.failed));

    md.push_str("## Entries\n\n");
    md.push_str("| Date | Intervention | Participant | Status |\n");
    md.push_str("|------|--------------|-------------|--------|\n");

    for entry in &summary.entries {
        let status_icon = match entry.status.as_str() {
            "created" => "✅",
            "duplicate" => "♻️",
            "failed" => "❌",
            _ => "❓",
        };
        let status = match &entry.error {
            Some(error) => format!("{} {} ({})", status_icon, entry.status, error),
            None => format!("{} {}", status_icon, entry.status),
        };
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            entry.date, entry.intervention, entry.participant, status
        ));
    }

    if summary.failed > 0 {
        md.push_str("\n## Failed Entries\n\n");
        md.push_str("Failed sessions stay on the board; approve them again to retry.\n");
    }

    md
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commit::EntryResult;
    use crate::planner::types::{RowKey, RowSlot};
    use crate::store::InterventionId;
    use std::time::Duration;
    use uuid::Uuid;

    fn result(participant: &str, status: EntryStatus) -> EntryResult {
        let date = NaiveDate::from_ymd_opt(2026, 10, 20).unwrap();
        EntryResult {
            row: RowKey {
                intervention_id: InterventionId::new("i1"),
                slot: RowSlot::Batch(0),
                date,
            },
            entry_id: format!("ind-{participant}"),
            participant_id: participant.to_string(),
            participant_name: participant.to_uppercase(),
            intervention_title: "Cash Flow".to_string(),
            target_date: date,
            status,
        }
    }

    #[test]
    fn test_writes_json_and_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let report = CommitReport {
            batch_id: Uuid::new_v4(),
            results: vec![
                result("a", EntryStatus::Created),
                result("b", EntryStatus::Duplicate),
                result(
                    "c",
                    EntryStatus::Failed {
                        error: "store unavailable".to_string(),
                    },
                ),
            ],
            duration: Duration::from_millis(120),
        };
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let json_path = write_commit_summary(dir.path(), date, &report, "ops-1").unwrap();
        assert!(json_path.starts_with(dir.path().join("2026-10-16")));

        let summary: CommitSummary =
            serde_json::from_str(&fs::read_to_string(&json_path).unwrap()).unwrap();
        assert_eq!(summary.created, 1);
        assert_eq!(summary.duplicate, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exit_code, 1);
        assert_eq!(summary.entries[2].error.as_deref(), Some("store unavailable"));

        let md = fs::read_to_string(json_path.with_extension("md")).unwrap();
        assert!(md.contains("| Failed | 1 |"));
        assert!(md.contains("## Failed Entries"));
    }
}
