use crate::cli::{load_config, today_or, ApproveArgs};
use crate::commit::{validate_rows, Committer};
use crate::output::write_commit_summary;
use crate::planner::SuggestionRow;
use crate::state::Board;
use crate::store::{DocumentStore, FileStore};
use std::path::Path;
use std::sync::Arc;
use tracing::{error, info, warn};

pub async fn execute(config_path: &Path, args: ApproveArgs) -> anyhow::Result<()> {
    let mut config = load_config(config_path, args.store.clone())?;
    if let Some(concurrency) = args.concurrency {
        config.concurrency = concurrency;
    }
    if let Some(submitter) = args.as_user.clone() {
        config.submitter = submitter;
    }

    let board_path = config.board_path();
    let board = Board::load(&board_path);

    let rows: Vec<SuggestionRow> = if args.all {
        board.rows.clone()
    } else if args.row.is_empty() {
        anyhow::bail!("Pass --row N (repeatable) or --all");
    } else {
        board.select(&args.row)?
    };

    // Reject before opening the store so nothing is written
    validate_rows(&rows)?;

    let store: Arc<dyn DocumentStore> = Arc::new(FileStore::open(&config.store)?);
    let committer = Committer::new(
        store,
        config.concurrency,
        config.retry.clone(),
        config.submitter.clone(),
    );
    let report = committer.commit(&rows).await?;
    let counts = report.counts();

    match write_commit_summary(
        &config.report_dir,
        today_or(args.today),
        &report,
        &config.submitter.id,
    ) {
        Ok(path) => info!("Wrote commit summary: {:?}", path),
        Err(e) => warn!("Failed to write commit summary: {}", e),
    }

    let remaining = board.without(&report.committed_rows());
    if let Err(e) = remaining.save(&board_path) {
        warn!("Failed to save board: {}", e);
    }

    println!(
        "Done: {} created, {} duplicate, {} failed ({} sessions left on the board)",
        counts.created,
        counts.duplicate,
        counts.failed,
        remaining.rows.len()
    );
    for id in report.entry_ids() {
        println!("  {}", id);
    }

    if counts.failed > 0 {
        error!("{} calendar entries could not be written", counts.failed);
        std::process::exit(1);
    }

    Ok(())
}
