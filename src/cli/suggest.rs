use crate::cli::{load_config, today_or, SuggestArgs};
use crate::output::render_board;
use crate::planner::{propose, ScheduleOptions};
use crate::state::Board;
use crate::store::FileStore;
use std::path::Path;
use tracing::{debug, info};

pub async fn execute(config_path: &Path, args: SuggestArgs) -> anyhow::Result<()> {
    let config = load_config(config_path, args.store)?;
    let today = today_or(args.today);
    let board_path = config.board_path();

    let existing = Board::load(&board_path);
    if !existing.is_empty() && !args.force && !args.dry_run {
        anyhow::bail!(
            "{} proposed sessions are still on the board. Approve them, run `incusched reset`, or pass --force",
            existing.rows.len()
        );
    }

    info!("Reading participants from {:?}", config.store);
    let store = FileStore::open(&config.store)?;
    let options = ScheduleOptions::from(&config.scheduling);
    let proposal = propose(&store, &options, config.lookup_batch_size, today).await?;

    for cluster in &proposal.clusters {
        debug!("{}: {} participants", cluster.title, cluster.demand());
    }
    let board = Board::new(proposal.rows, today);
    print!("{}", render_board(&board));

    if args.dry_run {
        info!("DRY RUN - board not saved");
        return Ok(());
    }

    board.save(&board_path)?;
    info!("Saved {} proposed sessions to {:?}", board.rows.len(), board_path);
    Ok(())
}
