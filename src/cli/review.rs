use crate::cli::{load_config, today_or, ReviewArgs};
use crate::output::render_board;
use crate::state::Board;
use std::path::Path;
use tracing::info;

pub fn execute(config_path: &Path, args: ReviewArgs) -> anyhow::Result<()> {
    let config = load_config(config_path, None)?;
    let board_path = config.board_path();
    let board = Board::load(&board_path);

    let updated = board.review(args.row, &args.remove, today_or(args.today))?;
    updated.save(&board_path)?;

    info!(
        "Moved {} participants out of row {} into one-to-one sessions",
        args.remove.len(),
        args.row
    );
    print!("{}", render_board(&updated));
    Ok(())
}
