use crate::cli::{load_config, EditArgs};
use crate::output::render_board;
use crate::state::Board;
use std::path::Path;

pub fn execute(config_path: &Path, args: EditArgs) -> anyhow::Result<()> {
    if args.coordinator.is_none() && args.date.is_none() && args.subtitle.is_none() {
        anyhow::bail!("Nothing to change. Pass --coordinator, --date or --subtitle");
    }

    let config = load_config(config_path, None)?;
    let board_path = config.board_path();
    let mut board = Board::load(&board_path);

    // Applied to a working copy; nothing is saved unless every edit succeeds
    if let Some(coordinator) = &args.coordinator {
        board = board.assign_coordinator(args.row, coordinator)?;
    }
    if let Some(date) = args.date {
        board = board.reschedule(args.row, date)?;
    }
    if let Some(subtitle) = &args.subtitle {
        board = board.set_subtitle(args.row, subtitle)?;
    }

    board.save(&board_path)?;
    print!("{}", render_board(&board));
    Ok(())
}
