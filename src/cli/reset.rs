use crate::config::Config;
use crate::state::Board;
use tracing::info;

pub fn execute(config: &Config) -> anyhow::Result<()> {
    let path = config.board_path();
    let board = Board::load(&path);
    if board.is_empty() {
        println!("Board is already empty");
        return Ok(());
    }

    Board::default().save(&path)?;
    info!("Discarded {} proposed sessions", board.rows.len());
    println!("Discarded {} proposed sessions", board.rows.len());
    Ok(())
}
