use crate::config::Config;
use crate::output::render_board;
use crate::state::Board;

pub fn execute(config: &Config) -> anyhow::Result<()> {
    let board = Board::load(&config.board_path());
    print!("{}", render_board(&board));
    Ok(())
}
