mod board;
mod summary;

pub use board::render_board;
pub use summary::write_commit_summary;
