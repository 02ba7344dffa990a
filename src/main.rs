use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

mod cli;
mod commit;
mod config;
mod error;
mod output;
mod planner;
mod state;
mod store;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing - only show logs with --verbose
    let filter = if cli.verbose {
        EnvFilter::new("incusched=debug")
    } else {
        EnvFilter::new("incusched=warn")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Suggest(args) => cli::suggest::execute(&cli.config, args).await,
        Commands::Show => cli::show::execute(&cli::load_config(&cli.config, None)?),
        Commands::Review(args) => cli::review::execute(&cli.config, args),
        Commands::Edit(args) => cli::edit::execute(&cli.config, args),
        Commands::Approve(args) => cli::approve::execute(&cli.config, args).await,
        Commands::Reset => cli::reset::execute(&cli::load_config(&cli.config, None)?),
        Commands::Schema => cli::schema::execute(),
    }
}
