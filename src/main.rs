use clap::Parser;
use multiverse_atlas::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Index(args) => cli::index::run(args).await,
        Command::Search(args) => cli::search::run(args).await,
        Command::Cache(args) => cli::cache::run(args).await,
    }
}
