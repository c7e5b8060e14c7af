//! Search command - ranks indexed characters against a query

use clap::Args;
use clap::builder::TypedValueParser;

use crate::infrastructure::services::DEFAULT_TOP_K;

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Free-text query
    pub query: String,

    /// Maximum number of results
    #[arg(long, default_value_t = DEFAULT_TOP_K, value_parser = clap::value_parser!(u16).range(1..=100).map(usize::from))]
    pub top_k: usize,
}

pub async fn run(args: SearchArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_app_state(&config).await?;

    let results = state.search()?.search(&args.query, args.top_k).await?;

    for (rank, result) in results.iter().enumerate() {
        println!(
            "{:>2}. {:<32} {:.4}  (#{})",
            rank + 1,
            result.character.name,
            result.similarity,
            result.character.id
        );
    }

    Ok(())
}
