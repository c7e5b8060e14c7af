//! Index command - embeds characters into the search index

use clap::Args;
use tracing::info;

#[derive(Debug, Args)]
pub struct IndexArgs {
    /// Character ids to index, comma separated (defaults to 1-50)
    #[arg(long, value_delimiter = ',')]
    pub ids: Option<Vec<i64>>,
}

pub async fn run(args: IndexArgs) -> anyhow::Result<()> {
    let config = super::bootstrap();
    let state = crate::create_app_state(&config).await?;

    let report = state.search()?.index_characters(args.ids).await;

    info!(
        indexed = report.indexed_count,
        failed = report.errors.len(),
        "Indexing complete"
    );
    println!("{}", serde_json::to_string_pretty(&report)?);

    Ok(())
}
