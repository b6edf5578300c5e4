mod config;
mod logging;
mod pipeline;
mod storage;

use alertsync_aws::create_client;
use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};

use crate::config::{Cli, Config};
use crate::storage::duckdb::DuckDbSink;
use crate::storage::dynamodb::DynamoDbSource;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from(Cli::parse());

    logging::init(config.log_format);

    info!(
        target_store = %config.aws.target_display(),
        table = %config.table_name,
        db_path = %config.db_path.display(),
        write_mode = %config.write_mode,
        "Starting alert migration"
    );

    let client = create_client(&config.aws).await;
    let source =
        DynamoDbSource::new(client, &config.table_name).with_page_size(config.page_size);
    info!(table = source.table_name(), "Source ready");

    let sink = DuckDbSink::open(&config.db_path)
        .await
        .with_context(|| format!("Failed to open {}", config.db_path.display()))?
        .with_write_mode(config.write_mode);

    let outcome = pipeline::run(&source, &sink, &config.pipeline).await;
    let closed = sink.close().await;

    match (outcome, closed) {
        (Ok(report), Ok(())) => {
            println!("{}", serde_json::to_string_pretty(&report)?);
            Ok(())
        }
        (Ok(_), Err(err)) => Err(err).context("Failed to close the DuckDB sink"),
        (Err(failure), closed) => {
            if let Err(err) = closed {
                error!(error = %err, "Failed to close the DuckDB sink");
            }
            Err(failure.into())
        }
    }
}
