use std::path::PathBuf;

use alertsync_aws::{AwsConfig, DEFAULT_REGION};
use clap::Parser;

use alertsync_core::pipeline::PipelineOptions;
use alertsync_core::storage::WriteMode;

use crate::logging::LogFormat;

/// alertsync - Copy monitoring alerts from DynamoDB into a local DuckDB file
#[derive(Parser, Debug)]
#[command(name = "alertsync")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// DynamoDB table to scan
    #[arg(long, default_value = "iris-alerts", env = "DYNAMODB_TABLE_NAME")]
    pub table_name: String,

    /// AWS region of the table
    #[arg(long, default_value = DEFAULT_REGION, env = "AWS_REGION")]
    pub region: String,

    /// Custom DynamoDB endpoint (e.g. a local DynamoDB)
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// DuckDB file to write into (created if missing)
    #[arg(long, default_value = "./iris-alerts.db", env = "DUCKDB_PATH")]
    pub db_path: PathBuf,

    /// Maximum number of items evaluated per scan page
    #[arg(long, env = "SCAN_PAGE_SIZE", value_parser = clap::value_parser!(i32).range(1..))]
    pub page_size: Option<i32>,

    /// Stop after this many pages even if the table has more
    #[arg(long, env = "SCAN_MAX_PAGES", value_parser = clap::value_parser!(u32).range(1..))]
    pub max_pages: Option<u32>,

    /// How to treat alerts already present in the sink (upsert or insert)
    #[arg(long, default_value = "upsert", env = "WRITE_MODE")]
    pub write_mode: WriteMode,

    /// Read the sink back after the migration
    #[arg(long, env = "VERIFY")]
    pub verify: bool,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Pretty, env = "LOG_FORMAT")]
    pub log_format: LogFormat,
}

/// Settings for one migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub aws: AwsConfig,
    pub table_name: String,
    pub db_path: PathBuf,
    pub page_size: Option<i32>,
    pub write_mode: WriteMode,
    pub pipeline: PipelineOptions,
    pub log_format: LogFormat,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            aws: AwsConfig::new(cli.region, cli.endpoint_url),
            table_name: cli.table_name,
            db_path: cli.db_path,
            page_size: cli.page_size,
            write_mode: cli.write_mode,
            pipeline: PipelineOptions {
                max_pages: cli.max_pages,
                verify: cli.verify,
            },
            log_format: cli.log_format,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, clap::Error> {
        let argv = std::iter::once("alertsync").chain(args.iter().copied());
        Cli::try_parse_from(argv).map(Config::from)
    }

    #[test]
    fn test_runs_without_arguments() {
        let config = parse(&[]).unwrap();

        if std::env::var("DYNAMODB_TABLE_NAME").is_err() {
            assert_eq!(config.table_name, "iris-alerts");
        }
        if std::env::var("AWS_REGION").is_err() {
            assert_eq!(config.aws.region, "us-east-1");
        }
        if std::env::var("DUCKDB_PATH").is_err() {
            assert_eq!(config.db_path, PathBuf::from("./iris-alerts.db"));
        }
        if std::env::var("WRITE_MODE").is_err() {
            assert_eq!(config.write_mode, WriteMode::Upsert);
        }
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--table-name",
            "alerts-dev",
            "--region",
            "eu-west-1",
            "--endpoint-url",
            "http://localhost:8000",
            "--db-path",
            "/tmp/alerts.db",
            "--page-size",
            "100",
            "--max-pages",
            "3",
            "--write-mode",
            "insert",
            "--verify",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(
            config,
            Config {
                aws: AwsConfig::new("eu-west-1", Some("http://localhost:8000".to_string())),
                table_name: "alerts-dev".to_string(),
                db_path: PathBuf::from("/tmp/alerts.db"),
                page_size: Some(100),
                write_mode: WriteMode::Insert,
                pipeline: PipelineOptions {
                    max_pages: Some(3),
                    verify: true,
                },
                log_format: LogFormat::Json,
            }
        );
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse(&["--write-mode", "merge"]).is_err());
        assert!(parse(&["--page-size", "0"]).is_err());
        assert!(parse(&["--max-pages", "0"]).is_err());
        assert!(parse(&["--log-format", "xml"]).is_err());
    }
}
