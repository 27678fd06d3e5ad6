//! Command line configuration.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use url::Url;

use crate::api::{DataSource, DEFAULT_SHEET_URL};
use crate::navigation::{resolve_location, DEFAULT_BASE};

/// Terminal dashboard for a spreadsheet-backed project portfolio
#[derive(Debug, Parser)]
#[command(name = "portfolio-tui", version, about)]
pub struct Cli {
    /// Published CSV URL of the portfolio sheet
    #[arg(long, default_value = DEFAULT_SHEET_URL)]
    pub sheet_url: String,

    /// Relay prefix; the sheet URL is appended percent-encoded
    #[arg(long)]
    pub relay: Option<String>,

    /// Read the sheet from a local CSV export instead of the network
    #[arg(long, conflicts_with_all = ["sheet_url", "relay"])]
    pub file: Option<PathBuf>,

    /// Initial location, e.g. `?p=7` to open project 7 on start
    #[arg(long)]
    pub location: Option<String>,

    /// Log file (defaults to the user cache directory)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Print the parsed dataset as JSON and exit
    #[arg(long)]
    pub dump: bool,
}

/// Validated runtime configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub source: DataSource,
    pub location: Url,
    pub log_file: PathBuf,
    pub dump: bool,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let source = match cli.file {
            Some(path) => DataSource::File(path),
            None => {
                Url::parse(&cli.sheet_url)
                    .with_context(|| format!("Invalid sheet URL: {}", cli.sheet_url))?;
                DataSource::Remote {
                    url: cli.sheet_url,
                    relay: cli.relay,
                }
            }
        };

        let location = resolve_location(cli.location.as_deref().unwrap_or(DEFAULT_BASE))
            .context("Invalid --location")?;

        Ok(Self {
            source,
            location,
            log_file: cli.log_file.unwrap_or_else(default_log_file),
            dump: cli.dump,
        })
    }
}

fn default_log_file() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("portfolio-tui")
        .join("portfolio-tui.log")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn config(args: &[&str]) -> Result<Config> {
        let argv = std::iter::once("portfolio-tui").chain(args.iter().copied());
        Config::from_cli(Cli::try_parse_from(argv)?)
    }

    #[test]
    fn test_defaults() {
        let cfg = config(&[]).unwrap();
        assert_eq!(
            cfg.source,
            DataSource::Remote {
                url: DEFAULT_SHEET_URL.to_string(),
                relay: None
            }
        );
        assert_eq!(cfg.location.as_str(), DEFAULT_BASE);
        assert!(cfg.log_file.ends_with("portfolio-tui.log"));
        assert!(!cfg.dump);
    }

    #[test]
    fn test_deep_link_location() {
        let cfg = config(&["--location", "?p=7"]).unwrap();
        assert_eq!(cfg.location.query(), Some("p=7"));
    }

    #[test]
    fn test_file_source_and_dump() {
        let cfg = config(&["--file", "sheet.csv", "--dump"]).unwrap();
        assert_eq!(cfg.source, DataSource::File(PathBuf::from("sheet.csv")));
        assert!(cfg.dump);
    }

    #[test]
    fn test_file_conflicts_with_relay() {
        assert!(config(&["--file", "sheet.csv", "--relay", "https://r/?"]).is_err());
    }

    #[test]
    fn test_rejects_bad_sheet_url() {
        assert!(config(&["--sheet-url", "not a url"]).is_err());
    }
}
