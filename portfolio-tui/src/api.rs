//! Data source client for the portfolio sheet.
//!
//! The dataset is fetched exactly once per session from a worker task. There
//! is no retry and no request timeout: if the single attempt fails the worker
//! reports the one-record fallback dataset instead.

use std::path::PathBuf;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::Client;
use thiserror::Error;
use tokio::sync::mpsc;

use crate::models::{fallback_dataset, ProjectRecord};
use crate::parser;

/// Published CSV export of the portfolio sheet
pub const DEFAULT_SHEET_URL: &str = "https://docs.google.com/spreadsheets/d/e/2PACX-1vRPyPDyOqjYsx0BUJU-y1YHMUR0_uZ2YtiYVclhVI0D_Ruc9nJ_82S1Q5megNOU2wv9Jyj-oRo3gzxm/pub?gid=0&single=true&output=csv";

/// Bytes left as-is when a URL is embedded as a single URI component
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Where the CSV text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// HTTP GET, optionally prefixed by a relay that takes the target URL
    /// percent-encoded as its tail
    Remote { url: String, relay: Option<String> },
    /// Local export of the sheet
    File(PathBuf),
}

impl DataSource {
    /// URL actually requested for a remote source
    pub fn request_url(&self) -> Option<String> {
        match self {
            DataSource::Remote { url, relay: Some(relay) } => {
                Some(format!("{}{}", relay, utf8_percent_encode(url, URI_COMPONENT)))
            }
            DataSource::Remote { url, relay: None } => Some(url.clone()),
            DataSource::File(_) => None,
        }
    }

    /// Short label for the status line and logs
    pub fn describe(&self) -> String {
        match self {
            DataSource::Remote { relay: Some(_), .. } => "sheet (via relay)".to_string(),
            DataSource::Remote { .. } => "sheet".to_string(),
            DataSource::File(path) => path.display().to_string(),
        }
    }
}

/// Why the dataset could not be loaded
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),
    #[error("server answered {0}")]
    Status(reqwest::StatusCode),
    #[error("could not read response body: {0}")]
    Body(#[source] reqwest::Error),
    #[error("could not read {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

/// Client for the sheet
#[derive(Debug, Clone)]
pub struct SheetClient {
    client: Client,
    source: DataSource,
}

impl SheetClient {
    pub fn new(source: DataSource) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!("portfolio-tui/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self { client, source })
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    /// Fetch the raw CSV text in a single attempt
    pub async fn fetch_text(&self) -> Result<String, FetchError> {
        let url = match &self.source {
            DataSource::File(path) => {
                return tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| FetchError::File {
                        path: path.clone(),
                        source,
                    });
            }
            remote => remote.request_url().unwrap_or_default(),
        };

        tracing::info!(%url, "fetching portfolio sheet");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(FetchError::Request)?;

        if !response.status().is_success() {
            return Err(FetchError::Status(response.status()));
        }

        response.text().await.map_err(FetchError::Body)
    }

    /// Fetch and parse. Any failure yields the fallback dataset.
    pub async fn load(&self) -> Loaded {
        match self.fetch_text().await {
            Ok(text) => {
                let records = parser::parse(&text);
                tracing::info!(records = records.len(), bytes = text.len(), "sheet parsed");
                Loaded {
                    records,
                    fallback_reason: None,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "sheet unavailable, using fallback dataset");
                let reason = e.to_string();
                Loaded {
                    records: fallback_dataset(&reason),
                    fallback_reason: Some(reason),
                }
            }
        }
    }
}

/// Result of the one load of the session
#[derive(Debug, Clone)]
pub struct Loaded {
    pub records: Vec<ProjectRecord>,
    /// Set when `records` is the fallback dataset
    pub fallback_reason: Option<String>,
}

/// Messages sent from the loader to the UI loop
#[derive(Debug, Clone)]
pub enum ApiMessage {
    /// The dataset (real or fallback) is ready
    DatasetLoaded(Loaded),
}

/// Run the single load and report it
pub async fn run_loader(client: SheetClient, tx: mpsc::Sender<ApiMessage>) {
    let loaded = client.load().await;
    if tx.send(ApiMessage::DatasetLoaded(loaded)).await.is_err() {
        tracing::debug!("UI loop gone before dataset arrived");
    }
}
