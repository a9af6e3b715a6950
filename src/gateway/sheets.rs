//! Google Sheets values API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::StoreSettings;
use crate::error::{LedgerError, LedgerResult};

use super::store::SheetStore;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Default, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
struct AppendBody<'a> {
    values: [&'a [String]; 1],
}

fn cell_text(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// A [`SheetStore`] backed by the Google Sheets v4 values API, authenticated
/// with an API key.
#[derive(Debug, Clone)]
pub struct GoogleSheetsClient {
    http: reqwest::Client,
    base_url: Url,
    spreadsheet_id: String,
    api_key: String,
}

impl GoogleSheetsClient {
    /// Creates a client for the spreadsheet named in `settings`.
    ///
    /// Fails with [`LedgerError::InvalidConfig`] when the base URL is not an
    /// absolute http(s) URL or the spreadsheet id is empty.
    pub fn new(settings: &StoreSettings, api_key: impl Into<String>) -> LedgerResult<Self> {
        let base_url = Url::parse(&settings.base_url).map_err(|e| LedgerError::InvalidConfig {
            field: "base_url".to_string(),
            message: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(LedgerError::InvalidConfig {
                field: "base_url".to_string(),
                message: format!("'{}' is not an http(s) base URL", settings.base_url),
            });
        }

        let spreadsheet_id = settings.spreadsheet_id().to_string();
        if spreadsheet_id.is_empty() {
            return Err(LedgerError::InvalidConfig {
                field: "spreadsheet_id".to_string(),
                message: "no spreadsheet id configured".to_string(),
            });
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| LedgerError::InvalidConfig {
                field: "base_url".to_string(),
                message: format!("could not build HTTP client: {e}"),
            })?;

        Ok(Self {
            http,
            base_url,
            spreadsheet_id,
            api_key: api_key.into(),
        })
    }

    /// Creates a client using the API key from the environment variable
    /// named by `settings.api_key_env`.
    pub fn from_settings(settings: &StoreSettings) -> LedgerResult<Self> {
        let api_key = settings.api_key().ok_or_else(|| LedgerError::InvalidConfig {
            field: "api_key_env".to_string(),
            message: format!("environment variable '{}' is not set", settings.api_key_env),
        })?;
        Self::new(settings, api_key)
    }

    /// Returns the spreadsheet this client talks to.
    pub fn spreadsheet_id(&self) -> &str {
        &self.spreadsheet_id
    }

    /// Builds `{base}/{spreadsheet}/values/{range}{suffix}`.
    ///
    /// The range is percent-encoded as a single path segment, so sheet names
    /// may contain spaces, quotes and non-ASCII text.
    pub fn values_url(&self, range: &str, suffix: &str) -> LedgerResult<Url> {
        let target = format!("{range}{suffix}");
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| LedgerError::InvalidConfig {
                field: "base_url".to_string(),
                message: "base URL cannot hold path segments".to_string(),
            })?
            .pop_if_empty()
            .extend([self.spreadsheet_id.as_str(), "values", target.as_str()]);
        Ok(url)
    }

    fn transport_error(range: &str, error: reqwest::Error) -> LedgerError {
        LedgerError::Gateway {
            range: range.to_string(),
            message: error.to_string(),
        }
    }

    fn check_status(range: &str, response: &reqwest::Response) -> LedgerResult<()> {
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        warn!(range, status = status.as_u16(), "Spreadsheet request rejected");
        Err(LedgerError::UnexpectedStatus {
            range: range.to_string(),
            status: status.as_u16(),
        })
    }
}

#[async_trait]
impl SheetStore for GoogleSheetsClient {
    async fn read_range(&self, range: &str) -> LedgerResult<Vec<Vec<String>>> {
        let url = self.values_url(range, "")?;
        debug!(range, "Reading sheet range");

        let response = self
            .http
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| Self::transport_error(range, e))?;
        Self::check_status(range, &response)?;

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| Self::transport_error(range, e))?;

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_text).collect())
            .collect())
    }

    async fn append_row(&self, range: &str, row: Vec<String>) -> LedgerResult<()> {
        let url = self.values_url(range, ":append")?;
        debug!(range, cells = row.len(), "Appending sheet row");

        let response = self
            .http
            .post(url)
            .query(&[
                ("valueInputOption", "RAW"),
                ("key", self.api_key.as_str()),
            ])
            .json(&AppendBody { values: [&row] })
            .send()
            .await
            .map_err(|e| Self::transport_error(range, e))?;
        Self::check_status(range, &response)
    }
}
