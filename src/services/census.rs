use crate::config::CensusSettings;
use crate::core::normalize;
use crate::models::{Place, RawPlaceRow, StateCode};
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// ACS variables requested for every place: name, total population and
/// median household income
pub const PLACE_VARIABLES: &str = "NAME,B01003_001E,B19013_001E";

/// Errors that can occur when talking to the Census API
#[derive(Debug, Error)]
pub enum CensusError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Census API error: {0}")]
    Status(u16),

    #[error("Invalid response format: {0}")]
    Parse(String),
}

impl CensusError {
    /// HTTP status of a rejected request, if that is what failed
    pub fn status_code(&self) -> Option<u16> {
        match self {
            CensusError::Status(code) => Some(*code),
            CensusError::Request(err) => err.status().map(|s| s.as_u16()),
            CensusError::Parse(_) => None,
        }
    }
}

/// Census ACS API client
///
/// Fetches every place in a state with its population and median household
/// income, and hands the rows to the normalizer.
#[derive(Debug, Clone)]
pub struct CensusClient {
    settings: CensusSettings,
    client: Client,
}

impl CensusClient {
    /// Create a new Census client
    pub fn new(settings: CensusSettings) -> Result<Self, CensusError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;

        Ok(Self { settings, client })
    }

    /// URL listing all places of a state
    pub fn places_url(&self, state: StateCode) -> String {
        let mut url = format!(
            "{}/data/{}/{}?get={}&for={}&in={}",
            self.settings.endpoint.trim_end_matches('/'),
            self.settings.year,
            self.settings.dataset.trim_matches('/'),
            PLACE_VARIABLES,
            urlencoding::encode("place:*"),
            urlencoding::encode(&format!("state:{}", state.fips())),
        );

        if let Some(key) = self.settings.api_key.as_deref().filter(|k| !k.is_empty()) {
            url.push_str("&key=");
            url.push_str(&urlencoding::encode(key));
        }

        url
    }

    /// Fetch and normalize all places of a state
    pub async fn fetch_state_places(&self, state: StateCode) -> Result<Vec<Place>, CensusError> {
        let url = self.places_url(state);

        tracing::debug!("Fetching places for {} (FIPS {})", state, state.fips());

        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Census API returned {} for {}: {}", status, state, body.trim());
            return Err(CensusError::Status(status.as_u16()));
        }

        let body = response.text().await?;
        let rows = parse_rows(&body)?;
        let places = normalize(&rows);

        tracing::info!("Loaded {} places for {} ({} rows)", places.len(), state, rows.len());

        Ok(places)
    }
}

/// Decode a Census table response
///
/// The body is a JSON array of rows; the first row is the header and is
/// skipped. Cells may be strings, numbers or null. Missing cells read as
/// empty strings. A body that is not a JSON table, including an empty one,
/// is a parse error.
pub fn parse_rows(body: &str) -> Result<Vec<RawPlaceRow>, CensusError> {
    let table: Vec<Vec<Value>> = serde_json::from_str(body)
        .map_err(|e| CensusError::Parse(format!("Failed to parse Census table: {}", e)))?;

    Ok(table
        .into_iter()
        .skip(1)
        .map(|row| RawPlaceRow {
            name: cell(&row, 0),
            population: cell(&row, 1),
            income: cell(&row, 2),
        })
        .collect())
}

fn cell(row: &[Value], index: usize) -> String {
    match row.get(index) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(number)) => number.to_string(),
        _ => String::new(),
    }
}
