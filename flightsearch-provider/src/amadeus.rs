use std::sync::Arc;
use std::time::Duration;
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use tracing::{error, info};
use flightsearch_core::{
    AccessTokenSource, AirportSearchQuery, AirportSummary, CoreError, CoreResult, FlightDataProvider,
    FlightOfferParams, FlightSearchQuery,
};
use crate::app_config::AmadeusConfig;

pub const FLIGHT_OFFERS_PATH: &str = "/v2/shopping/flight-offers";
pub const LOCATIONS_PATH: &str = "/v1/reference-data/locations";

/// Shared HTTP client for every call to the provider, token exchange included.
pub fn build_http_client(config: &AmadeusConfig) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_seconds))
        .build()
}

/// Flight and airport search against the Amadeus self-service API.
pub struct AmadeusClient {
    http: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn AccessTokenSource>,
}

impl AmadeusClient {
    pub fn new(http: reqwest::Client, base_url: &str, tokens: Arc<dyn AccessTokenSource>) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    async fn get(&self, operation: &str, path: &str, params: &[(&str, String)]) -> CoreResult<String> {
        let token = self.tokens.get_valid_token().await?;

        let response = self
            .http
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(token)
            .header(ACCEPT, "application/json")
            .query(params)
            .send()
            .await
            .map_err(|e| {
                error!("{}: provider unreachable: {}", operation, e);
                CoreError::provider(format!("{} failed: provider unreachable", operation))
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("{}: failed to read provider response: {}", operation, e);
            CoreError::ProviderError {
                message: format!("{} failed: unreadable provider response", operation),
                status: Some(status.as_u16()),
                body: None,
            }
        })?;

        if !status.is_success() {
            error!("{} failed. Status: {}", operation, status.as_u16());
            return Err(CoreError::ProviderError {
                message: format!("{} failed", operation),
                status: Some(status.as_u16()),
                body: Some(body),
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl FlightDataProvider for AmadeusClient {
    async fn search_flights(&self, query: &FlightSearchQuery) -> CoreResult<String> {
        let params = query.validate()?;
        info!(
            "Searching flights {} -> {} on {}",
            params.origin, params.destination, params.departure_date
        );
        self.get("flight search", FLIGHT_OFFERS_PATH, &flight_offer_params(&params))
            .await
    }

    async fn search_airports(&self, keyword: &str) -> CoreResult<Vec<AirportSummary>> {
        let query = AirportSearchQuery::new(keyword)?;
        info!("Searching airports matching '{}'", query.keyword());

        let params = [
            ("subType", "AIRPORT".to_string()),
            ("keyword", query.keyword().to_string()),
        ];
        let body = self.get("airport search", LOCATIONS_PATH, &params).await?;
        parse_airports(&body)
    }
}

/// Query string for the flight-offers endpoint. Optional values are left out entirely
/// when absent, never sent empty.
pub fn flight_offer_params(params: &FlightOfferParams) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("originLocationCode", params.origin.clone()),
        ("destinationLocationCode", params.destination.clone()),
        ("departureDate", params.departure_date.format("%Y-%m-%d").to_string()),
        ("adults", params.adults.max(1).to_string()),
    ];

    if params.children > 0 {
        query.push(("children", params.children.to_string()));
    }
    if let Some(return_date) = params.return_date {
        query.push(("returnDate", return_date.format("%Y-%m-%d").to_string()));
    }
    query.push(("currencyCode", params.currency.clone()));
    if let Some(non_stop) = params.non_stop {
        query.push(("nonStop", non_stop.to_string()));
    }
    if let Some(limit) = params.page_limit {
        query.push(("page[limit]", limit.to_string()));
    }
    if let Some(offset) = params.page_offset {
        query.push(("page[offset]", offset.to_string()));
    }

    query
}

/// Pull `"IATA (Name)"` entries out of a locations response. Records without an
/// IATA code or a name are skipped.
pub fn parse_airports(body: &str) -> CoreResult<Vec<AirportSummary>> {
    let root: Value = serde_json::from_str(body).map_err(|e| {
        error!("Airport search returned invalid JSON: {}", e);
        CoreError::provider("unexpected response shape")
    })?;

    let records = root
        .get("data")
        .and_then(Value::as_array)
        .ok_or_else(|| CoreError::provider("unexpected response shape"))?;

    let airports = records
        .iter()
        .filter_map(|record| {
            let iata_code = record.get("iataCode").and_then(Value::as_str).filter(|s| !s.is_empty())?;
            let name = record.get("name").and_then(Value::as_str).filter(|s| !s.is_empty())?;
            Some(AirportSummary {
                iata_code: iata_code.to_string(),
                name: name.to_string(),
            })
        })
        .collect();

    Ok(airports)
}
