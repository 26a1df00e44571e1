use serde::Deserialize;
use chrono::NaiveDate;
use std::fmt;
use crate::{CoreError, CoreResult};

pub const DEFAULT_CURRENCY: &str = "USD";

/// Inbound flight search body, as posted by the frontend.
///
/// Every field is optional on the wire so that a missing airport or date surfaces as a
/// `ValidationError` instead of a deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSearchQuery {
    #[serde(rename = "departureAirport")]
    pub origin: Option<String>,
    #[serde(rename = "arrivalAirport")]
    pub destination: Option<String>,
    pub departure_date: Option<String>,
    pub return_date: Option<String>,
    #[serde(default)]
    pub adults: i32,
    #[serde(default)]
    pub children: i32,
    #[serde(rename = "currencyCode")]
    pub currency: Option<String>,
    pub non_stop: Option<bool>,
    pub page_limit: Option<u32>,
    pub page_offset: Option<u32>,
}

/// A flight search that passed validation, with defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightOfferParams {
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub return_date: Option<NaiveDate>,
    pub adults: u32,
    pub children: u32,
    pub currency: String,
    pub non_stop: Option<bool>,
    pub page_limit: Option<u32>,
    pub page_offset: Option<u32>,
}

impl FlightSearchQuery {
    pub fn validate(&self) -> CoreResult<FlightOfferParams> {
        let origin = required(&self.origin, "departureAirport")?;
        let destination = required(&self.destination, "arrivalAirport")?;
        let departure_date = parse_date(&required(&self.departure_date, "departureDate")?, "departureDate")?;

        let return_date = match non_blank(&self.return_date) {
            Some(raw) => Some(parse_date(&raw, "returnDate")?),
            None => None,
        };

        let currency = non_blank(&self.currency).unwrap_or_else(|| DEFAULT_CURRENCY.to_string());

        Ok(FlightOfferParams {
            origin,
            destination,
            departure_date,
            return_date,
            adults: self.adults.max(1) as u32,
            children: self.children.max(0) as u32,
            currency,
            non_stop: self.non_stop,
            page_limit: self.page_limit,
            page_offset: self.page_offset,
        })
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn required(value: &Option<String>, field: &str) -> CoreResult<String> {
    non_blank(value).ok_or_else(|| CoreError::ValidationError(format!("{} is required", field)))
}

fn parse_date(raw: &str, field: &str) -> CoreResult<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
        CoreError::ValidationError(format!("{} must be a date in YYYY-MM-DD format, got '{}'", field, raw))
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportSearchQuery {
    keyword: String,
}

impl AirportSearchQuery {
    pub fn new(keyword: &str) -> CoreResult<Self> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(CoreError::ValidationError("keyword must not be empty".to_string()));
        }
        Ok(Self { keyword: keyword.to_string() })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AirportSummary {
    pub iata_code: String,
    pub name: String,
}

impl fmt::Display for AirportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.iata_code, self.name)
    }
}
