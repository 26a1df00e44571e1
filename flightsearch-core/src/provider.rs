use async_trait::async_trait;
use crate::{AirportSummary, CoreResult, FlightSearchQuery};

#[async_trait]
pub trait AccessTokenSource: Send + Sync {
    /// Return a bearer token that is valid right now, refreshing it if needed.
    async fn get_valid_token(&self) -> CoreResult<String>;
}

#[async_trait]
pub trait FlightDataProvider: Send + Sync {
    /// Search flight offers. The provider's response body is returned untouched.
    async fn search_flights(&self, query: &FlightSearchQuery) -> CoreResult<String>;

    /// Search airports by keyword, in the order the provider returns them.
    async fn search_airports(&self, keyword: &str) -> CoreResult<Vec<AirportSummary>>;
}
