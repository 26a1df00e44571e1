use std::sync::Arc;
use flightsearch_core::{AccessTokenSource, FlightDataProvider};

#[derive(Clone)]
pub struct AppState {
    pub tokens: Arc<dyn AccessTokenSource>,
    pub provider: Arc<dyn FlightDataProvider>,
    /// CORS origin for the frontend; any origin when `None`.
    pub allowed_origin: Option<String>,
}
