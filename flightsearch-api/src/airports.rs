use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use flightsearch_core::FlightDataProvider;
use serde::Deserialize;
use crate::{error::AppError, state::AppState};

#[derive(Debug, Deserialize)]
pub struct AirportSearchParams {
    pub keyword: Option<String>,
}

pub fn routes() -> Router<AppState> {
    Router::new().route("/buscar-aero", get(search_airports))
}

/// GET /buscar-aero?keyword=
/// JSON array of `"IATA (Name)"` strings.
async fn search_airports(
    State(state): State<AppState>,
    Query(params): Query<AirportSearchParams>,
) -> Result<Json<Vec<String>>, AppError> {
    let keyword = params.keyword.unwrap_or_default();
    let airports = state.provider.search_airports(&keyword).await?;
    Ok(Json(airports.iter().map(ToString::to_string).collect()))
}
