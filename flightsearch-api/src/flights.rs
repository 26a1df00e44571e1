use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use flightsearch_core::{FlightDataProvider, FlightSearchQuery};
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/buscar-vuelos", post(search_flights))
}

/// POST /buscar-vuelos
/// Returns the provider's flight-offers document unchanged.
async fn search_flights(
    State(state): State<AppState>,
    payload: Result<Json<FlightSearchQuery>, JsonRejection>,
) -> Result<Response, AppError> {
    let Json(query) = payload.map_err(|e| AppError::ValidationError(e.body_text()))?;

    let body = state.provider.search_flights(&query).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
