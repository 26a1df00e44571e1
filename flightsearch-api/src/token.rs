use axum::{extract::State, routing::get, Router};
use flightsearch_core::AccessTokenSource;
use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/token", get(current_token))
}

/// GET /token
/// Current provider bearer token as plain text. Debug surface.
async fn current_token(State(state): State<AppState>) -> Result<String, AppError> {
    Ok(state.tokens.get_valid_token().await?)
}
