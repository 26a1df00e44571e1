use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use flightsearch_core::CoreError;
use serde_json::{json, Value};

#[derive(Debug)]
pub enum AppError {
    ValidationError(String),
    AuthenticationError(String),
    ProviderError {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                (StatusCode::BAD_REQUEST, json!({ "error": msg }))
            }
            AppError::AuthenticationError(msg) => {
                tracing::error!("Provider authentication failed: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "Could not authenticate with the flight data provider" }),
                )
            }
            AppError::ProviderError { message, status, body } => {
                tracing::error!("Provider call failed: {} (status: {:?})", message, status);
                let mut payload = json!({ "error": message });
                if let Some(status) = status {
                    payload["providerStatus"] = json!(status);
                }
                if let Some(body) = body {
                    // Embed JSON error documents as-is, anything else as a string.
                    payload["providerBody"] = serde_json::from_str::<Value>(&body).unwrap_or(Value::String(body));
                }
                (StatusCode::INTERNAL_SERVER_ERROR, payload)
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ValidationError(msg) => AppError::ValidationError(msg),
            CoreError::AuthError(msg) => AppError::AuthenticationError(msg),
            CoreError::ProviderError { message, status, body } => AppError::ProviderError { message, status, body },
        }
    }
}
