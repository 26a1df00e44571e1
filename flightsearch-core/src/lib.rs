pub mod search;
pub mod token;
pub mod provider;

pub use provider::{AccessTokenSource, FlightDataProvider};
pub use search::{AirportSearchQuery, AirportSummary, FlightOfferParams, FlightSearchQuery};
pub use token::{CachedToken, Clock, Credentials, SystemClock, MAX_TOKEN_TTL_SECONDS};

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Validation failed: {0}")]
    ValidationError(String),
    #[error("Authentication with flight data provider failed: {0}")]
    AuthError(String),
    #[error("Flight data provider error: {message}")]
    ProviderError {
        message: String,
        status: Option<u16>,
        body: Option<String>,
    },
}

impl CoreError {
    /// Provider failure with no HTTP status attached (transport errors, bad payloads).
    pub fn provider(message: impl Into<String>) -> Self {
        CoreError::ProviderError {
            message: message.into(),
            status: None,
            body: None,
        }
    }
}

pub type CoreResult<T> = Result<T, CoreError>;
