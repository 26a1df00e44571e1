use std::sync::Arc;
use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::{debug, error, info};
use flightsearch_core::{
    AccessTokenSource, CachedToken, Clock, CoreError, CoreResult, Credentials, SystemClock, MAX_TOKEN_TTL_SECONDS,
};
use crate::app_config::AmadeusConfig;

pub const TOKEN_PATH: &str = "/v1/security/oauth2/token";

/// Result of one successful client-credentials exchange.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenGrant {
    pub access_token: String,
    pub expires_in: i64,
}

#[async_trait]
pub trait TokenExchange: Send + Sync {
    async fn exchange(&self, credentials: &Credentials) -> CoreResult<TokenGrant>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
    #[serde(default)]
    token_type: Option<String>,
}

/// Client-credentials grant against the provider's OAuth2 token endpoint.
pub struct HttpTokenExchange {
    http: reqwest::Client,
    token_url: String,
}

impl HttpTokenExchange {
    pub fn new(http: reqwest::Client, base_url: &str) -> Self {
        Self {
            http,
            token_url: format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH),
        }
    }
}

#[async_trait]
impl TokenExchange for HttpTokenExchange {
    async fn exchange(&self, credentials: &Credentials) -> CoreResult<TokenGrant> {
        let form = [
            ("grant_type", "client_credentials"),
            ("client_id", credentials.client_id.as_str()),
            ("client_secret", credentials.client_secret.expose().as_str()),
        ];

        let response = self
            .http
            .post(&self.token_url)
            .form(&form)
            .send()
            .await
            .map_err(|e| {
                error!("Token endpoint unreachable: {}", e);
                CoreError::AuthError("token endpoint unreachable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            error!("Token exchange rejected. Status: {}", status.as_u16());
            return Err(CoreError::AuthError(format!(
                "token endpoint returned status {}",
                status.as_u16()
            )));
        }

        let body: TokenResponse = response.json().await.map_err(|e| {
            error!("Token response could not be parsed: {}", e);
            CoreError::AuthError("malformed token response".to_string())
        })?;

        let access_token = body
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| CoreError::AuthError("token response has no access_token".to_string()))?;
        let expires_in = body
            .expires_in
            .ok_or_else(|| CoreError::AuthError("token response has no expires_in".to_string()))?;
        if !(0..=MAX_TOKEN_TTL_SECONDS).contains(&expires_in) {
            error!("Token response has out-of-range expires_in: {}", expires_in);
            return Err(CoreError::AuthError(format!("token response has invalid expires_in {}", expires_in)));
        }

        debug!("Token exchange succeeded (type: {:?}, expires_in: {}s)", body.token_type, expires_in);
        Ok(TokenGrant { access_token, expires_in })
    }
}

/// Owns the cached bearer token and refreshes it lazily.
///
/// The check-and-refresh sequence runs under a single lock held across the exchange, so
/// concurrent callers that find the token expired wait for one refresh instead of each
/// starting their own.
pub struct TokenManager {
    credentials: Credentials,
    exchange: Arc<dyn TokenExchange>,
    clock: Arc<dyn Clock>,
    expiry_margin_seconds: i64,
    cached: Mutex<Option<CachedToken>>,
}

impl TokenManager {
    pub fn new(credentials: Credentials, exchange: Arc<dyn TokenExchange>, clock: Arc<dyn Clock>) -> Self {
        Self {
            credentials,
            exchange,
            clock,
            expiry_margin_seconds: 0,
            cached: Mutex::new(None),
        }
    }

    pub fn from_config(config: &AmadeusConfig, http: reqwest::Client) -> Self {
        let exchange = HttpTokenExchange::new(http, &config.base_url);
        Self::new(config.credentials(), Arc::new(exchange), Arc::new(SystemClock))
            .with_expiry_margin(config.expiry_margin_seconds)
    }

    pub fn with_expiry_margin(mut self, seconds: i64) -> Self {
        self.expiry_margin_seconds = seconds.max(0);
        self
    }

    #[cfg(test)]
    async fn cached(&self) -> Option<CachedToken> {
        self.cached.lock().await.clone()
    }
}

#[async_trait]
impl AccessTokenSource for TokenManager {
    async fn get_valid_token(&self) -> CoreResult<String> {
        let mut slot = self.cached.lock().await;
        let now = self.clock.now();

        if let Some(token) = slot.as_ref() {
            if !token.is_expired_at(now, self.expiry_margin_seconds) {
                debug!("Using cached access token (expires at {})", token.expires_at());
                return Ok(token.access_token().to_string());
            }
            info!("Access token expired at {}, requesting a new one", token.expires_at());
        } else {
            info!("No access token cached, requesting a new one");
        }

        let grant = self.exchange.exchange(&self.credentials).await?;
        let token = CachedToken::new(grant.access_token, self.clock.now(), grant.expires_in)
            .ok_or_else(|| CoreError::AuthError("provider returned an unusable access token".to_string()))?;
        info!("Access token obtained, valid for {}s", token.ttl_seconds());

        let value = token.access_token().to_string();
        *slot = Some(token);
        Ok(value)
    }
}
