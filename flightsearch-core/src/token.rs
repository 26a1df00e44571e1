use chrono::{DateTime, TimeDelta, Utc};
use flightsearch_shared::Masked;
use serde::Deserialize;

/// OAuth2 client credentials for the provider. Loaded once at startup.
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: Masked<String>,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: Masked::new(client_secret.into()),
        }
    }
}

/// Longest lifetime accepted from a token exchange.
pub const MAX_TOKEN_TTL_SECONDS: i64 = 86_400;

/// A bearer token obtained from one token exchange.
///
/// Never mutated: a refresh builds a new `CachedToken` and replaces the old one whole, so
/// `access_token`, `issued_at` and `ttl_seconds` always come from the same exchange.
#[derive(Debug, Clone)]
pub struct CachedToken {
    access_token: Masked<String>,
    issued_at: DateTime<Utc>,
    ttl_seconds: i64,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns `None` for an empty token, which is never treated as present, and for a
    /// ttl outside `0..=MAX_TOKEN_TTL_SECONDS`.
    pub fn new(access_token: String, issued_at: DateTime<Utc>, ttl_seconds: i64) -> Option<Self> {
        if access_token.is_empty() || !(0..=MAX_TOKEN_TTL_SECONDS).contains(&ttl_seconds) {
            return None;
        }
        let expires_at = TimeDelta::try_seconds(ttl_seconds).and_then(|ttl| issued_at.checked_add_signed(ttl))?;
        Some(Self {
            access_token: Masked::new(access_token),
            issued_at,
            ttl_seconds,
            expires_at,
        })
    }

    pub fn access_token(&self) -> &str {
        self.access_token.expose()
    }

    pub fn issued_at(&self) -> DateTime<Utc> {
        self.issued_at
    }

    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired exactly at `expires_at - margin`, no grace period. A margin too large to
    /// subtract counts as expired.
    pub fn is_expired_at(&self, now: DateTime<Utc>, margin_seconds: i64) -> bool {
        match TimeDelta::try_seconds(margin_seconds).and_then(|m| self.expires_at.checked_sub_signed(m)) {
            Some(deadline) => now >= deadline,
            None => true,
        }
    }
}

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_token_is_not_present() {
        assert!(CachedToken::new(String::new(), t0(), 1799).is_none());
    }

    #[test]
    fn test_expiry_boundary_is_inclusive() {
        let token = CachedToken::new("abc".to_string(), t0(), 1799).unwrap();
        assert_eq!(token.expires_at(), t0() + Duration::seconds(1799));
        assert!(!token.is_expired_at(t0(), 0));
        assert!(!token.is_expired_at(t0() + Duration::seconds(1798), 0));
        assert!(token.is_expired_at(t0() + Duration::seconds(1799), 0));
        assert!(token.is_expired_at(t0() + Duration::seconds(5000), 0));
    }

    #[test]
    fn test_out_of_range_ttl_rejected() {
        assert!(CachedToken::new("abc".to_string(), t0(), -1).is_none());
        assert!(CachedToken::new("abc".to_string(), t0(), MAX_TOKEN_TTL_SECONDS + 1).is_none());
        assert!(CachedToken::new("abc".to_string(), t0(), 10_000_000_000_000_000).is_none());
        assert!(CachedToken::new("abc".to_string(), t0(), i64::MAX).is_none());
        assert!(CachedToken::new("abc".to_string(), t0(), MAX_TOKEN_TTL_SECONDS).is_some());
        assert!(CachedToken::new("abc".to_string(), t0(), 0).is_some());
    }

    #[test]
    fn test_huge_margin_counts_as_expired() {
        let token = CachedToken::new("abc".to_string(), t0(), 100).unwrap();
        assert!(token.is_expired_at(t0(), i64::MAX));
        assert!(token.is_expired_at(t0(), 10_000_000_000_000_000));
    }

    #[test]
    fn test_margin_expires_early() {
        let token = CachedToken::new("abc".to_string(), t0(), 100).unwrap();
        assert!(!token.is_expired_at(t0() + Duration::seconds(89), 10));
        assert!(token.is_expired_at(t0() + Duration::seconds(90), 10));
    }

    #[test]
    fn test_debug_output_hides_secrets() {
        let token = CachedToken::new("very-secret-token".to_string(), t0(), 10).unwrap();
        assert!(!format!("{:?}", token).contains("very-secret-token"));

        let creds = Credentials::new("client", "hunter2");
        let printed = format!("{:?}", creds);
        assert!(printed.contains("client"));
        assert!(!printed.contains("hunter2"));
    }
}
