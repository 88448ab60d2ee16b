//! Admin session tokens
//!
//! Sessions are HS256 JWTs held by the client, usually in the `admin_session`
//! cookie. There is no server-side session table; logout only clears the
//! cookie and a captured token stays valid until it expires.

use std::fmt::Debug;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::admin::Admin;
use crate::domain::DomainError;

/// Name of the cookie carrying the session token
pub const SESSION_COOKIE: &str = "admin_session";

/// Default session lifetime (7 days)
pub const DEFAULT_SESSION_TTL_HOURS: u64 = 168;

/// Longest accepted session lifetime (one year)
pub const MAX_SESSION_TTL_HOURS: u64 = 24 * 365;

/// Lifetime in seconds, with the hours clamped to `1..=MAX_SESSION_TTL_HOURS`
fn ttl_seconds(ttl_hours: u64) -> i64 {
    ttl_hours.clamp(1, MAX_SESSION_TTL_HOURS) as i64 * 3600
}

/// Session token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionClaims {
    /// Subject (admin ID)
    pub sub: String,
    pub username: String,
    pub is_logged_in: bool,
    /// Issued at (Unix epoch)
    pub iat: i64,
    /// Expiration (Unix epoch)
    pub exp: i64,
}

impl SessionClaims {
    pub fn new(admin: &Admin, ttl_hours: u64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::seconds(ttl_seconds(ttl_hours));

        Self {
            sub: admin.id().as_str().to_string(),
            username: admin.username().to_string(),
            is_logged_in: true,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        }
    }
}

/// Authenticated operator, as recovered from a valid session token
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionIdentity {
    pub admin_id: String,
    pub username: String,
}

/// Session configuration
#[derive(Clone)]
pub struct SessionConfig {
    /// HMAC secret for signing tokens
    pub secret: String,
    pub ttl_hours: u64,
    /// Add the `Secure` attribute to the session cookie
    pub cookie_secure: bool,
}

impl Debug for SessionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionConfig")
            .field("secret", &"[hidden]")
            .field("ttl_hours", &self.ttl_hours)
            .field("cookie_secure", &self.cookie_secure)
            .finish()
    }
}

impl SessionConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            ttl_hours: DEFAULT_SESSION_TTL_HOURS,
            cookie_secure: false,
        }
    }

    pub fn with_ttl_hours(mut self, hours: u64) -> Self {
        self.ttl_hours = hours;
        self
    }

    pub fn with_cookie_secure(mut self, secure: bool) -> Self {
        self.cookie_secure = secure;
        self
    }
}

/// Generate a random signing secret (sessions won't survive a restart)
pub fn generate_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut bytes);
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct SessionService {
    config: SessionConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl Debug for SessionService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionService")
            .field("config", &self.config)
            .field("encoding_key", &"[hidden]")
            .field("decoding_key", &"[hidden]")
            .finish()
    }
}

impl SessionService {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue a signed token for a freshly authenticated admin
    pub fn issue(&self, admin: &Admin) -> Result<String, DomainError> {
        let claims = SessionClaims::new(admin, self.config.ttl_hours);

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::internal(format!("Failed to sign session token: {}", e)))
    }

    /// Verify a token's signature, expiry and login flag
    pub fn verify(&self, token: &str) -> Option<SessionIdentity> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        let claims = match decode::<SessionClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                tracing::debug!(error = %e, "Rejected session token");
                return None;
            }
        };

        if !claims.is_logged_in {
            return None;
        }

        Some(SessionIdentity {
            admin_id: claims.sub,
            username: claims.username,
        })
    }

    pub fn ttl_seconds(&self) -> i64 {
        ttl_seconds(self.config.ttl_hours)
    }

    /// `Set-Cookie` value carrying a session token
    pub fn session_cookie(&self, token: &str) -> String {
        self.cookie(token, self.ttl_seconds())
    }

    /// `Set-Cookie` value that removes the session cookie
    pub fn clear_cookie(&self) -> String {
        self.cookie("", 0)
    }

    fn cookie(&self, value: &str, max_age: i64) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            SESSION_COOKIE, value, max_age
        );

        if self.config.cookie_secure {
            cookie.push_str("; Secure");
        }

        cookie
    }
}

/// Extract the session token from a `Cookie` request header value
pub fn token_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == SESSION_COOKIE)
        .map(|(_, value)| value.trim())
        .filter(|value| !value.is_empty())
}
