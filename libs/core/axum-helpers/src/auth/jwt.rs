use super::config::JwtConfig;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// JWT claims structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String, // Subject (user ID)
    pub exp: i64,    // Expiration time
    pub iat: i64,    // Issued at
    pub jti: String, // JWT ID
}

/// Stateless HS256 token issuer and verifier
#[derive(Clone)]
pub struct JwtAuth {
    encoding_key: Arc<EncodingKey>,
    decoding_key: Arc<DecodingKey>,
    ttl: Duration,
}

impl JwtAuth {
    pub fn new(config: &JwtConfig) -> Self {
        tracing::info!(ttl_hours = config.ttl_hours, "JWT auth initialized");

        Self {
            encoding_key: Arc::new(EncodingKey::from_secret(config.secret.as_bytes())),
            decoding_key: Arc::new(DecodingKey::from_secret(config.secret.as_bytes())),
            ttl: Duration::hours(config.ttl_hours),
        }
    }

    /// Issue an access token whose subject is `user_id`
    pub fn create_access_token(&self, user_id: &str) -> eyre::Result<String> {
        let now = Utc::now();

        let claims = JwtClaims {
            sub: user_id.to_string(),
            exp: (now + self.ttl).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?;
        Ok(token)
    }

    /// Verify the token signature and expiry and decode its claims
    pub fn verify_token(&self, token: &str) -> eyre::Result<JwtClaims> {
        let token_data = decode::<JwtClaims>(
            token,
            &self.decoding_key,
            &Validation::new(Algorithm::HS256),
        )?;

        Ok(token_data.claims)
    }
}
