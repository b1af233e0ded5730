//! Main token service implementation

use chrono::{TimeZone, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

use crate::domain::entities::token::{Claims, IssuedToken, TokenPayload};
use crate::domain::entities::user::Role;
use crate::errors::{DomainError, TokenError};

use super::config::TokenServiceConfig;

/// Service for signing and verifying access tokens
pub struct TokenService {
    config: TokenServiceConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenService {
    /// Creates a new token service instance
    ///
    /// # Arguments
    ///
    /// * `config` - Token service configuration
    pub fn new(config: TokenServiceConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.jwt_secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        // Only HS256 is accepted; a token signed with any other algorithm fails
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        match &config.issuer {
            Some(issuer) => {
                validation.set_required_spec_claims(&["exp", "sub", "iss"]);
                validation.set_issuer(&[issuer.as_str()]);
            }
            None => validation.set_required_spec_claims(&["exp", "sub"]),
        }

        Self {
            config,
            encoding_key,
            decoding_key,
            validation,
        }
    }

    /// Access token lifetime in seconds
    pub fn ttl_seconds(&self) -> i64 {
        self.config.access_token_ttl_seconds
    }

    /// Signs a token for `user_id` valid for the configured lifetime
    ///
    /// # Returns
    ///
    /// * `Ok(IssuedToken)` - The signed token with its issue and expiry times
    /// * `Err(DomainError)` - Signing failed
    pub fn generate(&self, user_id: &str, role: Role) -> Result<IssuedToken, DomainError> {
        self.generate_at(user_id, role, Utc::now().timestamp())
    }

    /// Signs a token as if issued at `issued_at` (Unix seconds)
    pub fn generate_at(
        &self,
        user_id: &str,
        role: Role,
        issued_at: i64,
    ) -> Result<IssuedToken, DomainError> {
        let mut claims = Claims::new(user_id, role, issued_at, self.config.access_token_ttl_seconds);
        claims.iss = self.config.issuer.clone();

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| DomainError::Token(TokenError::TokenGenerationFailed(e.to_string())))?;

        Ok(IssuedToken {
            token,
            issued_at: Utc
                .timestamp_opt(issued_at, 0)
                .single()
                .unwrap_or_else(Utc::now),
            expires_at: claims.exp,
        })
    }

    /// Verifies a token and returns the identity it carries
    ///
    /// Every failure (bad signature, wrong algorithm, missing or mistyped
    /// claims, expiry) is reported as `TokenError::InvalidToken`.
    pub fn validate(&self, token: &str) -> Result<TokenPayload, DomainError> {
        self.validate_at(token, Utc::now().timestamp())
    }

    /// Verifies a token against the given clock (Unix seconds)
    pub fn validate_at(&self, token: &str, now: i64) -> Result<TokenPayload, DomainError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                DomainError::Token(TokenError::InvalidToken)
            })?;
        let claims = data.claims;

        if claims.sub.is_empty() || !claims.role.is_valid() || claims.is_expired_at(now) {
            return Err(DomainError::Token(TokenError::InvalidToken));
        }

        Ok(TokenPayload::from_claims(&claims))
    }
}
