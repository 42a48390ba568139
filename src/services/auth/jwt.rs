use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signing secret and token lifetimes, built once at start-up.
#[derive(Clone)]
pub struct TokenConfig {
    secret: String,
    // Token lifetimes (seconds)
    pub ttl_seconds: u64,
    pub extended_ttl_seconds: u64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>, ttl_seconds: u64, extended_ttl_seconds: u64) -> Self {
        Self {
            secret: secret.into(),
            ttl_seconds,
            extended_ttl_seconds,
        }
    }
}

impl std::fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("TokenConfig")
            .field("secret", &"<redacted>")
            .field("ttl_seconds", &self.ttl_seconds)
            .field("extended_ttl_seconds", &self.extended_ttl_seconds)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token expired")]
    Expired,
    #[error("token invalid: {0}")]
    Invalid(jsonwebtoken::errors::Error),
    #[error("failed to sign token: {0}")]
    Signing(jsonwebtoken::errors::Error),
    #[error("token lifetime out of range")]
    Lifetime,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            _ => Self::Invalid(e),
        }
    }
}

/// HS256 token codec.
///
/// - `exp` is checked with zero leeway: a token is expired as soon as now > exp.
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl_seconds: u64,
    extended_ttl_seconds: u64,
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("validation", &self.validation)
            .field("ttl_seconds", &self.ttl_seconds)
            .field("extended_ttl_seconds", &self.extended_ttl_seconds)
            .finish()
    }
}

impl TokenCodec {
    pub fn new(config: &TokenConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl_seconds: config.ttl_seconds,
            extended_ttl_seconds: config.extended_ttl_seconds,
        }
    }

    pub fn ttl_seconds(&self, extended: bool) -> u64 {
        if extended {
            self.extended_ttl_seconds
        } else {
            self.ttl_seconds
        }
    }

    /// Sign a token for `subject`; `extended` selects the "remember me" lifetime.
    pub fn issue(&self, subject: &str, extended: bool) -> Result<String, TokenError> {
        self.issue_at(subject, extended, chrono::Utc::now().timestamp())
    }

    pub(crate) fn issue_at(
        &self,
        subject: &str,
        extended: bool,
        issued_at: i64,
    ) -> Result<String, TokenError> {
        let exp = i64::try_from(self.ttl_seconds(extended))
            .ok()
            .and_then(|ttl| issued_at.checked_add(ttl))
            .ok_or(TokenError::Lifetime)?;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: issued_at,
            exp,
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());
        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(TokenError::Signing)
    }

    /// Verify signature and expiry, returning the embedded claims.
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)?;

        Ok(data.claims)
    }
}
