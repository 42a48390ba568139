/*
 * Responsibility
 * - AppError: 起動/serve 時の失敗 (main まで伝播)
 * - ApiError: GraphQL クライアントに返す {code, message, detail} の定義
 * - RepoError / TokenError / PasswordError → ApiError の統一的な変換
 */
use async_graphql::ErrorExtensions;
use thiserror::Error;

use crate::config::ConfigError;
use crate::repos::error::RepoError;
use crate::services::auth::{PasswordError, TokenError};

#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("database error: {0}")]
    Db(#[from] sqlx::Error),
    #[error("migration failed: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("repository error: {0}")]
    Repo(#[from] RepoError),
    #[error("password hashing failed: {0}")]
    Password(#[from] PasswordError),
}

/// Client-visible error carried through GraphQL error extensions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: u16,
    pub message: String,
    pub detail: Option<String>,
    pub details: Vec<String>,
}

impl ApiError {
    pub fn new(code: u16, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            detail: None,
            details: Vec::new(),
        }
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    pub fn unauthorized(detail: &'static str) -> Self {
        Self::new(401, "unauthorized").with_detail(detail)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(400, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn invalid_arguments(details: Vec<String>) -> Self {
        Self {
            details,
            ..Self::new(400, "invalid arguments")
        }
    }

    pub fn internal() -> Self {
        Self::new(500, "internal error")
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        async_graphql::Error::new(self.message.clone()).extend_with(|_, e| {
            e.set("code", self.code);
            if let Some(detail) = &self.detail {
                e.set("detail", detail.as_str());
            }
            if !self.details.is_empty() {
                e.set("details", self.details.clone());
            }
        })
    }
}

impl From<RepoError> for ApiError {
    fn from(e: RepoError) -> Self {
        tracing::error!(error = %e, "repository failure");
        ApiError::internal()
    }
}

impl From<TokenError> for ApiError {
    fn from(e: TokenError) -> Self {
        match e {
            TokenError::Expired => ApiError::unauthorized("token expired"),
            TokenError::Invalid(_) => ApiError::unauthorized("token invalid"),
            // Issuing side: a signing failure is a server problem, not the client's.
            TokenError::Signing(e) => {
                tracing::error!(error = %e, "failed to sign token");
                ApiError::internal()
            }
            TokenError::Lifetime => {
                tracing::error!("configured token lifetime does not fit a timestamp");
                ApiError::internal()
            }
        }
    }
}

impl From<PasswordError> for ApiError {
    fn from(e: PasswordError) -> Self {
        tracing::error!(error = %e, "password hashing failure");
        ApiError::internal()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_errors_map_to_unauthorized_details() {
        assert_eq!(
            ApiError::from(TokenError::Expired),
            ApiError::unauthorized("token expired")
        );

        let invalid = jsonwebtoken::errors::Error::from(
            jsonwebtoken::errors::ErrorKind::InvalidSignature,
        );
        let err = ApiError::from(TokenError::Invalid(invalid));
        assert_eq!(err.code, 401);
        assert_eq!(err.message, "unauthorized");
        assert_eq!(err.detail.as_deref(), Some("token invalid"));
    }

    #[test]
    fn issuing_failures_are_server_errors() {
        assert_eq!(ApiError::from(TokenError::Lifetime), ApiError::internal());
    }

    #[test]
    fn extensions_carry_code_and_detail() {
        let gql = ApiError::unauthorized("token not sent").extend();
        assert_eq!(gql.message, "unauthorized");

        let ext = gql.extensions.expect("extensions");
        assert_eq!(ext.get("code"), Some(&async_graphql::Value::from(401u16)));
        assert_eq!(
            ext.get("detail"),
            Some(&async_graphql::Value::from("token not sent"))
        );
        assert!(ext.get("details").is_none());
    }

    #[test]
    fn invalid_arguments_lists_every_violation() {
        let err = ApiError::invalid_arguments(vec!["a".into(), "b".into()]);
        assert_eq!(err.code, 400);
        assert_eq!(err.message, "invalid arguments");
        assert_eq!(err.details, vec!["a", "b"]);
        assert!(err.detail.is_none());
    }
}
