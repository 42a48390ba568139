/*
 * Responsibility
 * - リクエストごとの認証状態 (AuthContext) の型
 * - Authorization ヘッダ → TokenCodec::verify → AuthContext の導出
 *
 * Notes
 * - ここでは拒否しない。拒否するかどうかは gate (保護されたオペレーション) 側の責務
 */
use axum::http::{HeaderMap, header};

use crate::error::ApiError;
use crate::services::auth::jwt::{TokenCodec, TokenError};

/// Why a request carries no usable subject.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthFailure {
    TokenNotSent,
    TokenExpired,
    TokenInvalid,
}

impl AuthFailure {
    pub fn detail(&self) -> &'static str {
        match self {
            Self::TokenNotSent => "token not sent",
            Self::TokenExpired => "token expired",
            Self::TokenInvalid => "token invalid",
        }
    }
}

impl From<AuthFailure> for ApiError {
    fn from(failure: AuthFailure) -> Self {
        ApiError::unauthorized(failure.detail())
    }
}

impl From<&TokenError> for AuthFailure {
    fn from(e: &TokenError) -> Self {
        match e {
            TokenError::Expired => Self::TokenExpired,
            // Every non-expiry verification failure is reported as invalid (401).
            TokenError::Invalid(_) | TokenError::Signing(_) | TokenError::Lifetime => {
                Self::TokenInvalid
            }
        }
    }
}

/// Per-request authentication state handed to every resolver.
///
/// - `Unauthenticated`: no `Authorization` header at all
/// - `Authenticated`: verified token, `subject` is the token's `sub`
/// - `Failed`: a header was sent but did not verify
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum AuthContext {
    #[default]
    Unauthenticated,
    Authenticated {
        subject: String,
    },
    Failed {
        failure: AuthFailure,
    },
}

impl AuthContext {
    pub fn from_headers(headers: &HeaderMap, codec: &TokenCodec) -> Self {
        let Some(value) = headers.get(header::AUTHORIZATION) else {
            return Self::Unauthenticated;
        };

        let Ok(value) = value.to_str() else {
            return Self::Failed {
                failure: AuthFailure::TokenInvalid,
            };
        };

        // Without the prefix the raw value is verified as-is (and fails).
        let token = value.strip_prefix("Bearer ").unwrap_or(value);

        match codec.verify(token) {
            Ok(claims) => Self::Authenticated {
                subject: claims.sub,
            },
            Err(e) => {
                tracing::debug!(error = %e, "bearer token rejected");
                Self::Failed {
                    failure: AuthFailure::from(&e),
                }
            }
        }
    }

    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Authenticated { subject } => Some(subject),
            _ => None,
        }
    }
}
