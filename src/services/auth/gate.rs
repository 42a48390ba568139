//! Authorization gate for protected GraphQL operations.

use async_graphql::{Context, ErrorExtensions, Guard};

use crate::error::ApiError;
use crate::services::auth::context::{AuthContext, AuthFailure};

/// A subject always wins; otherwise the recorded failure, otherwise "token not sent".
pub fn authorize(auth: &AuthContext) -> Result<&str, ApiError> {
    match auth {
        AuthContext::Authenticated { subject } => Ok(subject),
        AuthContext::Failed { failure } => Err((*failure).into()),
        AuthContext::Unauthenticated => Err(AuthFailure::TokenNotSent.into()),
    }
}

static UNAUTHENTICATED: AuthContext = AuthContext::Unauthenticated;

/// Resolver-side entry point: the subject of the current request or a client error.
pub fn require_subject<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a str> {
    let auth = ctx.data_opt::<AuthContext>().unwrap_or(&UNAUTHENTICATED);

    authorize(auth).map_err(|e| e.extend())
}

/// `#[graphql(guard = "AuthGuard")]`
pub struct AuthGuard;

impl Guard for AuthGuard {
    async fn check(&self, ctx: &Context<'_>) -> async_graphql::Result<()> {
        require_subject(ctx).map(|_| ())
    }
}
