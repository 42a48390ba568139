//! Authorization ヘッダ → AuthContext を extensions に入れる
//!
//! - ここでは拒否しない。ヘッダ無し / 期限切れ / 不正 も AuthContext として下流に渡す
//! - 保護された resolver だけが gate (AuthGuard) で拒否する

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::AuthContext;
use crate::state::AppState;

/// GraphQL routes に AuthContext 導出を掛ける。
pub fn apply(router: Router<AppState>, state: AppState) -> Router<AppState> {
    // axum 0.8 の from_fn は State extractor を受け取れないため、`from_fn_with_state` で明示的に state を渡す
    router.layer(middleware::from_fn_with_state(state, context_middleware))
}

async fn context_middleware(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let auth_ctx = AuthContext::from_headers(req.headers(), &state.tokens);

    if let Some(subject) = auth_ctx.subject() {
        tracing::debug!(subject = %subject, "request authenticated");
    }

    // middleware → handler への受け渡し
    req.extensions_mut().insert(auth_ctx);

    next.run(req).await
}
