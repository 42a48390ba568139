//! CORS policy for browser GraphQL clients.
//!
//! Policy:
//! - Development: any origin, WITHOUT credentials (GraphiQL and local front-ends).
//! - Production: exact-match allow-list from `CORS_ALLOWED_ORIGINS`, WITHOUT credentials.
//!   An empty allow-list allows no cross-origin callers.
//!
//! GraphQL only needs GET (GraphiQL) and POST (operations); the bearer token travels in
//! `Authorization`, so that header must be allowed explicitly.

use std::time::Duration;

use axum::Router;
use axum::http::{HeaderName, HeaderValue, Method, header};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::config::Config;

pub fn apply(router: Router, config: &Config) -> Router {
    router.layer(layer(config))
}

fn layer(config: &Config) -> CorsLayer {
    let base = if config.app_env.is_production() {
        let allowed: Vec<HeaderValue> = config
            .cors_allowed_origins
            .iter()
            .filter_map(|s| HeaderValue::from_str(s).ok())
            .collect();

        CorsLayer::new().allow_origin(AllowOrigin::list(allowed))
    } else {
        CorsLayer::new().allow_origin(Any)
    };

    base.allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            HeaderName::from_static("x-request-id"),
        ])
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(Duration::from_secs(600))
}
