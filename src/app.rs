/*
 * Responsibility
 * - tracing / panic hook 初期化
 * - Config読み込み → DB 接続 + migration → 依存生成 → Router 組み立て
 * - Middleware の適用 (HTTP / CORS / security headers)
 * - axum::serve() で起動 (Ctrl-C / SIGTERM で graceful shutdown)
 */
use std::{panic, process, sync::Arc};

use axum::{Router, routing::get};
use sqlx::{PgPool, postgres::PgPoolOptions};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::api::graphql::handlers::health::health;
use crate::config::{Config, DatabaseConfig};
use crate::error::AppError;
use crate::middleware;
use crate::repos::PgUserRepo;
use crate::services::auth::TokenCodec;
use crate::state::AppState;

pub(crate) fn init_tracing() {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,hello_graphql=debug,tower_http=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info,tower_http=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn init_panic_hook(abort_on_panic: bool) {
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // stderr can be hidden depending on how the process is launched
        tracing::error!(?info, "panic");

        // Development: crash the whole process so we notice immediately.
        if abort_on_panic {
            process::abort();
        } else {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<(), AppError> {
    init_tracing();
    let config = Config::from_env()?;

    init_panic_hook(!config.app_env.is_production());

    tracing::info!(
        "starting GraphQL API in {:?} mode on {}{}",
        config.app_env,
        config.addr,
        config.graphql_endpoint
    );

    let state = build_state(&config).await?;
    let app = build_router(state, &config);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Open the pool and bring the schema up to date.
pub(crate) async fn connect_db(config: &DatabaseConfig) -> Result<PgPool, AppError> {
    let db = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.url)
        .await?;

    sqlx::migrate!("./migrations").run(&db).await?;
    tracing::info!("database migrations applied");

    Ok(db)
}

async fn build_state(config: &Config) -> Result<AppState, AppError> {
    let db = connect_db(&config.database).await?;

    // The codec holds the signing secret; it is shared read-only by every request.
    let tokens = Arc::new(TokenCodec::new(&config.token));
    let users = Arc::new(PgUserRepo::new(db));

    Ok(AppState::new(users, tokens, &config.graphql_endpoint))
}

pub(crate) fn build_router(state: AppState, config: &Config) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .merge(api::graphql::routes(state.clone(), config))
        .with_state(state);

    let router = middleware::security_headers::apply(router, config);
    let router = middleware::cors::apply(router, config);
    middleware::http::apply(router, config)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
