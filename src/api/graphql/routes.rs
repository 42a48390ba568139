/*
 * Responsibility
 * - GraphQL endpoint の URL 構造を定義
 * - AuthContext を導出する middleware をここで適用する
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::api::graphql::handlers::graphql::{graphiql, graphql};
use crate::config::Config;
use crate::middleware;
use crate::state::AppState;

pub fn routes(state: AppState, config: &Config) -> Router<AppState> {
    let endpoint = if config.app_env.is_production() {
        post(graphql)
    } else {
        get(graphiql).post(graphql)
    };

    let router = Router::new().route(&config.graphql_endpoint, endpoint);

    middleware::auth::context::apply(router, state)
}
