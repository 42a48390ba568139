/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - schema (UserRepo / TokenCodec を data として保持), tokens (AuthContext 導出用)
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::sync::Arc;

use crate::api::graphql::{AppSchema, build_schema};
use crate::repos::UserRepo;
use crate::services::auth::TokenCodec;

#[derive(Clone)]
pub struct AppState {
    pub schema: AppSchema,
    pub tokens: Arc<TokenCodec>,
    pub graphql_endpoint: Arc<str>,
}

impl AppState {
    pub fn new(users: Arc<dyn UserRepo>, tokens: Arc<TokenCodec>, graphql_endpoint: &str) -> Self {
        let schema = build_schema(users, tokens.clone());

        Self {
            schema,
            tokens,
            graphql_endpoint: Arc::from(graphql_endpoint),
        }
    }
}
