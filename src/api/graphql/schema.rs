use std::sync::Arc;

use async_graphql::{EmptySubscription, Schema};

use crate::api::graphql::resolvers::{MutationRoot, QueryRoot};
use crate::repos::UserRepo;
use crate::services::auth::TokenCodec;

/// Deeper queries are rejected before execution.
pub const MAX_QUERY_DEPTH: usize = 7;

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Process-wide services are injected as schema data; the per-request `AuthContext`
/// is attached to each request by the GraphQL handler.
pub fn build_schema(users: Arc<dyn UserRepo>, tokens: Arc<TokenCodec>) -> AppSchema {
    Schema::build(QueryRoot::default(), MutationRoot::default(), EmptySubscription)
        .data(users)
        .data(tokens)
        .limit_depth(MAX_QUERY_DEPTH)
        .finish()
}
