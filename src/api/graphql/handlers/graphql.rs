/*
 * Responsibility
 * - POST /graphql: middleware が導出した AuthContext をリクエストに載せて実行
 * - GET /graphql: GraphiQL (development のみ routes 側で公開)
 */
use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQLRequest;
use axum::{
    Extension, Json,
    extract::State,
    response::{Html, IntoResponse},
};

use crate::api::graphql::response::GraphqlBody;
use crate::services::auth::AuthContext;
use crate::state::AppState;

pub async fn graphql(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    req: GraphQLRequest,
) -> Json<GraphqlBody> {
    let request = req.into_inner().data(auth);
    let response = state.schema.execute(request).await;

    Json(GraphqlBody::from(response))
}

pub async fn graphiql(State(state): State<AppState>) -> impl IntoResponse {
    Html(
        GraphiQLSource::build()
            .endpoint(&state.graphql_endpoint)
            .finish(),
    )
}
