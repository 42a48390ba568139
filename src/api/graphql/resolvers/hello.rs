use async_graphql::Object;

#[derive(Default)]
pub struct HelloQuery;

#[Object]
impl HelloQuery {
    /// Smoke-test greeting
    async fn hello(&self) -> &'static str {
        "👋 Hello world! 👋"
    }
}
