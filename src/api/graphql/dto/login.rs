use async_graphql::{InputObject, SimpleObject};

use crate::api::graphql::dto::users::UserType;

#[derive(Debug, Clone, InputObject)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
    /// Issue a token with the extended lifetime.
    #[graphql(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Login")]
pub struct LoginType {
    /// Authorized user
    pub user: UserType,
    /// User access token
    pub token: String,
}
