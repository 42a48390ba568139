use std::sync::Arc;

use async_graphql::{Context, Object, Result};

use crate::api::graphql::dto::{
    login::{LoginInput, LoginType},
    users::UserType,
};
use crate::api::graphql::resolvers::gql;
use crate::error::ApiError;
use crate::repos::UserRepo;
use crate::services::auth::{TokenCodec, verify_password};

#[derive(Default)]
pub struct LoginMutation;

#[Object]
impl LoginMutation {
    /// Exchange e-mail and password for a bearer token.
    async fn login(&self, ctx: &Context<'_>, data: LoginInput) -> Result<LoginType> {
        let repo = ctx.data::<Arc<dyn UserRepo>>()?;
        let tokens = ctx.data::<Arc<TokenCodec>>()?;

        let user = repo
            .find_by_email(data.email.trim())
            .await
            .map_err(gql)?
            .ok_or_else(|| gql(ApiError::not_found("email not registered")))?;

        if !verify_password(&data.password, &user.password_hash).map_err(gql)? {
            tracing::info!(user_id = %user.id, "login rejected: wrong password");
            return Err(gql(ApiError::new(401, "incorrect email or password")));
        }

        let token = tokens
            .issue(&user.id.to_string(), data.remember_me)
            .map_err(gql)?;

        tracing::info!(user_id = %user.id, remember_me = data.remember_me, "login succeeded");

        Ok(LoginType {
            user: UserType::from(user),
            token,
        })
    }
}
