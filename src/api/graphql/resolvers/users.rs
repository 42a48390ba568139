/*
 * Responsibility
 * - users / user / me query と createUser mutation
 * - 保護された operation は AuthGuard (または require_subject) を通す
 */
use std::sync::Arc;

use async_graphql::{Context, ID, Object, Result};
use uuid::Uuid;

use crate::api::graphql::dto::{
    page::{PageInput, PageType, UsersType},
    users::{UserInput, UserType},
};
use crate::api::graphql::resolvers::gql;
use crate::error::ApiError;
use crate::repos::{UserRepo, error::RepoError};
use crate::services::auth::{AuthGuard, hash_password, require_subject};

#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// Users ordered by name.
    async fn users(&self, ctx: &Context<'_>, page: Option<PageInput>) -> Result<UsersType> {
        let input = page.unwrap_or_default();
        let request = input
            .to_request()
            .map_err(|violations| gql(ApiError::invalid_arguments(violations)))?;

        let repo = ctx.data::<Arc<dyn UserRepo>>()?;
        let (users, count) = repo.list(request).await.map_err(gql)?;

        Ok(UsersType {
            page: PageType::new(input, request, count),
            users: users.into_iter().map(UserType::from).collect(),
        })
    }

    #[graphql(guard = "AuthGuard")]
    async fn user(&self, ctx: &Context<'_>, id: ID) -> Result<UserType> {
        let user_id = Uuid::parse_str(&id).map_err(|_| {
            gql(ApiError::invalid_arguments(vec![
                "id must be a valid UUID".to_string(),
            ]))
        })?;

        let repo = ctx.data::<Arc<dyn UserRepo>>()?;
        repo.find_by_id(user_id)
            .await
            .map_err(gql)?
            .map(UserType::from)
            .ok_or_else(|| gql(ApiError::not_found("user not found")))
    }

    /// The user the bearer token was issued to.
    async fn me(&self, ctx: &Context<'_>) -> Result<UserType> {
        let subject = require_subject(ctx)?;

        // A verified subject that is not one of our ids points at no user.
        let Ok(user_id) = Uuid::parse_str(subject) else {
            return Err(gql(ApiError::not_found("user not found")));
        };

        let repo = ctx.data::<Arc<dyn UserRepo>>()?;
        repo.find_by_id(user_id)
            .await
            .map_err(gql)?
            .map(UserType::from)
            .ok_or_else(|| gql(ApiError::not_found("user not found")))
    }
}

#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    #[graphql(guard = "AuthGuard")]
    async fn create_user(&self, ctx: &Context<'_>, data: UserInput) -> Result<UserType> {
        data.validate()
            .map_err(|violations| gql(ApiError::invalid_arguments(violations)))?;

        let password_hash = hash_password(&data.password).map_err(gql)?;

        let repo = ctx.data::<Arc<dyn UserRepo>>()?;
        let user = match repo.create(data.into_new_user(password_hash)).await {
            Ok(user) => user,
            Err(RepoError::Conflict) => {
                return Err(gql(ApiError::bad_request("email already registered")));
            }
            Err(e) => return Err(gql(e)),
        };

        tracing::info!(user_id = %user.id, "user created");

        Ok(UserType::from(user))
    }
}
