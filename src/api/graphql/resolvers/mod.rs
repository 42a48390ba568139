/*
 * Responsibility
 * - Query / Mutation のルート (各 resolver を MergedObject で束ねる)
 * - resolver 共通のエラー変換
 */
use async_graphql::{ErrorExtensions, MergedObject};

use crate::error::ApiError;

mod hello;
mod login;
mod users;

pub use hello::HelloQuery;
pub use login::LoginMutation;
pub use users::{UserMutation, UserQuery};

#[derive(MergedObject, Default)]
pub struct QueryRoot(HelloQuery, UserQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(UserMutation, LoginMutation);

fn gql(e: impl Into<ApiError>) -> async_graphql::Error {
    e.into().extend()
}
