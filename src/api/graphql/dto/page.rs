/*
 * Responsibility
 * - ページング入力 (offset/limit) と、ページ情報 + users の出力型
 */
use async_graphql::{InputObject, SimpleObject};

use crate::api::graphql::dto::users::UserType;
use crate::services::pagination::{DEFAULT_LIMIT, PageRequest};

#[derive(Debug, Clone, Copy, InputObject)]
pub struct PageInput {
    /// Number of skipped elements
    #[graphql(default)]
    pub offset: i32,
    /// Maximum number of elements to return (0 = no limit)
    #[graphql(default = 10)]
    pub limit: i32,
}

impl Default for PageInput {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PageInput {
    pub fn to_request(self) -> Result<PageRequest, Vec<String>> {
        PageRequest::new(self.offset, self.limit)
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Page")]
pub struct PageType {
    /// Total number of elements
    pub count: i32,
    /// Number of skipped elements
    pub offset: i32,
    /// Maximum number of elements
    pub limit: i32,
    /// Indicate if there is a posterior page
    pub has_next_page: bool,
    /// Indicate if there is a previous page
    pub has_previous_page: bool,
}

impl PageType {
    pub fn new(input: PageInput, request: PageRequest, count: i64) -> Self {
        Self {
            count: i32::try_from(count).unwrap_or(i32::MAX),
            offset: input.offset,
            limit: input.limit,
            has_next_page: request.has_next_page(count),
            has_previous_page: request.has_previous_page(),
        }
    }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Users")]
pub struct UsersType {
    pub page: PageType,
    /// List of users
    pub users: Vec<UserType>,
}
