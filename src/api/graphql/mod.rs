/*
 * Responsibility
 * - GraphQL API の公開ポイント (routes() / schema の re-export)
 */
pub mod dto;
pub mod handlers;
pub mod resolvers;
pub mod response;
mod routes;
pub mod schema;

pub use routes::routes;
pub use schema::{AppSchema, build_schema};
