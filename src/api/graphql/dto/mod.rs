/*
 * Responsibility
 * - GraphQL の input / output 型 (DB の型をそのまま公開しない)
 */
pub mod login;
pub mod page;
pub mod users;
