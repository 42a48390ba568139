/*
 * Responsibility
 * - tokio runtime 起動
 * - CLI 引数の解釈 → app::run() (server) / seed::run() の呼び出し（ロジックは置かない）
 */
use anyhow::Result;
use clap::{Parser, Subcommand};

mod api;
mod app;
mod config;
mod error;
mod middleware;
mod repos;
mod seed;
mod services;
mod state;

/// GraphQL user-accounts API.
#[derive(Parser, Debug)]
#[command(name = "hello-graphql", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Replace the users table with generated sample users
    Seed {
        /// Number of users to create
        #[arg(long, default_value_t = seed::DEFAULT_USERS)]
        users: usize,

        /// Addresses per user
        #[arg(long, default_value_t = seed::DEFAULT_ADDRESSES)]
        addresses: usize,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => app::run().await?,
        Command::Seed { users, addresses } => seed::run(users, addresses).await?,
    }
    Ok(())
}
