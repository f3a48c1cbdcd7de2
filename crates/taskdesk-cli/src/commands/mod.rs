//! Subcommand implementations.

pub mod login;
pub mod logout;
pub mod open;
pub mod register;
pub mod whoami;

use anyhow::Result;

use crate::cli::{Cli, Commands};
use crate::context::AppContext;

pub async fn handle(cli: Cli) -> Result<()> {
    let ctx = AppContext::from_cli(&cli);

    match cli.command {
        Commands::Login(args) => login::run(&ctx, args).await,
        Commands::Register(args) => register::run(&ctx, args).await,
        Commands::Logout(args) => logout::run(&ctx, args).await,
        Commands::Whoami(args) => whoami::run(&ctx, args).await,
        Commands::Open(args) => open::run(&ctx, args).await,
    }
}
