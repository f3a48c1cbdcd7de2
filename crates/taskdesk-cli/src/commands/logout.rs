//! Logout command implementation.

use anyhow::Result;
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LogoutArgs {}

pub async fn run(ctx: &AppContext, _args: LogoutArgs) -> Result<()> {
    let store = ctx.store()?;
    store.logout();

    output::success("Signed out");
    Ok(())
}
