//! Whoami command implementation.

use anyhow::{Context, Result};
use clap::Args;

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the full profile as JSON
    #[arg(long)]
    pub json: bool,
}

pub async fn run(ctx: &AppContext, args: WhoamiArgs) -> Result<()> {
    let store = ctx.resolved_store().await?;

    let profile = store
        .profile()
        .context("Not signed in. Run 'taskdesk login' first.")?;

    if args.json {
        output::json_pretty(&profile)?;
    } else {
        output::profile(&profile);
    }
    Ok(())
}
