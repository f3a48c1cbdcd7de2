//! Open command implementation.

use anyhow::{Context, Result};
use clap::Args;

use taskdesk_core::{Location, NavState, Navigator};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct OpenArgs {
    /// Client route, e.g. /dashboard
    pub path: String,
}

pub async fn run(ctx: &AppContext, args: OpenArgs) -> Result<()> {
    let location = Location::new(&args.path).context("Invalid route")?;
    let store = ctx.resolved_store().await?;

    let mut navigator = Navigator::new();
    let screen = navigator.open(&store.snapshot(), location, NavState::default())?;

    output::screen(&screen);
    Ok(())
}
