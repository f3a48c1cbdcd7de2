//! Login command implementation.

use anyhow::{Context, Result, bail};
use clap::Args;
use tracing::debug;

use taskdesk_core::form::{Form, Submission, submit_sign_in};
use taskdesk_core::{Credentials, Location, NavState, Navigator, View};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct LoginArgs {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "TASKDESK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Protected route to continue to after signing in
    #[arg(long)]
    pub from: Option<String>,
}

pub async fn run(ctx: &AppContext, args: LoginArgs) -> Result<()> {
    let store = ctx.resolved_store().await?;

    let nav = match &args.from {
        Some(from) => NavState::from(Location::new(from).context("Invalid --from route")?),
        None => NavState::default(),
    };

    let mut navigator = Navigator::new();
    let screen = navigator.open(&store.snapshot(), Location::sign_in(), nav)?;
    if screen.view() != Some(View::SignIn) {
        output::note("Already signed in.");
        output::screen(&screen);
        return Ok(());
    }

    output::note("Signing in...");

    let form = Form::sign_in();
    let credentials = Credentials::new(args.email, args.password);

    match submit_sign_in(&form, &store, credentials, navigator.state()).await {
        Submission::Succeeded(target) => {
            output::success("Signed in");
            println!();
            let screen = navigator.open(&store.snapshot(), target, NavState::default())?;
            output::screen(&screen);
            Ok(())
        }
        Submission::Failed { message, error } => {
            debug!(error = %error, "Sign-in failed");
            bail!(message)
        }
        Submission::Busy | Submission::Discarded => bail!("Sign-in did not complete"),
    }
}
