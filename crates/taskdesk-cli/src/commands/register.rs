//! Register command implementation.

use anyhow::{Result, bail};
use clap::Args;
use tracing::debug;

use taskdesk_core::form::{Form, Submission, submit_registration};
use taskdesk_core::{Location, NavState, Navigator, RegistrationInput, View};

use crate::context::AppContext;
use crate::output;

#[derive(Args, Debug)]
pub struct RegisterArgs {
    /// Full name
    #[arg(long)]
    pub full_name: String,

    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long, env = "TASKDESK_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Mobile number
    #[arg(long)]
    pub mobile: String,

    /// Requested role (defaults to ROLE_CUSTOMER)
    #[arg(long)]
    pub role: Option<String>,
}

pub async fn run(ctx: &AppContext, args: RegisterArgs) -> Result<()> {
    let store = ctx.resolved_store().await?;

    let mut navigator = Navigator::new();
    let screen = navigator.open(&store.snapshot(), Location::register(), NavState::default())?;
    if screen.view() != Some(View::Register) {
        output::note("Already signed in.");
        output::screen(&screen);
        return Ok(());
    }

    let mut input = RegistrationInput::new(args.full_name, args.email, args.password, args.mobile);
    if let Some(role) = args.role {
        input = input.with_role(role);
    }

    output::note("Creating account...");

    let form = Form::register();
    match submit_registration(&form, &store, input).await {
        Submission::Succeeded((target, state)) => {
            output::success("Account created");
            println!();
            let screen = navigator.open(&store.snapshot(), target, state)?;
            output::screen(&screen);
            Ok(())
        }
        Submission::Failed { message, error } => {
            debug!(error = %error, "Registration failed");
            bail!(message)
        }
        Submission::Busy | Submission::Discarded => bail!("Registration did not complete"),
    }
}
