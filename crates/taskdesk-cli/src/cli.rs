//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use taskdesk_core::types::DEFAULT_API_URL;

use crate::commands::{login, logout, open, register, whoami};

/// Command-line client for the taskdesk backend.
#[derive(Parser, Debug)]
#[command(name = "taskdesk")]
#[command(author, version = env!("TASKDESK_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Backend base URL
    #[arg(long, env = "TASKDESK_API_URL", default_value = DEFAULT_API_URL, global = true)]
    pub api: String,

    /// File holding the session token
    #[arg(long, env = "TASKDESK_TOKEN_FILE", global = true)]
    pub token_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in and store the session token
    Login(login::LoginArgs),

    /// Create a new account
    Register(register::RegisterArgs),

    /// Forget the stored session token
    Logout(logout::LogoutArgs),

    /// Display the signed-in user
    Whoami(whoami::WhoamiArgs),

    /// Navigate to a client route and show what it renders
    Open(open::OpenArgs),
}
