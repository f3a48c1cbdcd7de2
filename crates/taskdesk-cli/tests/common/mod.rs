use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI against `api`, keeping the token in `token_file`.
pub fn run_cli_with_env(args: &[&str], token_file: &Path, api: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_taskdesk"));
    cmd.args(args);
    cmd.env("TASKDESK_API_URL", api);
    cmd.env("TASKDESK_TOKEN_FILE", token_file);
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("TASKDESK_PASSWORD");
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success, returning stdout.
pub fn run_cli_success(args: &[&str], token_file: &Path, api: &str) -> String {
    let output = run_cli_with_env(args, token_file, api);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Run the CLI and expect failure, returning stderr.
pub fn run_cli_failure(args: &[&str], token_file: &Path, api: &str) -> String {
    let output = run_cli_with_env(args, token_file, api);
    if output.status.success() {
        panic!("CLI command should have failed: {:?}", args);
    }
    String::from_utf8_lossy(&output.stderr).to_string()
}
