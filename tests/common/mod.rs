use std::path::Path;

use assert_cmd::Command;

/// Runs the shell binary in script mode with its home inside `home`.
pub fn script_command(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("proration_cli").expect("binary built");
    cmd.env("PRORATION_CLI_SCRIPT", "1")
        .env("PRORATION_HOME", home)
        .env_remove("RUST_LOG");
    cmd
}
