use std::path::Path;
use std::process::{Command, Stdio};

use log::info;

use crate::error::{Error, Result};

/// Program invoked to run a target.
pub const MAKE_PROGRAM: &str = "make";

/// Builds the `make -f <makefile> <target>` invocation.
#[must_use]
pub fn make_command(makefile_path: &Path, target: &str) -> Command {
    let mut command = Command::new(MAKE_PROGRAM);
    command.arg("-f").arg(makefile_path).arg(target);
    command
}

/// Executes a command with inherited stdio and waits for it.
///
/// # Errors
///
/// Returns an error if the command cannot be started or exits with a
/// non-zero status.
pub fn execute_command(mut command: Command) -> Result<()> {
    let command = command
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());

    info!("Executing {:?}", command);

    let status = command
        .spawn()
        .map_err(Error::SubProcess)?
        .wait()
        .map_err(Error::SubProcess)?;

    if status.success() {
        Ok(())
    } else {
        Err(Error::SubProcessExit(status.code()))
    }
}
