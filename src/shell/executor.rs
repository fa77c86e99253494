// ABOUTME: Executor trait and the system implementation that spawns real processes
// Captured execution returns stdout; silent execution inherits the caller's stdio

use super::{ShellCommand, ShellError};
use tracing::debug;

/// Runs external commands on behalf of the tmux gateway and the launcher.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Run `cmd` and return its standard output without the trailing newline.
    fn execute(&self, cmd: &ShellCommand) -> Result<String, ShellError>;

    /// Run `cmd` with the caller's standard streams attached.
    fn execute_silently(&self, cmd: &ShellCommand) -> Result<(), ShellError>;
}

impl<E: Executor + ?Sized> Executor for &E {
    fn execute(&self, cmd: &ShellCommand) -> Result<String, ShellError> {
        (**self).execute(cmd)
    }

    fn execute_silently(&self, cmd: &ShellCommand) -> Result<(), ShellError> {
        (**self).execute_silently(cmd)
    }
}

/// Executor backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn execute(&self, cmd: &ShellCommand) -> Result<String, ShellError> {
        let line = cmd.to_string();
        debug!(command = %line, "exec");

        let output = cmd
            .to_command()
            .output()
            .map_err(|source| ShellError::Spawn {
                command: line.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            debug!(command = %line, status = %output.status, %stderr, "exec failed");
            return Err(ShellError::Failed {
                command: line,
                status: output.status,
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.strip_suffix('\n').unwrap_or(&stdout).to_string())
    }

    fn execute_silently(&self, cmd: &ShellCommand) -> Result<(), ShellError> {
        let line = cmd.to_string();
        debug!(command = %line, "exec (inherit stdio)");

        let status = cmd
            .to_command()
            .status()
            .map_err(|source| ShellError::Spawn {
                command: line.clone(),
                source,
            })?;

        if !status.success() {
            debug!(command = %line, %status, "exec failed");
            return Err(ShellError::Failed {
                command: line,
                status,
                stderr: String::new(),
            });
        }
        Ok(())
    }
}
